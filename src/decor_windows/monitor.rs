/*
 * Maximize geometry for borderless windows. Without a system frame a
 * maximized window would otherwise cover the taskbar and, on mixed-DPI
 * multi-monitor setups, pick up the wrong maximized size.
 */

use super::{point_to_win32, rect_from_win32, rect_to_win32};
use crate::geometry::{Rect, maximized_bounds};

use windows::Win32::{
    Foundation::{HWND, POINT, RECT},
    Graphics::Gdi::{
        GetMonitorInfoW, HMONITOR, MONITOR_DEFAULTTONEAREST, MONITOR_DEFAULTTONULL,
        MONITOR_DEFAULTTOPRIMARY, MONITORINFO, MonitorFromPoint, MonitorFromWindow,
    },
    UI::WindowsAndMessaging::{IsZoomed, MINMAXINFO},
};

fn work_area(monitor: HMONITOR) -> Option<Rect> {
    if monitor.is_invalid() {
        return None;
    }
    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    if unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
        Some(rect_from_win32(info.rcWork))
    } else {
        log::trace!("Monitor: GetMonitorInfoW failed for {monitor:?}");
        None
    }
}

fn is_maximized(hwnd: HWND) -> bool {
    unsafe { IsZoomed(hwnd) }.as_bool()
}

/*
 * Handles `WM_NCCALCSIZE` (valid-rects form). Leaving the proposed rect as is
 * makes the whole window client area; when maximized the rect is replaced by
 * the work area of the monitor the window sits on. The dispatcher then
 * returns 0, not TRUE: with `wParam` TRUE a nonzero result is read as
 * `WVR_*` flags, and 0 keeps the default client-area preservation.
 */
pub(crate) fn fit_maximized_client_area(hwnd: HWND, proposed: &mut RECT) {
    if !is_maximized(hwnd) {
        return;
    }
    let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONULL) };
    if let Some(work) = work_area(monitor) {
        *proposed = rect_to_win32(work);
    }
}

/// Handles `WM_GETMINMAXINFO`: nearest monitor for size, primary monitor for position.
pub(crate) fn report_maximized_bounds(hwnd: HWND, info: &mut MINMAXINFO) {
    let primary = unsafe { MonitorFromPoint(POINT::default(), MONITOR_DEFAULTTOPRIMARY) };
    let nearest = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };

    match (work_area(nearest), work_area(primary)) {
        (Some(nearest_work), Some(primary_work)) => {
            let bounds = maximized_bounds(nearest_work, primary_work);
            info.ptMaxSize = point_to_win32(bounds.size);
            info.ptMaxPosition = point_to_win32(bounds.position);
        }
        _ => log::warn!("Monitor: work areas unavailable for {hwnd:?}; keeping default max bounds"),
    }
}
