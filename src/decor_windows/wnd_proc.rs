/*
 * The shared subclass procedure installed on every decorated window. Each
 * message is decoded into a `WindowMessage`, routed against the window's
 * registry entry, and the resulting `Disposition` is carried out here after
 * the registry lock has been released. Anything the decorations do not
 * care about goes to the window's previous procedure untouched.
 */

use super::{active_registry, handle_from_hwnd, monitor, point_from_lparam, rect_from_win32};
use crate::message_router::{Disposition, WindowMessage};
use crate::registry::BackgroundBrush;

use std::ffi::c_void;
use windows::Win32::{
    Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM},
    Graphics::Gdi::{FillRect, GetDC, HBRUSH, HDC, ReleaseDC},
    UI::WindowsAndMessaging::{
        CallWindowProcW, DefWindowProcW, GetClientRect, GetWindowRect, MINMAXINFO,
        NCCALCSIZE_PARAMS, WM_ENTERSIZEMOVE, WM_ERASEBKGND, WM_EXITSIZEMOVE, WM_GETMINMAXINFO,
        WM_MOVE, WM_NCACTIVATE, WM_NCCALCSIZE, WM_NCHITTEST, WM_PAINT, WNDPROC,
    },
};

const HANDLED: LRESULT = LRESULT(1);

fn decode_message(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> WindowMessage {
    match msg {
        WM_NCACTIVATE => WindowMessage::NcActivate,
        WM_NCCALCSIZE => WindowMessage::NcCalcSize {
            calc_valid_rects: wparam.0 != 0,
        },
        WM_GETMINMAXINFO => WindowMessage::GetMinMaxInfo,
        WM_NCHITTEST => {
            let mut window = RECT::default();
            match unsafe { GetWindowRect(hwnd, &mut window) } {
                Ok(()) => WindowMessage::NcHitTest {
                    cursor: point_from_lparam(lparam),
                    window: rect_from_win32(window),
                },
                Err(err) => {
                    log::trace!("Dispatcher: GetWindowRect failed for {hwnd:?}: {err}");
                    WindowMessage::Other
                }
            }
        }
        WM_ENTERSIZEMOVE => WindowMessage::EnterSizeMove,
        WM_MOVE => WindowMessage::Move,
        WM_EXITSIZEMOVE => WindowMessage::ExitSizeMove,
        WM_PAINT => WindowMessage::Paint,
        WM_ERASEBKGND => WindowMessage::EraseBackground,
        _ => WindowMessage::Other,
    }
}

unsafe fn fill_client_rect(hwnd: HWND, hdc: HDC, brush: HBRUSH) {
    unsafe {
        let mut client = RECT::default();
        if GetClientRect(hwnd, &mut client).is_ok() {
            FillRect(hdc, &client, brush);
        }
    }
}

/*
 * Fills the client area with the configured background. `WM_ERASEBKGND`
 * hands us the DC in `wParam`; for `WM_PAINT` we borrow the window DC so the
 * update region stays invalid for the toolkit's own painting that follows.
 */
unsafe fn paint_background(hwnd: HWND, msg: u32, wparam: WPARAM, brush: HBRUSH) {
    unsafe {
        if msg == WM_ERASEBKGND {
            fill_client_rect(hwnd, HDC(wparam.0 as *mut c_void), brush);
            return;
        }
        let hdc = GetDC(Some(hwnd));
        if hdc.is_invalid() {
            return;
        }
        fill_client_rect(hwnd, hdc, brush);
        let _ = ReleaseDC(Some(hwnd), hdc);
    }
}

pub(crate) unsafe extern "system" fn decoration_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let handle = handle_from_hwnd(hwnd);
    let plan = active_registry().and_then(|registry| {
        registry.plan_message(handle, decode_message(hwnd, msg, wparam, lparam))
    });

    let Some(plan) = plan else {
        // Only reachable if the registration invariants were broken.
        log::error!("Dispatcher: message {msg:#06x} for {handle} has no decoration entry");
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    };

    let forward = || unsafe {
        let previous: WNDPROC = std::mem::transmute(plan.previous_procedure);
        CallWindowProcW(previous, hwnd, msg, wparam, lparam)
    };

    match plan.disposition {
        Disposition::Return(result) => LRESULT(result),
        Disposition::FitMaximizedClientArea => {
            let params = lparam.0 as *mut NCCALCSIZE_PARAMS;
            if !params.is_null() {
                monitor::fit_maximized_client_area(hwnd, unsafe { &mut (*params).rgrc[0] });
            }
            LRESULT(0)
        }
        Disposition::ReportMaximizedBounds => {
            let info = lparam.0 as *mut MINMAXINFO;
            if !info.is_null() {
                monitor::report_maximized_bounds(hwnd, unsafe { &mut *info });
            }
            LRESULT(0)
        }
        Disposition::HitTest(zone) => LRESULT(zone.to_ht_code()),
        Disposition::Background { fill, handled } => {
            // The plan's reference keeps the brush alive even if the host replaces it meanwhile.
            if fill && let Some(brush) = plan.background.as_deref() {
                unsafe { paint_background(hwnd, msg, wparam, brush.raw()) };
            }
            if handled { HANDLED } else { forward() }
        }
        Disposition::Forward => forward(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::hit_test::HitZone;
    use windows::Win32::UI::WindowsAndMessaging::{
        HTBOTTOM, HTBOTTOMLEFT, HTBOTTOMRIGHT, HTCAPTION, HTCLIENT, HTLEFT, HTRIGHT, HTTOP,
        HTTOPLEFT, HTTOPRIGHT, WM_SIZE,
    };

    #[test]
    fn hit_zone_codes_match_windows_constants() {
        let pairs = [
            (HitZone::Client, HTCLIENT),
            (HitZone::Caption, HTCAPTION),
            (HitZone::TopLeft, HTTOPLEFT),
            (HitZone::Top, HTTOP),
            (HitZone::TopRight, HTTOPRIGHT),
            (HitZone::Left, HTLEFT),
            (HitZone::Right, HTRIGHT),
            (HitZone::BottomLeft, HTBOTTOMLEFT),
            (HitZone::Bottom, HTBOTTOM),
            (HitZone::BottomRight, HTBOTTOMRIGHT),
        ];
        for (zone, code) in pairs {
            assert_eq!(zone.to_ht_code(), code as isize, "{zone:?}");
        }
    }

    #[test]
    fn decode_distinguishes_nccalcsize_forms() {
        let hwnd = HWND(std::ptr::null_mut());
        assert_eq!(
            decode_message(hwnd, WM_NCCALCSIZE, WPARAM(1), LPARAM(0)),
            WindowMessage::NcCalcSize {
                calc_valid_rects: true
            }
        );
        assert_eq!(
            decode_message(hwnd, WM_NCCALCSIZE, WPARAM(0), LPARAM(0)),
            WindowMessage::NcCalcSize {
                calc_valid_rects: false
            }
        );
        assert_eq!(
            decode_message(hwnd, WM_SIZE, WPARAM(0), LPARAM(0)),
            WindowMessage::Other
        );
    }

    #[test]
    fn hit_test_without_window_rect_is_forwarded() {
        // A null HWND has no window rect, so the hit test cannot be classified.
        let lparam = LPARAM(((20 << 16) | 10) as isize);
        assert_eq!(
            decode_message(HWND(std::ptr::null_mut()), WM_NCHITTEST, WPARAM(0), lparam),
            WindowMessage::Other
        );
        assert_eq!(point_from_lparam(lparam), Point::new(10, 20));
    }
}
