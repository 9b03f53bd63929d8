/*
 * Windows decoration subsystem. Owns the process-wide `DecorationRegistry`
 * (created by `init`, torn down by `shutdown`) and exposes the operations the
 * host binding calls: install/uninstall, the per-window mutators, and the
 * stateless show-window transitions.
 *
 * The registry slot is process-wide rather than thread-local: the host may
 * call install from its own thread while the window's messages are pumped on
 * the toolkit thread, and both must see the same entries.
 */

mod monitor;
mod win32_system;
mod wnd_proc;

pub use win32_system::{SolidBrush, Win32WindowSystem};

use crate::error::{DecorationError, Result};
use crate::geometry::{Point, Rect};
use crate::registry::DecorationRegistry;
use crate::types::{CaptionInsets, DecorationConfig, Rgb, WindowHandle};

use std::ffi::c_void;
use std::sync::{Arc, PoisonError, RwLock};
use windows::Win32::{
    Foundation::{HWND, LPARAM, POINT, RECT},
    UI::WindowsAndMessaging::{SHOW_WINDOW_CMD, SW_MAXIMIZE, SW_MINIMIZE, SW_RESTORE, ShowWindow},
};

pub type WindowsDecorations = DecorationRegistry<Win32WindowSystem>;

static SUBSYSTEM: RwLock<Option<Arc<WindowsDecorations>>> = RwLock::new(None);

pub(crate) fn hwnd_from_handle(handle: WindowHandle) -> HWND {
    HWND(handle.raw() as isize as *mut c_void)
}

pub(crate) fn handle_from_hwnd(hwnd: HWND) -> WindowHandle {
    WindowHandle::new(hwnd.0 as isize as i64)
}

// Screen coordinates are signed 16-bit words; monitors left of or above the
// primary yield negative values.
pub(crate) fn point_from_lparam(lparam: LPARAM) -> Point {
    Point::new(
        (lparam.0 & 0xFFFF) as i16 as i32,
        ((lparam.0 >> 16) & 0xFFFF) as i16 as i32,
    )
}

pub(crate) fn rect_from_win32(rect: RECT) -> Rect {
    Rect::new(rect.left, rect.top, rect.right, rect.bottom)
}

pub(crate) fn rect_to_win32(rect: Rect) -> RECT {
    RECT {
        left: rect.left,
        top: rect.top,
        right: rect.right,
        bottom: rect.bottom,
    }
}

pub(crate) fn point_to_win32(point: Point) -> POINT {
    POINT {
        x: point.x,
        y: point.y,
    }
}

pub(crate) fn active_registry() -> Option<Arc<WindowsDecorations>> {
    SUBSYSTEM
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn with_registry<R>(f: impl FnOnce(&WindowsDecorations) -> Result<R>) -> Result<R> {
    let registry = active_registry().ok_or(DecorationError::NotInitialized)?;
    f(&registry)
}

fn checked(handle: WindowHandle) -> Result<WindowHandle> {
    if handle.is_null() {
        Err(DecorationError::InvalidHandle(handle))
    } else {
        Ok(handle)
    }
}

/// Creates the subsystem. Fails if it already exists.
pub fn init(config: DecorationConfig) -> Result<()> {
    let mut slot = SUBSYSTEM.write().unwrap_or_else(PoisonError::into_inner);
    if slot.is_some() {
        return Err(DecorationError::AlreadyInitialized);
    }
    *slot = Some(Arc::new(DecorationRegistry::new(Win32WindowSystem, config)));
    log::debug!("WindowsDecorations: initialized with {config:?}");
    Ok(())
}

/*
 * Restores every still-decorated window and drops the registry. Windows are
 * restored while the registry is still reachable so messages arriving during
 * teardown keep finding their entries.
 */
pub fn shutdown() -> Result<usize> {
    let registry = active_registry().ok_or(DecorationError::NotInitialized)?;
    log::debug!(
        "WindowsDecorations: shutting down with {} decorated window(s)",
        registry.len()
    );
    let mut restored = registry.uninstall_all();

    let taken = SUBSYSTEM
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    if let Some(registry) = taken {
        // Catches installs that raced with the first pass.
        restored += registry.uninstall_all();
    }
    log::debug!("WindowsDecorations: shut down, {restored} window(s) restored");
    Ok(restored)
}

pub fn install_decorations(handle: WindowHandle) -> Result<()> {
    let handle = checked(handle)?;
    with_registry(|registry| registry.install(handle, false))
}

/// Installs decorations for popup/menu surfaces: no resize zones, no caption.
pub fn install_popup_menu_decorations(handle: WindowHandle) -> Result<()> {
    let handle = checked(handle)?;
    with_registry(|registry| registry.install(handle, true))
}

pub fn uninstall_decorations(handle: WindowHandle) -> Result<()> {
    with_registry(|registry| registry.uninstall(handle))
}

pub fn set_resizable(handle: WindowHandle, resizable: bool) -> Result<()> {
    with_registry(|registry| registry.set_resizable(handle, resizable))
}

pub fn update_values(handle: WindowHandle, left: i32, right: i32, height: i32) -> Result<()> {
    with_registry(|registry| registry.update_caption(handle, CaptionInsets::new(left, right, height)))
}

pub fn set_background(handle: WindowHandle, r: i32, g: i32, b: i32) -> Result<()> {
    with_registry(|registry| registry.set_background(handle, Rgb::from_channels(r, g, b)))
}

fn show(handle: WindowHandle, cmd: SHOW_WINDOW_CMD) -> Result<()> {
    let handle = checked(handle)?;
    log::debug!("WindowsDecorations: ShowWindow({cmd:?}) on {handle}");
    unsafe { _ = ShowWindow(hwnd_from_handle(handle), cmd) };
    Ok(())
}

pub fn minimize(handle: WindowHandle) -> Result<()> {
    show(handle, SW_MINIMIZE)
}

pub fn maximize(handle: WindowHandle) -> Result<()> {
    show(handle, SW_MAXIMIZE)
}

pub fn restore(handle: WindowHandle) -> Result<()> {
    show(handle, SW_RESTORE)
}
