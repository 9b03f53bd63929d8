/*
 * Flat C ABI consumed by the host runtime's native binding. Window handles
 * arrive as `i64`. This is the only layer that turns `Result`s into the
 * host's boolean/void contract, so every failure is logged here.
 */

use crate::error::{DecorationError, Result};
use crate::types::{DecorationConfig, WindowHandle};

#[cfg(target_os = "macos")]
use crate::decor_macos as platform;
#[cfg(target_os = "windows")]
use crate::decor_windows as platform;

fn report(op: &str, result: Result<()>) -> bool {
    let Err(err) = result else {
        return true;
    };
    match err {
        DecorationError::AlreadyInstalled(_) => log::debug!("{op}: {err}"),
        DecorationError::Os(_) => log::error!("{op}: {err}"),
        DecorationError::NotInitialized
        | DecorationError::AlreadyInitialized
        | DecorationError::NotDecorated(_)
        | DecorationError::InvalidHandle(_) => log::warn!("{op}: {err}"),
    }
    false
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Creates the decoration subsystem with default settings. Returns false if it
/// already exists.
#[cfg(any(target_os = "windows", target_os = "macos"))]
#[unsafe(no_mangle)]
pub extern "C" fn decorations_init() -> bool {
    report("decorations_init", platform::init(DecorationConfig::default()))
}

/// Restores every window that is still decorated and frees the subsystem.
#[cfg(any(target_os = "windows", target_os = "macos"))]
#[unsafe(no_mangle)]
pub extern "C" fn decorations_shutdown() {
    report("decorations_shutdown", platform::shutdown().map(|_| ()));
}

// ---------------------------------------------------------------------------
// Install / uninstall
// ---------------------------------------------------------------------------

/// Returns true once the window is decorated.
#[cfg(target_os = "windows")]
#[unsafe(no_mangle)]
pub extern "C" fn decorations_install(handle: i64) -> bool {
    report(
        "decorations_install",
        platform::install_decorations(WindowHandle::new(handle)),
    )
}

/// The AppKit change is queued on the main thread, so this always reports success.
#[cfg(target_os = "macos")]
#[unsafe(no_mangle)]
pub extern "C" fn decorations_install(handle: i64) -> bool {
    report(
        "decorations_install",
        platform::install_decorations(WindowHandle::new(handle)),
    );
    true
}

#[cfg(target_os = "windows")]
#[unsafe(no_mangle)]
pub extern "C" fn decorations_install_popup_menu(handle: i64) -> bool {
    report(
        "decorations_install_popup_menu",
        platform::install_popup_menu_decorations(WindowHandle::new(handle)),
    )
}

#[cfg(any(target_os = "windows", target_os = "macos"))]
#[unsafe(no_mangle)]
pub extern "C" fn decorations_uninstall(handle: i64) {
    report(
        "decorations_uninstall",
        platform::uninstall_decorations(WindowHandle::new(handle)),
    );
}

// ---------------------------------------------------------------------------
// Per-window state (Windows)
// ---------------------------------------------------------------------------

#[cfg(target_os = "windows")]
#[unsafe(no_mangle)]
pub extern "C" fn decorations_set_resizable(handle: i64, resizable: bool) {
    report(
        "decorations_set_resizable",
        platform::set_resizable(WindowHandle::new(handle), resizable),
    );
}

/// - `left`/`right`: caption insets from the window edges, in pixels
/// - `height`: caption height from the top edge, in pixels
#[cfg(target_os = "windows")]
#[unsafe(no_mangle)]
pub extern "C" fn decorations_update_values(handle: i64, left: i32, right: i32, height: i32) {
    report(
        "decorations_update_values",
        platform::update_values(WindowHandle::new(handle), left, right, height),
    );
}

/// Channels outside 0..=255 are clamped.
#[cfg(target_os = "windows")]
#[unsafe(no_mangle)]
pub extern "C" fn decorations_set_background(handle: i64, r: i32, g: i32, b: i32) {
    report(
        "decorations_set_background",
        platform::set_background(WindowHandle::new(handle), r, g, b),
    );
}

// ---------------------------------------------------------------------------
// Window state transitions (Windows)
// ---------------------------------------------------------------------------

#[cfg(target_os = "windows")]
#[unsafe(no_mangle)]
pub extern "C" fn decorations_minimize(handle: i64) {
    report("decorations_minimize", platform::minimize(WindowHandle::new(handle)));
}

#[cfg(target_os = "windows")]
#[unsafe(no_mangle)]
pub extern "C" fn decorations_maximize(handle: i64) {
    report("decorations_maximize", platform::maximize(WindowHandle::new(handle)));
}

#[cfg(target_os = "windows")]
#[unsafe(no_mangle)]
pub extern "C" fn decorations_restore(handle: i64) {
    report("decorations_restore", platform::restore(WindowHandle::new(handle)));
}

// ---------------------------------------------------------------------------
// Title accent (macOS)
// ---------------------------------------------------------------------------

#[cfg(target_os = "macos")]
#[unsafe(no_mangle)]
pub extern "C" fn decorations_set_title_color(handle: i64) {
    report(
        "decorations_set_title_color",
        platform::set_title_color(WindowHandle::new(handle)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_maps_results_to_host_booleans() {
        assert!(report("op", Ok(())));
        assert!(!report("op", Err(DecorationError::NotInitialized)));
        assert!(!report(
            "op",
            Err(DecorationError::AlreadyInstalled(WindowHandle::new(7)))
        ));
        assert!(!report("op", Err(DecorationError::Os("boom".into()))));
    }
}
