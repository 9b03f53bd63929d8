/*
 * macOS decoration installer. Stateless apart from the configured title
 * accent: each call validates the handle, then enqueues a one-shot AppKit
 * mutation on the main queue and returns without waiting for it.
 */

mod main_queue;

use crate::error::{DecorationError, Result};
use crate::types::{DecorationConfig, Rgb, WindowHandle};

use objc2::rc::Retained;
use objc2_app_kit::{NSColor, NSTextField, NSView, NSWindow, NSWindowStyleMask};
use objc2_foundation::NSArray;
use std::sync::{PoisonError, RwLock};

static TITLE_COLOR: RwLock<Option<Rgb>> = RwLock::new(None);

/// Address of an `NSWindow` carried across to the main queue.
#[derive(Debug, Clone, Copy)]
struct WindowAddress(usize);

impl WindowAddress {
    /*
     * Retains the window behind the address.
     * SAFETY: must run on the main thread, and the host must keep the window
     * alive until the enqueued task has run.
     */
    unsafe fn window(self) -> Option<Retained<NSWindow>> {
        unsafe { Retained::retain(self.0 as *mut NSWindow) }
    }
}

fn checked(handle: WindowHandle) -> Result<WindowAddress> {
    if handle.is_null() {
        return Err(DecorationError::InvalidHandle(handle));
    }
    Ok(WindowAddress(handle.raw() as usize))
}

/// Records the title accent. The macOS side has no other state to set up.
pub fn init(config: DecorationConfig) -> Result<()> {
    let mut slot = TITLE_COLOR.write().unwrap_or_else(PoisonError::into_inner);
    if slot.is_some() {
        return Err(DecorationError::AlreadyInitialized);
    }
    *slot = Some(config.title_color);
    Ok(())
}

pub fn shutdown() -> Result<usize> {
    TITLE_COLOR
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
        .map(|_| 0)
        .ok_or(DecorationError::NotInitialized)
}

fn title_color() -> Rgb {
    TITLE_COLOR
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .unwrap_or(DecorationConfig::default().title_color)
}

fn update_style(handle: WindowHandle, full_size_content: bool) -> Result<()> {
    let address = checked(handle)?;
    main_queue::submit(move || {
        let Some(window) = (unsafe { address.window() }) else {
            log::warn!("MacDecorations: window {handle} vanished before styling");
            return;
        };
        let bit = NSWindowStyleMask::FullSizeContentView.0;
        unsafe {
            let mask = window.styleMask().0;
            let mask = if full_size_content { mask | bit } else { mask & !bit };
            window.setStyleMask(NSWindowStyleMask(mask));
            window.setTitlebarAppearsTransparent(full_size_content);
        }
        log::debug!("MacDecorations: full-size content {full_size_content} on {handle}");
    });
    Ok(())
}

/// Extends content under a transparent title bar.
pub fn install_decorations(handle: WindowHandle) -> Result<()> {
    update_style(handle, true)
}

pub fn uninstall_decorations(handle: WindowHandle) -> Result<()> {
    update_style(handle, false)
}

/*
 * Recolors the title text. Best effort: AppKit does not expose the title
 * label, so this takes the first `NSTextField` among the direct subviews of
 * the content view's superview (the title-bar container in current AppKit
 * layouts). The search is one level deep; if no field matches,
 * nothing changes.
 */
pub fn set_title_color(handle: WindowHandle) -> Result<()> {
    let address = checked(handle)?;
    let color = title_color();
    main_queue::submit(move || {
        let Some(window) = (unsafe { address.window() }) else {
            return;
        };
        unsafe {
            let Some(container) = window.contentView().and_then(|content| content.superview())
            else {
                log::debug!("MacDecorations: {handle} has no content container");
                return;
            };
            let siblings: Retained<NSArray<NSView>> = container.subviews();
            let title = siblings
                .iter()
                .find_map(|view| view.downcast::<NSTextField>().ok());
            let Some(title) = title else {
                log::debug!("MacDecorations: no title text field found for {handle}");
                return;
            };
            let ns_color = NSColor::colorWithCalibratedRed_green_blue_alpha(
                color.r as f64 / 255.0,
                color.g as f64 / 255.0,
                color.b as f64 / 255.0,
                1.0,
            );
            title.setTextColor(Some(&ns_color));
        }
    });
    Ok(())
}
