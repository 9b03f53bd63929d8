/*
 * Win32 implementation of the registry's `WindowSystem` seam: frame styling,
 * DWM frame extension, window-procedure subclassing and solid background
 * brushes.
 */

use super::{hwnd_from_handle, wnd_proc::decoration_wnd_proc};
use crate::error::{DecorationError, Result};
use crate::registry::{BackgroundBrush, WindowSystem};
use crate::types::{Rgb, WindowHandle};

use windows::Win32::{
    Foundation::{COLORREF, ERROR_SUCCESS, GetLastError, SetLastError},
    Graphics::Dwm::DwmExtendFrameIntoClientArea,
    Graphics::Gdi::{CreateSolidBrush, DeleteObject, HBRUSH},
    UI::Controls::MARGINS,
    UI::WindowsAndMessaging::{
        GWL_STYLE, GWLP_WNDPROC, GetWindowLongPtrW, SWP_FRAMECHANGED, SWP_NOMOVE,
        SWP_NOOWNERZORDER, SWP_NOSIZE, SWP_NOZORDER, SetWindowLongPtrW, SetWindowPos,
        WS_THICKFRAME,
    },
};

/// Win32 `COLORREF` is laid out as 0x00BBGGRR.
pub(crate) fn rgb_to_colorref(color: Rgb) -> COLORREF {
    COLORREF((color.r as u32) | ((color.g as u32) << 8) | ((color.b as u32) << 16))
}

/// Owned GDI solid brush, deleted on drop.
#[derive(Debug)]
pub struct SolidBrush(HBRUSH);

// SAFETY: GDI brush handles are process-wide and may be used and deleted from any thread.
unsafe impl Send for SolidBrush {}
unsafe impl Sync for SolidBrush {}

impl BackgroundBrush for SolidBrush {
    type Raw = HBRUSH;

    fn raw(&self) -> HBRUSH {
        self.0
    }
}

impl Drop for SolidBrush {
    fn drop(&mut self) {
        if !self.0.is_invalid() {
            let _ = unsafe { DeleteObject(self.0.into()) };
            log::trace!("Win32System: background brush {:?} released", self.0);
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Win32WindowSystem;

impl WindowSystem for Win32WindowSystem {
    type Procedure = isize;
    type Brush = SolidBrush;

    fn apply_frame_style(&self, handle: WindowHandle) -> Result<()> {
        let hwnd = hwnd_from_handle(handle);
        // A zero style is legal (`WS_OVERLAPPED`), so only the write is checked.
        unsafe {
            let style = GetWindowLongPtrW(hwnd, GWL_STYLE);
            SetLastError(ERROR_SUCCESS);
            let previous = SetWindowLongPtrW(hwnd, GWL_STYLE, style | WS_THICKFRAME.0 as isize);
            let err = GetLastError();
            if previous == 0 && err != ERROR_SUCCESS {
                return Err(DecorationError::Os(format!(
                    "SetWindowLongPtrW(GWL_STYLE) failed: {err:?}"
                )));
            }
        }
        Ok(())
    }

    fn extend_frame_into_client(&self, handle: WindowHandle, margin: i32) -> Result<()> {
        let margins = MARGINS {
            cxLeftWidth: margin,
            cxRightWidth: margin,
            cyTopHeight: margin,
            cyBottomHeight: margin,
        };
        unsafe { DwmExtendFrameIntoClientArea(hwnd_from_handle(handle), &margins)? };
        Ok(())
    }

    fn current_procedure(&self, handle: WindowHandle) -> Result<isize> {
        let procedure = unsafe { GetWindowLongPtrW(hwnd_from_handle(handle), GWLP_WNDPROC) };
        if procedure == 0 {
            log::warn!(
                "Win32System: no window procedure for {handle}: {:?}",
                unsafe { GetLastError() }
            );
            return Err(DecorationError::InvalidHandle(handle));
        }
        Ok(procedure)
    }

    fn attach_dispatcher(&self, handle: WindowHandle) -> Result<()> {
        #[allow(clippy::fn_to_numeric_cast)]
        let replaced = unsafe {
            SetWindowLongPtrW(
                hwnd_from_handle(handle),
                GWLP_WNDPROC,
                decoration_wnd_proc as isize,
            )
        };
        if replaced == 0 {
            return Err(DecorationError::Os(format!(
                "SetWindowLongPtrW(GWLP_WNDPROC) failed: {:?}",
                unsafe { GetLastError() }
            )));
        }
        Ok(())
    }

    fn restore_procedure(&self, handle: WindowHandle, procedure: isize) -> Result<()> {
        let replaced =
            unsafe { SetWindowLongPtrW(hwnd_from_handle(handle), GWLP_WNDPROC, procedure) };
        if replaced == 0 {
            return Err(DecorationError::Os(format!(
                "SetWindowLongPtrW(GWLP_WNDPROC) restore failed: {:?}",
                unsafe { GetLastError() }
            )));
        }
        Ok(())
    }

    fn refresh_frame(&self, handle: WindowHandle) -> Result<()> {
        let flags = SWP_NOZORDER | SWP_NOOWNERZORDER | SWP_NOMOVE | SWP_NOSIZE | SWP_FRAMECHANGED;
        unsafe { SetWindowPos(hwnd_from_handle(handle), None, 0, 0, 0, 0, flags)? };
        Ok(())
    }

    fn create_brush(&self, color: Rgb) -> Result<SolidBrush> {
        let brush = unsafe { CreateSolidBrush(rgb_to_colorref(color)) };
        if brush.is_invalid() {
            return Err(DecorationError::Os(format!(
                "CreateSolidBrush({color:?}) failed"
            )));
        }
        Ok(SolidBrush(brush))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_to_colorref_is_bgr() {
        assert_eq!(rgb_to_colorref(Rgb::new(0x11, 0x22, 0x33)).0, 0x0033_2211);
    }

    #[test]
    fn brushes_are_created_and_released() {
        let brush = Win32WindowSystem
            .create_brush(Rgb::new(30, 30, 30))
            .expect("GDI brush creation should succeed");
        assert!(!brush.raw().is_invalid());
        drop(brush);
    }

    #[test]
    fn frame_style_is_added_to_a_plain_window() {
        use crate::decor_windows::handle_from_hwnd;
        use windows::Win32::UI::WindowsAndMessaging::{
            CreateWindowExW, DestroyWindow, WINDOW_EX_STYLE, WINDOW_STYLE,
        };
        use windows::core::w;

        // Arrange
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                w!("STATIC"),
                w!(""),
                WINDOW_STYLE(0),
                0,
                0,
                10,
                10,
                None,
                None,
                None,
                None,
            )
        }
        .expect("plain STATIC window can be created");
        // Act
        let result = Win32WindowSystem.apply_frame_style(handle_from_hwnd(hwnd));
        // Assert
        let style = unsafe { GetWindowLongPtrW(hwnd, GWL_STYLE) } as u32;
        unsafe { DestroyWindow(hwnd) }.expect("test window is destroyed");
        assert!(result.is_ok());
        assert_ne!(style & WS_THICKFRAME.0, 0);
    }
}
