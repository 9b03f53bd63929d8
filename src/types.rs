/*
 * Platform-agnostic value types shared by both decoration backends and the
 * C ABI. Nothing here touches an OS API, so these types (and the logic built
 * on them) compile and test on every host.
 */

/// Opaque native window handle as handed over by the host runtime.
///
/// On Windows this is an `HWND`, on macOS a pointer to an `NSWindow`. The host
/// owns the window and keeps the handle valid for the duration of each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(pub i64);

impl WindowHandle {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i64 {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /*
     * Builds a color from the host's integer channels. Out-of-range values are
     * clamped rather than wrapped so a stray 256 stays white instead of black.
     */
    pub fn from_channels(r: i32, g: i32, b: i32) -> Self {
        let clamp = |c: i32| c.clamp(0, u8::MAX as i32) as u8;
        Self {
            r: clamp(r),
            g: clamp(g),
            b: clamp(b),
        }
    }
}

/*
 * Pixel insets describing the draggable caption strip at the top of a
 * decorated window: `height` pixels tall, starting `left` pixels from the
 * left edge and ending `right` pixels before the right edge.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptionInsets {
    pub left: i32,
    pub right: i32,
    pub height: i32,
}

impl CaptionInsets {
    pub const fn new(left: i32, right: i32, height: i32) -> Self {
        Self {
            left,
            right,
            height,
        }
    }
}

/// Default thickness of the resize band along each window edge, in pixels.
pub const DEFAULT_RESIZE_BORDER: i32 = 5;
/// Default DWM frame extension into the client area, in pixels per side.
pub const DEFAULT_FRAME_MARGINS: i32 = 1;
/// Accent applied to the macOS title text.
pub const DEFAULT_TITLE_COLOR: Rgb = Rgb::new(255, 0, 0);

/// Tunables for the decoration subsystem. `Default` matches the stock behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorationConfig {
    pub resize_border: i32,
    pub frame_margins: i32,
    pub title_color: Rgb,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            resize_border: DEFAULT_RESIZE_BORDER,
            frame_margins: DEFAULT_FRAME_MARGINS,
            title_color: DEFAULT_TITLE_COLOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_from_channels_clamps_out_of_range_values() {
        let color = Rgb::from_channels(-4, 128, 300);
        assert_eq!(color, Rgb::new(0, 128, 255));
    }

    #[test]
    fn window_handle_displays_as_hex() {
        assert_eq!(WindowHandle::new(0x1a2b).to_string(), "0x1a2b");
        assert!(WindowHandle::new(0).is_null());
    }

    #[test]
    fn default_config_uses_five_pixel_resize_band() {
        let config = DecorationConfig::default();
        assert_eq!(config.resize_border, 5);
        assert_eq!(config.frame_margins, 1);
        assert_eq!(config.title_color, Rgb::new(255, 0, 0));
    }
}
