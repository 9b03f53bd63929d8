/*
 * Native window-decoration bridge for undecorated toolkit windows. On Windows
 * it subclasses the window procedure to provide custom hit-testing, maximize
 * geometry and background fill for a frameless window; on macOS it extends
 * content under a transparent title bar. The host runtime drives everything
 * through the flat C ABI in `ffi`.
 *
 * Routing and hit-testing are platform-agnostic and live outside the
 * per-platform modules so they compile and test on every host.
 */
#[cfg(target_os = "macos")]
pub mod decor_macos;
#[cfg(target_os = "windows")]
pub mod decor_windows;
pub mod error;
pub mod ffi;
pub mod geometry;
pub mod message_router;
pub mod registry;
pub mod types;
pub mod window_state;

pub use error::{DecorationError, Result as DecorationResult};
pub use geometry::{MaximizedBounds, Point, Rect};
pub use hit_test::{HitTestParams, HitZone, hit_test};
pub use message_router::{Disposition, WindowMessage, route_message};
pub use registry::{BackgroundBrush, DecorationRegistry, DispatchPlan, WindowSystem};
pub use types::{CaptionInsets, DecorationConfig, Rgb, WindowHandle};
pub use window_state::{DecoratedWindow, MoveTracker};
