/*
 * Decides what the decoration dispatcher does with each window message. The
 * Windows backend decodes raw `(msg, wparam, lparam)` triples into
 * `WindowMessage`, asks `route_message` for a `Disposition` while holding the
 * registry lock, then releases the lock and carries the disposition out
 * against the OS. Keeping the decision pure makes the per-message behavior
 * (including the drag-time paint suppression) testable without a window.
 */

use crate::geometry::{Point, Rect};
use crate::hit_test::{HitZone, hit_test};
use crate::window_state::DecoratedWindow;
use log::trace;

/// Message categories the dispatcher cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMessage {
    NcActivate,
    /// `calc_valid_rects` mirrors `wParam == TRUE` of `WM_NCCALCSIZE`.
    NcCalcSize { calc_valid_rects: bool },
    GetMinMaxInfo,
    NcHitTest { cursor: Point, window: Rect },
    EnterSizeMove,
    Move,
    ExitSizeMove,
    Paint,
    EraseBackground,
    Other,
}

/// What the dispatcher must do after routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Return this value without calling the previous procedure.
    Return(isize),
    /// If maximized, clamp the proposed client rect to the monitor work area; return 0.
    FitMaximizedClientArea,
    /// Fill max size/position from the monitor work areas; return 0.
    ReportMaximizedBounds,
    /// Report this zone as the hit-test result.
    HitTest(HitZone),
    /// Optionally fill the client rect; return TRUE if `handled`, otherwise forward.
    Background { fill: bool, handled: bool },
    /// Hand the message to the previous procedure unchanged.
    Forward,
}

const TRUE_RESULT: isize = 1;

pub fn route_message<P: Copy, B>(
    window: &mut DecoratedWindow<P, B>,
    message: WindowMessage,
    resize_border: i32,
) -> Disposition {
    match message {
        WindowMessage::NcActivate => Disposition::Return(TRUE_RESULT),
        WindowMessage::NcCalcSize {
            calc_valid_rects: true,
        } => Disposition::FitMaximizedClientArea,
        WindowMessage::NcCalcSize {
            calc_valid_rects: false,
        } => Disposition::Forward,
        WindowMessage::GetMinMaxInfo => Disposition::ReportMaximizedBounds,
        WindowMessage::NcHitTest {
            cursor,
            window: rect,
        } => {
            let zone = hit_test(cursor, rect, &window.hit_test_params(resize_border));
            trace!("[Router] hit test at ({}, {}) -> {zone:?}", cursor.x, cursor.y);
            Disposition::HitTest(zone)
        }
        WindowMessage::EnterSizeMove => {
            window.drag_mut().enter_size_move();
            Disposition::Forward
        }
        WindowMessage::Move => {
            window.drag_mut().moved();
            Disposition::Forward
        }
        WindowMessage::ExitSizeMove => {
            window.drag_mut().exit_size_move();
            Disposition::Forward
        }
        WindowMessage::Paint | WindowMessage::EraseBackground if window.has_background() => {
            let fill = !window.drag().is_moving();
            if !fill {
                trace!("[Router] background fill suppressed while moving");
            }
            Disposition::Background {
                fill,
                handled: message == WindowMessage::EraseBackground,
            }
        }
        _ => Disposition::Forward,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CaptionInsets;

    fn window_with_background() -> DecoratedWindow<usize, u32> {
        let mut window = DecoratedWindow::new(0x10, false);
        window.replace_background(0x00ff_0000);
        window
    }

    #[test]
    fn nc_activate_is_swallowed() {
        let mut window: DecoratedWindow<usize, u32> = DecoratedWindow::new(0x10, false);
        assert_eq!(
            route_message(&mut window, WindowMessage::NcActivate, 5),
            Disposition::Return(1)
        );
    }

    #[test]
    fn nc_calc_size_only_adjusts_when_valid_rects_requested() {
        let mut window: DecoratedWindow<usize, u32> = DecoratedWindow::new(0x10, false);
        assert_eq!(
            route_message(
                &mut window,
                WindowMessage::NcCalcSize {
                    calc_valid_rects: true
                },
                5
            ),
            Disposition::FitMaximizedClientArea
        );
        assert_eq!(
            route_message(
                &mut window,
                WindowMessage::NcCalcSize {
                    calc_valid_rects: false
                },
                5
            ),
            Disposition::Forward
        );
    }

    #[test]
    fn hit_test_uses_entry_caption_and_resizability() {
        // Arrange
        let mut window: DecoratedWindow<usize, u32> = DecoratedWindow::new(0x10, false);
        window.set_caption(CaptionInsets::new(0, 0, 30));
        window.set_resizable(false);
        let message = WindowMessage::NcHitTest {
            cursor: Point::new(100, 2),
            window: Rect::new(0, 0, 200, 100),
        };
        // Act
        let disposition = route_message(&mut window, message, 5);
        // Assert
        assert_eq!(disposition, Disposition::HitTest(HitZone::Caption));
    }

    #[test]
    fn paint_without_background_is_forwarded() {
        let mut window: DecoratedWindow<usize, u32> = DecoratedWindow::new(0x10, false);
        assert_eq!(
            route_message(&mut window, WindowMessage::Paint, 5),
            Disposition::Forward
        );
        assert_eq!(
            route_message(&mut window, WindowMessage::EraseBackground, 5),
            Disposition::Forward
        );
    }

    #[test]
    fn paint_fill_is_suppressed_while_moving_and_resumes_after() {
        let mut window = window_with_background();

        route_message(&mut window, WindowMessage::EnterSizeMove, 5);
        route_message(&mut window, WindowMessage::Move, 5);
        assert_eq!(
            route_message(&mut window, WindowMessage::Paint, 5),
            Disposition::Background {
                fill: false,
                handled: false
            }
        );

        route_message(&mut window, WindowMessage::ExitSizeMove, 5);
        assert_eq!(
            route_message(&mut window, WindowMessage::Paint, 5),
            Disposition::Background {
                fill: true,
                handled: false
            }
        );
    }

    #[test]
    fn erase_background_is_always_handled_when_brush_is_set() {
        let mut window = window_with_background();
        assert_eq!(
            route_message(&mut window, WindowMessage::EraseBackground, 5),
            Disposition::Background {
                fill: true,
                handled: true
            }
        );

        route_message(&mut window, WindowMessage::EnterSizeMove, 5);
        route_message(&mut window, WindowMessage::Move, 5);
        assert_eq!(
            route_message(&mut window, WindowMessage::EraseBackground, 5),
            Disposition::Background {
                fill: false,
                handled: true
            }
        );
    }

    #[test]
    fn enter_size_move_alone_does_not_suppress_paint() {
        let mut window = window_with_background();
        route_message(&mut window, WindowMessage::EnterSizeMove, 5);
        assert_eq!(
            route_message(&mut window, WindowMessage::Paint, 5),
            Disposition::Background {
                fill: true,
                handled: false
            }
        );
    }
}
