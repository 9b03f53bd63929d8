/*
 * Per-window state kept for every decorated window. The entry is created by
 * install, mutated by host calls and by drag transitions observed in the
 * dispatcher, and dropped by uninstall. Dropping it drops the background
 * brush, which releases the underlying OS resource.
 */

use crate::hit_test::HitTestParams;
use crate::types::CaptionInsets;

/*
 * Tracks whether the window is being dragged by the user. `in_move_mode` is
 * set for the whole modal size/move loop; `moving` only once a move has
 * actually been observed inside it. Background fills are skipped while
 * `moving` is set to avoid flicker.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveTracker {
    in_move_mode: bool,
    moving: bool,
}

impl MoveTracker {
    pub fn enter_size_move(&mut self) {
        self.in_move_mode = true;
    }

    pub fn moved(&mut self) {
        self.moving = self.in_move_mode;
    }

    pub fn exit_size_move(&mut self) {
        self.in_move_mode = false;
        self.moving = false;
    }

    #[cfg(test)]
    pub(crate) fn is_in_move_mode(&self) -> bool {
        self.in_move_mode
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }
}

/// Registry entry for one decorated window.
///
/// `P` is the captured previous window procedure, `B` the background brush.
#[derive(Debug)]
pub struct DecoratedWindow<P, B> {
    previous_procedure: P,
    is_popup: bool,
    resizable: bool,
    caption: CaptionInsets,
    background: Option<B>,
    drag: MoveTracker,
}

impl<P: Copy, B> DecoratedWindow<P, B> {
    pub fn new(previous_procedure: P, is_popup: bool) -> Self {
        Self {
            previous_procedure,
            is_popup,
            resizable: true,
            caption: CaptionInsets::default(),
            background: None,
            drag: MoveTracker::default(),
        }
    }

    pub fn previous_procedure(&self) -> P {
        self.previous_procedure
    }

    #[cfg(test)]
    pub(crate) fn is_popup(&self) -> bool {
        self.is_popup
    }

    #[cfg(test)]
    pub(crate) fn resizable(&self) -> bool {
        self.resizable
    }

    pub fn set_resizable(&mut self, resizable: bool) {
        self.resizable = resizable;
    }

    #[cfg(test)]
    pub(crate) fn caption(&self) -> CaptionInsets {
        self.caption
    }

    pub fn set_caption(&mut self, caption: CaptionInsets) {
        self.caption = caption;
    }

    pub fn background(&self) -> Option<&B> {
        self.background.as_ref()
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// Installs a new brush, returning the previous one so the caller decides when it is released.
    pub fn replace_background(&mut self, brush: B) -> Option<B> {
        self.background.replace(brush)
    }

    pub fn drag(&self) -> &MoveTracker {
        &self.drag
    }

    pub fn drag_mut(&mut self) -> &mut MoveTracker {
        &mut self.drag
    }

    pub fn hit_test_params(&self, resize_border: i32) -> HitTestParams {
        HitTestParams {
            is_popup: self.is_popup,
            resizable: self.resizable,
            caption: self.caption,
            resize_border,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_uses_documented_defaults() {
        let entry: DecoratedWindow<usize, ()> = DecoratedWindow::new(0x4000, false);
        assert!(entry.resizable());
        assert!(!entry.is_popup());
        assert_eq!(entry.caption(), CaptionInsets::new(0, 0, 0));
        assert!(!entry.has_background());
        assert_eq!(entry.previous_procedure(), 0x4000);
        assert!(!entry.drag().is_moving());
    }

    #[test]
    fn move_is_only_tracked_inside_size_move_loop() {
        let mut drag = MoveTracker::default();

        // A programmatic move outside the modal loop is not a drag.
        drag.moved();
        assert!(!drag.is_moving());

        drag.enter_size_move();
        assert!(drag.is_in_move_mode());
        assert!(!drag.is_moving());

        drag.moved();
        assert!(drag.is_moving());

        drag.exit_size_move();
        assert!(!drag.is_moving());
        assert!(!drag.is_in_move_mode());
    }

    #[test]
    fn replace_background_hands_back_previous_brush() {
        let mut entry: DecoratedWindow<usize, &str> = DecoratedWindow::new(1, false);
        assert_eq!(entry.replace_background("first"), None);
        assert_eq!(entry.replace_background("second"), Some("first"));
        assert_eq!(entry.background(), Some(&"second"));
    }
}
