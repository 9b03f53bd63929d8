/*
 * Screen-space geometry used by hit-testing and maximize handling. Kept free
 * of Win32 types so the arithmetic can be unit tested off-Windows; the
 * Windows backend converts to and from `RECT`/`POINT` at the boundary.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Edge-exclusive rectangle (`right`/`bottom` lie just outside), like `RECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

/// Maximized size and position reported in response to a min/max-info query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaximizedBounds {
    pub size: Point,
    pub position: Point,
}

/*
 * Computes maximize geometry for a borderless window. The size comes from the
 * work area of the monitor nearest the window while the position comes from
 * the primary monitor's work area. The OS rescales `ptMaxPosition` relative to
 * the target monitor, which is why the primary origin is the right input when
 * monitors differ in resolution or taskbar placement.
 */
pub fn maximized_bounds(nearest_work_area: Rect, primary_work_area: Rect) -> MaximizedBounds {
    MaximizedBounds {
        size: Point::new(nearest_work_area.width(), nearest_work_area.height()),
        position: primary_work_area.origin(),
    }
}
