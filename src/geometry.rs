//! Box math shared by the hover search and toolbox placement.
//!
//! Rectangles come in two flavours: `ClientRect` is relative to the visible
//! viewport and fractional (what a layout pass produces), `BoundingBox` is
//! page-absolute and integer (what the comparisons run on).

/// Viewport-relative rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether a viewport point falls inside the rectangle (edges inclusive)
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// How far the page is scrolled
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// Page-absolute box; (x1, y1) is the upper left corner, (x2, y2) the lower right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

/// Signed distances of an inner box from each edge of an outer box.
/// Negative when the inner box sticks out past that edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelativeOffsets {
    pub from_top: i64,
    pub from_left: i64,
    pub from_right: i64,
    pub from_bottom: i64,
}

/// Pointer position translated into an element's local box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorPosition {
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

/// A pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    pub fn at(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// Page-absolute box of a rendered rectangle, floor-rounded.
pub fn bounding_box(rect: ClientRect, scroll: ScrollOffset) -> BoundingBox {
    BoundingBox {
        x1: (rect.left + scroll.x).floor() as i64,
        y1: (rect.top + scroll.y).floor() as i64,
        x2: (rect.right() + scroll.x).floor() as i64,
        y2: (rect.bottom() + scroll.y).floor() as i64,
    }
}

pub fn relative_offsets(outer: &BoundingBox, inner: &BoundingBox) -> RelativeOffsets {
    RelativeOffsets {
        from_top: inner.y1 - outer.y1,
        from_left: inner.x1 - outer.x1,
        from_right: outer.x2 - inner.x2,
        from_bottom: outer.y2 - inner.y2,
    }
}

pub fn cursor_relative_to(rect: ClientRect, pointer: PointerEvent) -> CursorPosition {
    CursorPosition {
        width: rect.width,
        height: rect.height,
        x: pointer.client_x - rect.left,
        y: pointer.client_y - rect.top,
    }
}
