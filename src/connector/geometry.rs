//! Plain geometry in container coordinates (origin at the layout
//! container's top-left corner, y pointing down).

use serde::Serialize;

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Middle of the right edge; where outgoing connectors start.
    #[inline]
    pub fn right_middle(&self) -> Point {
        Point::new(self.right(), self.top + self.height / 2.0)
    }

    /// Middle of the left edge; where incoming connectors end.
    #[inline]
    pub fn left_middle(&self) -> Point {
        Point::new(self.left, self.top + self.height / 2.0)
    }

    /// Translate into the coordinate space whose origin is `origin`.
    pub fn relative_to(&self, origin: Point) -> Rect {
        Rect::new(self.left - origin.x, self.top - origin.y, self.width, self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right() && point.y >= self.top && point.y <= self.bottom()
    }

    /// Finite, non-negative size.
    pub fn is_valid(&self) -> bool {
        [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// Size of the scrollable content the overlay must cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
