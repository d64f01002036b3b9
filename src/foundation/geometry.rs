use std::ops::{Add, Div, Mul, Sub};

use crate::foundation::error::{DrawingError, DrawingResult};

/// Integer pixel coordinate.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(
            self.x.saturating_add(rhs.x),
            self.y.saturating_add(rhs.y),
        )
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(
            self.x.saturating_sub(rhs.x),
            self.y.saturating_sub(rhs.y),
        )
    }
}

impl Add<Size> for Point {
    type Output = Point;

    fn add(self, rhs: Size) -> Point {
        Point::new(
            self.x.saturating_add_unsigned(rhs.width),
            self.y.saturating_add_unsigned(rhs.height),
        )
    }
}

impl Sub<Size> for Point {
    type Output = Point;

    fn sub(self, rhs: Size) -> Point {
        Point::new(
            self.x.saturating_sub_unsigned(rhs.width),
            self.y.saturating_sub_unsigned(rhs.height),
        )
    }
}

impl From<Point> for kurbo::Point {
    fn from(p: Point) -> Self {
        kurbo::Point::new(f64::from(p.x), f64::from(p.y))
    }
}

/// Pixel extent. Dimensions are never negative.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Zero extent.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Create a size from signed dimensions, rejecting negative values.
    pub fn new(width: i32, height: i32) -> DrawingResult<Self> {
        let w = u32::try_from(width).map_err(|_| {
            DrawingError::invalid_dimensions(format!("width must be >= 0, got {width}"))
        })?;
        let h = u32::try_from(height).map_err(|_| {
            DrawingError::invalid_dimensions(format!("height must be >= 0, got {height}"))
        })?;
        Ok(Self::from_unsigned(w, h))
    }

    /// Create a size from unsigned dimensions.
    pub const fn from_unsigned(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered.
    pub fn area(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// `true` when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::from_unsigned(
            self.width.saturating_add(rhs.width),
            self.height.saturating_add(rhs.height),
        )
    }
}

/// Saturates at zero rather than producing a negative extent.
impl Sub for Size {
    type Output = Size;

    fn sub(self, rhs: Size) -> Size {
        Size::from_unsigned(
            self.width.saturating_sub(rhs.width),
            self.height.saturating_sub(rhs.height),
        )
    }
}

impl Mul<u32> for Size {
    type Output = Size;

    fn mul(self, rhs: u32) -> Size {
        Size::from_unsigned(
            self.width.saturating_mul(rhs),
            self.height.saturating_mul(rhs),
        )
    }
}

/// Division by zero yields [`Size::ZERO`].
impl Div<u32> for Size {
    type Output = Size;

    fn div(self, rhs: u32) -> Size {
        match (self.width.checked_div(rhs), self.height.checked_div(rhs)) {
            (Some(w), Some(h)) => Size::from_unsigned(w, h),
            _ => Size::ZERO,
        }
    }
}

/// Axis-aligned integer rectangle anchored at its top-left corner.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rectangle {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rectangle {
    /// Create a rectangle.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from its top-left corner and extent.
    pub const fn from_point_size(point: Point, size: Size) -> Self {
        Self::new(point.x, point.y, size.width, size.height)
    }

    /// Create a rectangle from edge coordinates; `right < left` or `bottom < top` is rejected.
    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> DrawingResult<Self> {
        let width = right
            .checked_sub(left)
            .and_then(|w| u32::try_from(w).ok())
            .ok_or_else(|| {
                DrawingError::invalid_dimensions(format!("right ({right}) < left ({left})"))
            })?;
        let height = bottom
            .checked_sub(top)
            .and_then(|h| u32::try_from(h).ok())
            .ok_or_else(|| {
                DrawingError::invalid_dimensions(format!("bottom ({bottom}) < top ({top})"))
            })?;
        Ok(Self::new(left, top, width, height))
    }

    /// Top edge (inclusive).
    pub fn top(self) -> i32 {
        self.y
    }

    /// Bottom edge (exclusive).
    pub fn bottom(self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    /// Left edge (inclusive).
    pub fn left(self) -> i32 {
        self.x
    }

    /// Right edge (exclusive).
    pub fn right(self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    /// Top-left corner.
    pub fn top_left(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bottom-right corner (exclusive).
    pub fn bottom_right(self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Same as [`Rectangle::top_left`].
    pub fn point(self) -> Point {
        self.top_left()
    }

    /// Extent of the rectangle.
    pub fn size(self) -> Size {
        Size::from_unsigned(self.width, self.height)
    }

    /// `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.size().is_empty()
    }

    /// Grow by `dx` on the left and right, `dy` on top and bottom. Negative amounts shrink,
    /// saturating at an empty rectangle.
    pub fn inflate(self, dx: i32, dy: i32) -> Self {
        let grow = |extent: u32, d: i32| -> u32 {
            let total = i64::from(extent) + 2 * i64::from(d);
            total.clamp(0, i64::from(u32::MAX)) as u32
        };
        Self::new(
            self.x.saturating_sub(dx),
            self.y.saturating_sub(dy),
            grow(self.width, dx),
            grow(self.height, dy),
        )
    }

    /// Overlapping area of two rectangles, `None` when they are disjoint.
    pub fn intersect(self, other: Rectangle) -> Option<Rectangle> {
        let x1 = self.left().max(other.left());
        let x2 = self.right().min(other.right());
        let y1 = self.top().max(other.top());
        let y2 = self.bottom().min(other.bottom());
        if x2 > x1 && y2 > y1 {
            Rectangle::from_ltrb(x1, y1, x2, y2).ok()
        } else {
            None
        }
    }

    /// Smallest rectangle covering both inputs.
    pub fn union(self, other: Rectangle) -> Rectangle {
        let x1 = self.left().min(other.left());
        let x2 = self.right().max(other.right());
        let y1 = self.top().min(other.top());
        let y2 = self.bottom().max(other.bottom());
        Rectangle::new(x1, y1, x2.abs_diff(x1), y2.abs_diff(y1))
    }

    /// `true` when `p` lies inside the half-open area.
    pub fn contains_point(self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// `true` when `other` lies entirely inside `self`.
    pub fn contains_rect(self, other: Rectangle) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }
}

impl Add<Point> for Rectangle {
    type Output = Rectangle;

    fn add(self, rhs: Point) -> Rectangle {
        Rectangle::from_point_size(self.point() + rhs, self.size())
    }
}

impl Sub<Point> for Rectangle {
    type Output = Rectangle;

    fn sub(self, rhs: Point) -> Rectangle {
        Rectangle::from_point_size(self.point() - rhs, self.size())
    }
}

impl Add<Size> for Rectangle {
    type Output = Rectangle;

    fn add(self, rhs: Size) -> Rectangle {
        Rectangle::from_point_size(self.point(), self.size() + rhs)
    }
}

impl Sub<Size> for Rectangle {
    type Output = Rectangle;

    fn sub(self, rhs: Size) -> Rectangle {
        Rectangle::from_point_size(self.point(), self.size() - rhs)
    }
}

impl From<Rectangle> for kurbo::Rect {
    fn from(r: Rectangle) -> Self {
        kurbo::Rect::new(
            f64::from(r.left()),
            f64::from(r.top()),
            f64::from(r.right()),
            f64::from(r.bottom()),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geometry.rs"]
mod tests;
