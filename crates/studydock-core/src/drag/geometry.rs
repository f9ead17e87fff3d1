use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Viewport-relative coordinates, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero, negative or non-finite in either dimension.
    pub fn is_degenerate(&self) -> bool {
        !self.width.is_finite() || !self.height.is_finite() || self.width <= 0.0 || self.height <= 0.0
    }
}

/// Clamp one coordinate to `[0, viewport - widget]`.
///
/// When the widget does not fit (or the viewport is degenerate) the range
/// collapses to `0`.
pub fn clamp_axis(value: f64, viewport: f64, widget: f64) -> f64 {
    let max = viewport - widget;
    if value.is_nan() || max.is_nan() || max <= 0.0 {
        return 0.0;
    }
    value.clamp(0.0, max)
}

pub fn clamp_position(position: Point, widget: Size, viewport: Size) -> Point {
    Point::new(
        clamp_axis(position.x, viewport.width, widget.width),
        clamp_axis(position.y, viewport.height, widget.height),
    )
}

/// A widget's size as far as layout has told us.
///
/// Before the first measurement clamping uses a conservative per-widget
/// fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementSize {
    measured: Option<Size>,
    fallback: Size,
}

impl ElementSize {
    pub fn unmeasured(fallback: Size) -> Self {
        Self {
            measured: None,
            fallback,
        }
    }

    /// Record a layout measurement. Degenerate sizes are ignored.
    /// Returns whether the effective size changed.
    pub fn measure(&mut self, size: Size) -> bool {
        if size.is_degenerate() {
            tracing::debug!(?size, "ignoring unusable element measurement");
            return false;
        }
        let before = self.effective();
        self.measured = Some(size);
        before != size
    }

    pub fn effective(&self) -> Size {
        self.measured.unwrap_or(self.fallback)
    }
}
