//! Geometric primitives: Point and axis selection.

use std::ops::{Add, AddAssign, Mul, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Replaces every non-finite component with zero.
    pub fn finite_or_zero(self) -> Self {
        Self {
            x: if self.x.is_finite() { self.x } else { 0.0 },
            y: if self.y.is_finite() { self.y } else { 0.0 },
        }
    }

    /// Largest absolute component.
    pub fn max_abs(self) -> f64 {
        self.x.abs().max(self.y.abs())
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Number of axes a tracker drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axes {
    /// Horizontal only; the y component is held at zero.
    One,
    #[default]
    Two,
}

impl Axes {
    /// Drops the y component in single-axis mode.
    pub fn constrain(self, point: Point) -> Point {
        match self {
            Axes::One => Point::new(point.x, 0.0),
            Axes::Two => point,
        }
    }

    /// Splits a point into the `(x, y?)` shape handed to update callbacks.
    pub fn split(self, point: Point) -> (f64, Option<f64>) {
        match self {
            Axes::One => (point.x, None),
            Axes::Two => (point.x, Some(point.y)),
        }
    }
}
