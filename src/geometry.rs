// Plain 2D value types shared by the placement engine. Everything here is
// exact arithmetic; no tolerance is applied anywhere.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
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

impl Mul<Point> for f64 {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        rhs * self
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

/// Axis-aligned rectangle stored as two corners, `(x1, y1)` lower-left and
/// `(x2, y2)` upper-right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Rect {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Rectangle of the given offsets placed relative to `anchor`.
    pub fn from_offsets(anchor: Point, offsets: &Rect) -> Self {
        *offsets + anchor
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5)
    }

    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }

    /// Closed-interval intersection test on both axes. Rectangles that only
    /// share an edge or a corner are reported as overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }

    /// True when `self` lies within `outer` (edges included).
    pub fn contained_in(&self, outer: &Rect) -> bool {
        self.x1 >= outer.x1 && self.x2 <= outer.x2 && self.y1 >= outer.y1 && self.y2 <= outer.y2
    }
}

impl Add<Point> for Rect {
    type Output = Rect;

    fn add(self, p: Point) -> Rect {
        Rect::new(self.x1 + p.x, self.y1 + p.y, self.x2 + p.x, self.y2 + p.y)
    }
}

impl AddAssign<Point> for Rect {
    fn add_assign(&mut self, p: Point) {
        *self = *self + p;
    }
}

pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    b.x1 <= a.x2 && b.y1 <= a.y2 && b.x2 >= a.x1 && b.y2 >= a.y1
}
