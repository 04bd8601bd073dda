use crate::geometry::{Point, Rect};
use std::f64::consts::TAU;

/// Search-radius ceiling for a canvas: `width² + height² / eccentricity²`.
///
/// The same value also scales the per-step radius increment, so larger
/// canvases take proportionally larger steps.
pub fn radius_ceiling(canvas: &Rect, eccentricity: f64) -> f64 {
    let w = canvas.x2 - canvas.x1;
    let h = canvas.y2 - canvas.y1;
    w * w + h * h / (eccentricity * eccentricity)
}

/// Radius ceiling in canvas units: [`radius_ceiling`] divided by the canvas
/// width.
///
/// The raw ceiling mixes squared and linear units, so on its own it only
/// behaves for a canvas about one unit wide. Dividing by the width gives the
/// same spiral as the raw formula on a unit-wide canvas and keeps the number
/// of steps and their relative size independent of the coordinate scale.
/// A canvas without positive width has nothing to search.
pub fn search_ceiling(canvas: &Rect, eccentricity: f64) -> f64 {
    let w = canvas.x2 - canvas.x1;
    if !(w > 0.0) {
        return 0.0;
    }
    radius_ceiling(canvas, eccentricity) / w
}

/// Expanding elliptical spiral of candidate offsets around an anchor.
///
/// The first displacement is always `(0, 0)`. Each [`Spiral::advance`]
/// rotates by `angle_step` turns and grows the radius by
/// `ceiling * radius_step * angle_step`; the y component is compressed by
/// `eccentricity`.
#[derive(Debug, Clone)]
pub struct Spiral {
    theta: f64,
    radius: f64,
    ceiling: f64,
    eccentricity: f64,
    angle_increment: f64,
    radius_increment: f64,
    displacement: Point,
}

impl Spiral {
    pub fn new(
        theta: f64,
        ceiling: f64,
        eccentricity: f64,
        radius_step: f64,
        angle_step: f64,
    ) -> Self {
        Self {
            theta,
            radius: 0.0,
            ceiling,
            eccentricity,
            angle_increment: angle_step * TAU,
            radius_increment: ceiling * radius_step * angle_step,
            displacement: Point::ZERO,
        }
    }

    pub fn displacement(&self) -> Point {
        self.displacement
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// True once the radius has reached the ceiling. A NaN radius also counts
    /// as exhausted so a degenerate canvas cannot loop forever.
    pub fn exhausted(&self) -> bool {
        !(self.radius < self.ceiling)
    }

    pub fn advance(&mut self) {
        self.theta += self.angle_increment;
        self.radius += self.radius_increment;
        self.displacement = Point::new(
            self.radius * self.theta.cos(),
            self.radius * self.theta.sin() * self.eccentricity,
        );
    }
}
