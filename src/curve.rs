use crate::math_utils::{midpoint, quadratic_point};
use crate::models::{Config, PathShape};
use euclid::default::Point2D;

/// Quadratic Bezier path between two endpoints.
///
/// A straight path is the same curve with the control point on the chord's midpoint,
/// so every consumer goes through [`QuadraticCurve::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticCurve {
    pub p0: Point2D<f64>,
    pub p1: Point2D<f64>,
    pub p2: Point2D<f64>,
}

impl QuadraticCurve {
    pub fn new(p0: Point2D<f64>, p1: Point2D<f64>, p2: Point2D<f64>) -> Self {
        Self { p0, p1, p2 }
    }

    /// Horizontal path from `start` to `end` bulging `arc_height` pixels upwards.
    /// An `arc_height` of zero gives a straight line.
    pub fn arc(start: Point2D<f64>, end: Point2D<f64>, arc_height: f64) -> Self {
        let mid = midpoint(start, end);
        Self::new(start, Point2D::new(mid.x, start.y - arc_height), end)
    }

    pub fn from_config(config: &Config) -> Self {
        let start = Point2D::new(config.margin, config.line_y);
        let end = Point2D::new(config.width as f64 - config.margin, config.line_y);
        let arc_height = match config.path_shape {
            PathShape::Straight => 0.0,
            PathShape::Arc => config.arc_height,
        };
        Self::arc(start, end, arc_height)
    }

    /// Point at parameter `t` in [0, 1]; exact at both ends.
    pub fn evaluate(&self, t: f64) -> Point2D<f64> {
        let (x, y) = quadratic_point(
            self.p0.to_tuple(),
            self.p1.to_tuple(),
            self.p2.to_tuple(),
            t,
        );
        Point2D::new(x, y)
    }
}
