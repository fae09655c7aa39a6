//! Cubic Bezier segment.

use neurite_core::Result;
use neurite_math::Point3;
use serde::{Deserialize, Serialize};

use super::Curve;
use crate::horn::derive_controls;
use crate::path::CurvePath;

/// Bernstein basis weights `(a, b, c, d)` of a cubic Bezier at `t`.
///
/// `a = 1 - 3t + 3t^2 - t^3`, `b = 3(t - 2t^2 + t^3)`, `c = 3(t^2 - t^3)`, `d = t^3`.
pub fn bernstein_weights(t: f64) -> (f64, f64, f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let a = 1.0 - 3.0 * t + 3.0 * t2 - t3;
    let b = 3.0 * (t - 2.0 * t2 + t3);
    let c = 3.0 * (t2 - t3);
    (a, b, c, t3)
}

/// A cubic Bezier segment from `start` to `end`, parameterized over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub start: Point3,
    pub control1: Point3,
    pub control2: Point3,
    pub end: Point3,
}

impl CubicBezier {
    pub fn new(start: Point3, control1: Point3, control2: Point3, end: Point3) -> Self {
        Self {
            start,
            control1,
            control2,
            end,
        }
    }

    /// Segment bent into the "horn" shape used for axons and synapses.
    pub fn horn(start: Point3, end: Point3) -> Self {
        let (control1, control2) = derive_controls(start, end);
        Self::new(start, control1, control2, end)
    }

    /// Discretize into `segments + 2` points ending exactly at `end`.
    pub fn sample(&self, segments: usize) -> Result<CurvePath> {
        CurvePath::from_bezier(self, segments)
    }
}

impl Curve for CubicBezier {
    /// Bernstein blend taken relative to `start`, so `a` drops out and
    /// coincident control points reproduce `start` exactly.
    fn point_at(&self, t: f64) -> Point3 {
        let (_, b, c, d) = bernstein_weights(t);
        self.start
            + (self.control1 - self.start) * b
            + (self.control2 - self.start) * c
            + (self.end - self.start) * d
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurite_math::dvec3;

    #[test]
    fn test_weights_partition_unity() {
        for i in 0..=10 {
            let (a, b, c, d) = bernstein_weights(i as f64 / 10.0);
            assert!((a + b + c + d - 1.0).abs() < 1e-12);
        }
        assert_eq!(bernstein_weights(0.0), (1.0, 0.0, 0.0, 0.0));
        assert_eq!(bernstein_weights(1.0), (0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_endpoints_interpolate() {
        let curve = CubicBezier::new(
            dvec3(1.0, 2.0, 3.0),
            dvec3(5.0, -1.0, 0.0),
            dvec3(-2.0, 4.0, 1.0),
            dvec3(7.0, 7.0, 7.0),
        );
        assert!((curve.point_at(0.0) - curve.start).length() < 1e-12);
        assert!((curve.point_at(1.0) - curve.end).length() < 1e-12);
    }

    #[test]
    fn test_matches_weighted_sum() {
        let curve = CubicBezier::horn(dvec3(0.0, 0.0, 0.0), dvec3(20.0, 0.0, 20.0));
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let (a, b, c, d) = bernstein_weights(t);
            let sum = curve.start * a + curve.control1 * b + curve.control2 * c + curve.end * d;
            assert!((curve.point_at(t) - sum).length() < 1e-12, "t={}", t);
        }
    }

    #[test]
    fn test_coincident_points_are_exact() {
        let p = dvec3(4.0, 4.0, 4.0);
        let curve = CubicBezier::horn(p, p);
        for i in 0..=50 {
            assert_eq!(curve.point_at(i as f64 / 50.0), p);
        }
        assert_eq!(CubicBezier::horn(p, Point3::ZERO).point_at(0.0), p);
    }
}
