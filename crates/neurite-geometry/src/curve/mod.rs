//! Curve traits and implementations.

mod bezier;

use neurite_math::Point3;

pub use bezier::{bernstein_weights, CubicBezier};

/// Trait for parametric curves in 3D space.
pub trait Curve: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point3;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);
}
