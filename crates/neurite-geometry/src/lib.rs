//! Neurite geometry: the cubic Bezier path generator and everything derived from it.

pub mod curve;
pub mod horn;
pub mod path;
pub mod radius;
pub mod tessellate;

pub use curve::{CubicBezier, Curve};
pub use horn::derive_controls;
pub use path::{evaluate, CurvePath};
pub use radius::RadiusProfile;
