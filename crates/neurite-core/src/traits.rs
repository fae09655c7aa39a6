use crate::error::Result;

/// Check the invariants of a generated path, mesh or configuration before use.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Axis-aligned extent of a point set, `None` when the set is empty.
pub trait BoundingBox {
    type Point;
    fn bounds(&self) -> Option<(Self::Point, Self::Point)>;
}
