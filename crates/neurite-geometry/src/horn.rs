//! "Horn" control-point derivation.
//!
//! Both control points are offsets from `start` built from permuted, partly
//! negated components of `end - start`. The permutation bends every segment
//! out of its chord with the same rotational sense and a secondary twist, so
//! a tube needs only its two endpoints. The coefficients are part of the look
//! and must not be tuned.

use neurite_math::{Point3, Vector3};

/// Derive `(control1, control2)` for the horn-shaped segment `start -> end`.
pub fn derive_controls(start: Point3, end: Point3) -> (Point3, Point3) {
    let diff = end - start;
    let control1 = start
        + Vector3::new(
            2.0 * diff.y / 3.0,
            -2.0 * diff.x / 3.0,
            2.0 * diff.z / 3.0,
        );
    let control2 = start
        + Vector3::new(
            3.0 * diff.x / 4.0,
            -3.0 * diff.z / 4.0,
            3.0 * diff.y / 4.0,
        );
    (control1, control2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use neurite_math::dvec3;

    #[test]
    fn test_known_controls() {
        let (c1, c2) = derive_controls(dvec3(0.0, 0.0, 0.0), dvec3(20.0, 0.0, 20.0));
        assert_relative_eq!(c1.x, 0.0);
        assert_relative_eq!(c1.y, -40.0 / 3.0);
        assert_relative_eq!(c1.z, 40.0 / 3.0);
        assert_relative_eq!(c2.x, 15.0);
        assert_relative_eq!(c2.y, -15.0);
        assert_relative_eq!(c2.z, 0.0);
    }

    #[test]
    fn test_offsets_are_relative_to_start() {
        let start = dvec3(20.0, 0.0, 20.0);
        let end = dvec3(30.0, 10.0, 20.0);
        let (c1, c2) = derive_controls(start, end);
        // diff = (10, 10, 0)
        assert_relative_eq!(c1.x, 20.0 + 20.0 / 3.0);
        assert_relative_eq!(c1.y, -20.0 / 3.0);
        assert_relative_eq!(c1.z, 20.0);
        assert_relative_eq!(c2.x, 27.5);
        assert_relative_eq!(c2.y, 0.0);
        assert_relative_eq!(c2.z, 27.5);
    }

    #[test]
    fn test_deterministic() {
        let start = dvec3(-20.0, 0.0, -20.0);
        let end = dvec3(-30.0, -10.0, -20.0);
        assert_eq!(derive_controls(start, end), derive_controls(start, end));
    }

    #[test]
    fn test_coincident_points_collapse() {
        let p = dvec3(1.5, -2.0, 4.0);
        assert_eq!(derive_controls(p, p), (p, p));
    }
}
