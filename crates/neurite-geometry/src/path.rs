//! Discretized curve paths.

use std::ops::Index;

use neurite_core::traits::{BoundingBox, Validate};
use neurite_core::{NeuriteError, Result};
use neurite_math::{Aabb3, Point3};
use serde::{Deserialize, Serialize};

use crate::curve::CubicBezier;
use crate::tessellate::sample_uniform;

/// An immutable polyline sampled from a curve.
///
/// Paths built from a Bezier hold `segments + 1` samples followed by the exact
/// end point once more, so the last element never carries rounding error from
/// the final blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point3>", into = "Vec<Point3>")]
pub struct CurvePath {
    points: Vec<Point3>,
}

/// Sample the cubic Bezier `(start, control1, control2, end)` into a [`CurvePath`].
///
/// Fails only when `segments` is zero; coincident or degenerate control points
/// produce a valid path of repeated points.
pub fn evaluate(
    start: Point3,
    control1: Point3,
    control2: Point3,
    end: Point3,
    segments: usize,
) -> Result<CurvePath> {
    CurvePath::from_bezier(&CubicBezier::new(start, control1, control2, end), segments)
}

impl CurvePath {
    pub fn from_bezier(curve: &CubicBezier, segments: usize) -> Result<Self> {
        if segments == 0 {
            return Err(NeuriteError::Geometry(
                "cubic Bezier needs at least one segment".into(),
            ));
        }
        let mut points = sample_uniform(curve, segments);
        points.push(curve.end);
        Ok(Self { points })
    }

    /// Wrap an arbitrary polyline. At least two points are required.
    pub fn from_points(points: Vec<Point3>) -> Result<Self> {
        let path = Self { points };
        path.validate()?;
        Ok(path)
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed path; present for slice-like symmetry.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Point3> {
        self.points.get(index).copied()
    }

    pub fn first(&self) -> Point3 {
        self.points[0]
    }

    pub fn last(&self) -> Point3 {
        self.points[self.points.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3> + '_ {
        self.points.iter()
    }

    /// Cumulative arc length at each sample, starting at 0.
    pub fn cumulative_distances(&self) -> Vec<f64> {
        let mut total = 0.0;
        let mut distances = Vec::with_capacity(self.points.len());
        distances.push(0.0);
        for pair in self.points.windows(2) {
            total += (pair[1] - pair[0]).length();
            distances.push(total);
        }
        distances
    }

    pub fn arc_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).length())
            .sum()
    }
}

impl Index<usize> for CurvePath {
    type Output = Point3;

    fn index(&self, index: usize) -> &Point3 {
        &self.points[index]
    }
}

impl Validate for CurvePath {
    fn validate(&self) -> Result<()> {
        if self.points.len() < 2 {
            return Err(NeuriteError::Geometry(format!(
                "path needs at least 2 points, got {}",
                self.points.len()
            )));
        }
        if let Some(i) = self.points.iter().position(|p| !p.is_finite()) {
            return Err(NeuriteError::Geometry(format!(
                "path point {} is not finite",
                i
            )));
        }
        Ok(())
    }
}

impl BoundingBox for CurvePath {
    type Point = Point3;

    fn bounds(&self) -> Option<(Point3, Point3)> {
        Aabb3::from_points(&self.points).map(|aabb| (aabb.min, aabb.max))
    }
}

impl TryFrom<Vec<Point3>> for CurvePath {
    type Error = NeuriteError;

    fn try_from(points: Vec<Point3>) -> Result<Self> {
        Self::from_points(points)
    }
}

impl From<CurvePath> for Vec<Point3> {
    fn from(path: CurvePath) -> Self {
        path.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::horn::derive_controls;
    use crate::tessellate::max_chord_deviation;
    use neurite_math::{dvec3, DVec3};

    #[test]
    fn test_collinear_end_to_end() {
        let path = evaluate(
            dvec3(0.0, 0.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
            dvec3(2.0, 0.0, 0.0),
            dvec3(3.0, 0.0, 0.0),
            3,
        )
        .unwrap();

        assert_eq!(path.len(), 5);
        let expected = [0.0, 1.0, 2.0, 3.0];
        for (p, x) in path.iter().zip(expected) {
            assert!((p.x - x).abs() < 1e-12, "expected x={}, got {:?}", x, p);
            assert_eq!(p.y, 0.0);
            assert_eq!(p.z, 0.0);
        }
        assert_eq!(path.last(), dvec3(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_length_and_exact_end() {
        let start = dvec3(-20.0, 55.0, 40.0);
        let end = dvec3(-100.0, -40.0, 100.0);
        for segments in [1, 2, 7, 50, 500] {
            let path = evaluate(
                start,
                dvec3(-30.0, 80.0, 20.0),
                dvec3(30.0, -80.0, 20.0),
                end,
                segments,
            )
            .unwrap();
            assert_eq!(path.len(), segments + 2);
            assert!((path.first() - start).length() < 1e-12);
            assert_eq!(path.last(), end);
        }
    }

    #[test]
    fn test_collinear_controls_stay_on_segment() {
        let start = dvec3(1.0, -2.0, 3.0);
        let end = dvec3(7.0, 4.0, -3.0);
        let diff = end - start;
        let path = evaluate(start, start + diff / 3.0, start + diff * (2.0 / 3.0), end, 40).unwrap();
        assert!(max_chord_deviation(path.points()) < 1e-9);
    }

    #[test]
    fn test_horn_path_bends() {
        let start = DVec3::ZERO;
        let end = dvec3(20.0, 0.0, 20.0);
        let (c1, c2) = derive_controls(start, end);
        let path = evaluate(start, c1, c2, end, 50).unwrap();
        assert!(max_chord_deviation(path.points()) > 1.0);
    }

    #[test]
    fn test_degenerate_points() {
        let p = dvec3(4.0, 4.0, 4.0);
        let path = evaluate(p, p, p, p, 10).unwrap();
        assert_eq!(path.len(), 12);
        assert!(path.iter().all(|q| *q == p));
        assert_eq!(path.arc_length(), 0.0);
    }

    #[test]
    fn test_zero_segments_rejected() {
        let err = evaluate(DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z, 0);
        assert!(matches!(err, Err(NeuriteError::Geometry(_))));
    }

    #[test]
    fn test_cumulative_distances() {
        let path = CurvePath::from_points(vec![
            DVec3::ZERO,
            dvec3(3.0, 4.0, 0.0),
            dvec3(3.0, 4.0, 2.0),
        ])
        .unwrap();
        assert_eq!(path.cumulative_distances(), vec![0.0, 5.0, 7.0]);
        assert_eq!(path.arc_length(), 7.0);
    }

    #[test]
    fn test_from_points_validation() {
        assert!(CurvePath::from_points(vec![DVec3::ZERO]).is_err());
        assert!(CurvePath::from_points(vec![DVec3::ZERO, DVec3::splat(f64::NAN)]).is_err());
    }

    #[test]
    fn test_bounds() {
        let path = CurvePath::from_points(vec![dvec3(1.0, -1.0, 0.0), dvec3(-2.0, 3.0, 5.0)]).unwrap();
        assert_eq!(path.bounds(), Some((dvec3(-2.0, -1.0, 0.0), dvec3(1.0, 3.0, 5.0))));
    }

    #[test]
    fn test_serde_rejects_short_path() {
        let ok: CurvePath = serde_json::from_str("[[0,0,0],[1,1,1]]").unwrap();
        assert_eq!(ok.len(), 2);
        assert!(serde_json::from_str::<CurvePath>("[[0,0,0]]").is_err());
    }
}
