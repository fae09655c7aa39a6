//! Utilities for converting curves to discrete point sequences.

use neurite_math::Point3;

use crate::curve::Curve;

/// Sample a curve at `segments + 1` evenly spaced parameters across its domain.
///
/// Each parameter is computed as `t_min + (t_max - t_min) * i / segments`
/// instead of accumulating a step, so the last sample sits exactly on `t_max`.
/// Returns an empty vector when `segments` is zero.
pub fn sample_uniform(curve: &dyn Curve, segments: usize) -> Vec<Point3> {
    if segments == 0 {
        return Vec::new();
    }
    let (t_min, t_max) = curve.domain();
    (0..=segments)
        .map(|i| {
            let t = t_min + (t_max - t_min) * i as f64 / segments as f64;
            curve.point_at(t)
        })
        .collect()
}

/// Largest distance from any point to the chord between the first and last point.
pub fn max_chord_deviation(points: &[Point3]) -> f64 {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return 0.0;
    };
    let chord = last - first;
    let len_sq = chord.length_squared();
    points
        .iter()
        .map(|&p| {
            if len_sq == 0.0 {
                return (p - first).length();
            }
            let t = ((p - first).dot(chord) / len_sq).clamp(0.0, 1.0);
            (p - (first + chord * t)).length()
        })
        .fold(0.0, f64::max)
}
