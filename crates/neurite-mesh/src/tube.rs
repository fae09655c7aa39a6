//! Tube sweep: a circular cross-section carried along a [`CurvePath`].
//!
//! Ring orientation follows rotation-minimizing frames (double reflection,
//! Wang et al. 2008) so the surface does not twist around tight horn bends.

use neurite_core::Tolerance;
use neurite_geometry::{CurvePath, RadiusProfile};
use neurite_math::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::TriangleMesh;

/// Which tube ends get a flat cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapStyle {
    None,
    Start,
    End,
    #[default]
    All,
}

impl CapStyle {
    fn caps_start(self) -> bool {
        matches!(self, CapStyle::Start | CapStyle::All)
    }

    fn caps_end(self) -> bool {
        matches!(self, CapStyle::End | CapStyle::All)
    }
}

/// Which side of the surface faces the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideOrientation {
    #[default]
    Front,
    Back,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TubeStyle {
    pub cap: CapStyle,
    pub side: SideOrientation,
    /// Vertices per ring.
    pub radial_segments: usize,
}

impl Default for TubeStyle {
    fn default() -> Self {
        Self {
            cap: CapStyle::All,
            side: SideOrientation::Front,
            radial_segments: 60,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    tangent: Vector3,
    normal: Vector3,
    binormal: Vector3,
}

/// Sweep a tube along `path`, radius at sample `i` taken from `profile`.
///
/// Zero-length segments reuse the previous frame, so degenerate paths still
/// produce a (collapsed) mesh instead of NaNs.
pub fn sweep_tube(path: &CurvePath, profile: &RadiusProfile, style: &TubeStyle) -> TriangleMesh {
    let radial = style.radial_segments.max(3);
    let points = path.points();
    let distances = path.cumulative_distances();
    let total = distances.last().copied().unwrap_or(0.0);
    let frames = rotation_minimizing_frames(points);

    let mut mesh = TriangleMesh::default();

    for (i, (&center, frame)) in points.iter().zip(&frames).enumerate() {
        let radius = profile.radius_at(i, distances[i]);
        let v = if total > 0.0 { distances[i] / total } else { 0.0 };
        for k in 0..radial {
            let angle = (k as f64 / radial as f64) * std::f64::consts::TAU;
            let offset = frame.normal * angle.cos() + frame.binormal * angle.sin();
            mesh.push_vertex(
                center + offset * radius,
                offset,
                Point2::new(k as f64 / radial as f64, v),
            );
        }
    }

    // Quads between adjacent rings, counter-clockwise seen from outside
    for i in 0..points.len().saturating_sub(1) {
        let ring = (i * radial) as u32;
        let next_ring = ((i + 1) * radial) as u32;
        for k in 0..radial {
            let k_next = (k + 1) % radial;
            let v0 = ring + k as u32;
            let v1 = ring + k_next as u32;
            let v2 = next_ring + k as u32;
            let v3 = next_ring + k_next as u32;
            mesh.push_triangle(v0, v1, v2);
            mesh.push_triangle(v1, v3, v2);
        }
    }

    if style.cap.caps_start() {
        let radius = profile.radius_at(0, 0.0);
        push_cap(&mut mesh, points[0], &frames[0], radius, radial, false);
    }
    if style.cap.caps_end() {
        let last = points.len() - 1;
        let radius = profile.radius_at(last, total);
        push_cap(&mut mesh, points[last], &frames[last], radius, radial, true);
    }

    match style.side {
        SideOrientation::Front => {}
        SideOrientation::Back => mesh.flip(),
        SideOrientation::Double => mesh.make_double_sided(),
    }
    mesh
}

fn push_cap(
    mesh: &mut TriangleMesh,
    center: Point3,
    frame: &Frame,
    radius: f64,
    radial: usize,
    at_end: bool,
) {
    let normal = if at_end { frame.tangent } else { -frame.tangent };
    let hub = mesh.push_vertex(center, normal, Point2::splat(0.5));
    let first = hub + 1;
    for k in 0..radial {
        let angle = (k as f64 / radial as f64) * std::f64::consts::TAU;
        let (sin, cos) = angle.sin_cos();
        let offset = frame.normal * cos + frame.binormal * sin;
        mesh.push_vertex(
            center + offset * radius,
            normal,
            Point2::new(0.5 + 0.5 * cos, 0.5 + 0.5 * sin),
        );
    }
    for k in 0..radial {
        let a = first + k as u32;
        let b = first + ((k + 1) % radial) as u32;
        if at_end {
            mesh.push_triangle(hub, a, b);
        } else {
            mesh.push_triangle(hub, b, a);
        }
    }
}

/// Unit tangents by central differences; degenerate spots inherit a neighbour.
fn tangents(points: &[Point3]) -> Vec<Vector3> {
    let n = points.len();
    let tolerance = Tolerance::default();
    let mut raw: Vec<Option<Vector3>> = (0..n)
        .map(|i| {
            let prev = points[i.saturating_sub(1)];
            let next = points[(i + 1).min(n - 1)];
            let delta = next - prev;
            (!tolerance.is_zero(delta.length())).then(|| delta.normalize())
        })
        .collect();

    let fallback = raw.iter().flatten().next().copied().unwrap_or(Vector3::Z);
    let mut last = fallback;
    for t in &mut raw {
        if let Some(v) = *t {
            last = v;
        } else {
            *t = Some(last);
        }
    }
    raw.into_iter().map(|t| t.unwrap_or(fallback)).collect()
}

fn rotation_minimizing_frames(points: &[Point3]) -> Vec<Frame> {
    let tangents = tangents(points);
    let mut frames = Vec::with_capacity(points.len());

    let t0 = tangents[0];
    let arbitrary = if t0.x.abs() < 0.9 { Vector3::X } else { Vector3::Y };
    let n0 = t0.cross(arbitrary).normalize();
    frames.push(Frame {
        tangent: t0,
        normal: n0,
        binormal: t0.cross(n0).normalize(),
    });

    for i in 0..points.len().saturating_sub(1) {
        let current = frames[i];
        let t_next = tangents[i + 1];

        let v1 = points[i + 1] - points[i];
        let c1 = v1.dot(v1);
        if c1 < 1e-10 {
            frames.push(Frame {
                tangent: t_next,
                ..current
            });
            continue;
        }

        let r_l = current.normal - (2.0 / c1) * v1.dot(current.normal) * v1;
        let t_l = current.tangent - (2.0 / c1) * v1.dot(current.tangent) * v1;

        let v2 = t_next - t_l;
        let c2 = v2.dot(v2);
        let r_next = if c2 < 1e-10 {
            r_l
        } else {
            r_l - (2.0 / c2) * v2.dot(r_l) * v2
        };

        let normal = (r_next - t_next * t_next.dot(r_next))
            .try_normalize()
            .unwrap_or(current.normal);
        frames.push(Frame {
            tangent: t_next,
            normal,
            binormal: t_next.cross(normal).normalize(),
        });
    }
    frames
}
