//! UV sphere centered at the origin.

use neurite_math::{Point2, Vector3};

use crate::TriangleMesh;

/// Build a sphere of the given `diameter` around the origin.
///
/// `segments` latitude bands and `2 * segments` longitude slices; the seam
/// column is duplicated so texture coordinates wrap cleanly. Scene nodes
/// place the sphere by translation, so the mesh itself stays centered.
pub fn uv_sphere(diameter: f64, segments: usize) -> TriangleMesh {
    let rings = segments.max(2);
    let slices = rings * 2;
    let radius = diameter * 0.5;
    let mut mesh = TriangleMesh::default();

    for lat in 0..=rings {
        let v = lat as f64 / rings as f64;
        let theta = v * std::f64::consts::PI;
        let (sin_t, cos_t) = theta.sin_cos();
        for lon in 0..=slices {
            let u = lon as f64 / slices as f64;
            let phi = u * std::f64::consts::TAU;
            let (sin_p, cos_p) = phi.sin_cos();
            let normal = Vector3::new(sin_t * cos_p, cos_t, sin_t * sin_p);
            mesh.push_vertex(normal * radius, normal, Point2::new(u, v));
        }
    }

    let stride = (slices + 1) as u32;
    for lat in 0..rings as u32 {
        for lon in 0..slices as u32 {
            let a = lat * stride + lon;
            let b = a + stride;
            // Pole bands collapse one edge; skip the zero-area triangle there.
            if lat != 0 {
                mesh.push_triangle(a, a + 1, b);
            }
            if lat != rings as u32 - 1 {
                mesh.push_triangle(a + 1, b + 1, b);
            }
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vertices_on_surface() {
        let mesh = uv_sphere(3.0, 16);
        for p in &mesh.positions {
            assert_relative_eq!(p.length(), 1.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_counts() {
        let mesh = uv_sphere(1.0, 4);
        assert_eq!(mesh.vertex_count(), 5 * 9);
        // 4 bands * 8 slices * 2 triangles minus one per slice at each pole
        assert_eq!(mesh.triangle_count(), 4 * 8 * 2 - 2 * 8);
    }

    #[test]
    fn test_faces_point_outward() {
        let mesh = uv_sphere(2.0, 8);
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.positions[i as usize]);
            let face_normal = (b - a).cross(c - a);
            assert!(face_normal.dot(a + b + c) > 0.0);
        }
    }

    #[test]
    fn test_bounding_box_matches_diameter() {
        let bb = uv_sphere(5.0, 16).bounding_box();
        assert_relative_eq!(bb.extents().y, 5.0, epsilon = 1e-12);
    }
}
