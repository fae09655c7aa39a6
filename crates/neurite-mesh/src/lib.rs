pub mod sphere;
pub mod triangle_mesh;
pub mod tube;

pub use sphere::uv_sphere;
pub use triangle_mesh::TriangleMesh;
pub use tube::{sweep_tube, CapStyle, SideOrientation, TubeStyle};
