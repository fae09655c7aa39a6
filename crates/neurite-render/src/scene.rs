use neurite_anim::{LightHandle, Material, MeshHandle, RenderHost};
use neurite_core::{NeuriteError, Result};
use neurite_geometry::{CurvePath, RadiusProfile};
use neurite_math::{Aabb3, Point3};
use neurite_mesh::{sweep_tube, uv_sphere, TriangleMesh, TubeStyle};
use slotmap::SlotMap;

use crate::camera::{Camera, Viewport};

/// A named mesh placed in the scene by translation and uniform scale.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub mesh: TriangleMesh,
    pub material: Option<Material>,
    pub position: Point3,
    pub scale: f64,
}

impl SceneNode {
    /// Mesh bounds after the node transform.
    pub fn world_bounds(&self) -> Aabb3 {
        let local = self.mesh.bounding_box();
        Aabb3::new(
            self.position + local.min * self.scale,
            self.position + local.max * self.scale,
        )
    }
}

#[derive(Debug, Clone)]
pub struct SceneLight {
    pub name: String,
    pub position: Point3,
    pub enabled: bool,
}

/// In-memory retained scene implementing [`RenderHost`].
pub struct Scene {
    pub nodes: SlotMap<MeshHandle, SceneNode>,
    pub lights: SlotMap<LightHandle, SceneLight>,
    pub camera: Camera,
    viewport: Viewport,
    sphere_segments: usize,
    supported: bool,
}

impl Scene {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            lights: SlotMap::with_key(),
            camera: Camera::default(),
            viewport: Viewport::default(),
            sphere_segments: 16,
            supported: true,
        }
    }

    /// Scene that reports itself unable to render; start-up must abort on it.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    pub fn with_sphere_segments(mut self, segments: usize) -> Self {
        self.sphere_segments = segments;
        self
    }

    /// Record a new drawable size; takes effect on the next `recompute_viewport`.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn add_node(&mut self, name: &str, mesh: TriangleMesh, position: Point3) -> MeshHandle {
        log::trace!("add mesh {} ({} triangles)", name, mesh.triangle_count());
        self.nodes.insert(SceneNode {
            name: name.to_string(),
            mesh,
            material: None,
            position,
            scale: 1.0,
        })
    }

    fn node_mut(&mut self, mesh: MeshHandle) -> Result<&mut SceneNode> {
        self.nodes
            .get_mut(mesh)
            .ok_or_else(|| NeuriteError::InvalidHandle(format!("mesh {:?}", mesh)))
    }

    fn light_mut(&mut self, light: LightHandle) -> Result<&mut SceneLight> {
        self.lights
            .get_mut(light)
            .ok_or_else(|| NeuriteError::InvalidHandle(format!("light {:?}", light)))
    }

    /// Drop a mesh; later updates through its handle fail.
    pub fn remove(&mut self, mesh: MeshHandle) -> Option<SceneNode> {
        self.nodes.remove(mesh)
    }

    pub fn node_by_name(&self, name: &str) -> Option<(MeshHandle, &SceneNode)> {
        self.nodes.iter().find(|(_, node)| node.name == name)
    }

    /// Compute scene bounding box
    pub fn bounds(&self) -> Option<Aabb3> {
        self.nodes
            .values()
            .map(SceneNode::world_bounds)
            .reduce(|a, b| a.merge(&b))
    }

    /// Total triangle count across all meshes
    pub fn total_triangles(&self) -> usize {
        self.nodes.values().map(|n| n.mesh.triangle_count()).sum()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderHost for Scene {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn create_tube(
        &mut self,
        name: &str,
        path: &CurvePath,
        profile: &RadiusProfile,
        style: &TubeStyle,
    ) -> Result<MeshHandle> {
        let mesh = sweep_tube(path, profile, style);
        Ok(self.add_node(name, mesh, Point3::ZERO))
    }

    fn create_sphere(&mut self, name: &str, center: Point3, diameter: f64) -> Result<MeshHandle> {
        if !(diameter > 0.0) {
            return Err(NeuriteError::Geometry(format!(
                "{}: sphere diameter must be positive, got {}",
                name, diameter
            )));
        }
        let mesh = uv_sphere(diameter, self.sphere_segments);
        Ok(self.add_node(name, mesh, center))
    }

    fn set_material(&mut self, mesh: MeshHandle, material: &Material) -> Result<()> {
        self.node_mut(mesh)?.material = Some(material.clone());
        Ok(())
    }

    fn set_position(&mut self, mesh: MeshHandle, position: Point3) -> Result<()> {
        self.node_mut(mesh)?.position = position;
        Ok(())
    }

    fn set_scaling(&mut self, mesh: MeshHandle, scale: f64) -> Result<()> {
        self.node_mut(mesh)?.scale = scale;
        Ok(())
    }

    fn create_light(&mut self, name: &str, position: Point3) -> LightHandle {
        self.lights.insert(SceneLight {
            name: name.to_string(),
            position,
            enabled: true,
        })
    }

    fn set_light_position(&mut self, light: LightHandle, position: Point3) -> Result<()> {
        self.light_mut(light)?.position = position;
        Ok(())
    }

    fn set_light_enabled(&mut self, light: LightHandle, enabled: bool) -> Result<()> {
        self.light_mut(light)?.enabled = enabled;
        Ok(())
    }

    fn camera_position(&self) -> Point3 {
        self.camera.eye
    }

    fn set_camera_position(&mut self, position: Point3) {
        self.camera.eye = position;
    }

    fn recompute_viewport(&mut self) {
        self.camera.fit_viewport(self.viewport);
    }
}
