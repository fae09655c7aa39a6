//! The seam between animation state and whatever draws it.

use neurite_core::Result;
use neurite_geometry::{CurvePath, RadiusProfile};
use neurite_math::Point3;
use neurite_mesh::TubeStyle;
use slotmap::new_key_type;

use crate::config::Material;

new_key_type! {
    pub struct MeshHandle;
    pub struct LightHandle;
}

/// Retained-mode renderer driven by the animation.
///
/// Handles are issued by the host and stay valid until the host drops the
/// object; passing a stale handle yields `NeuriteError::InvalidHandle`.
pub trait RenderHost {
    /// Whether the environment can render at all. Checked once at start-up.
    fn is_supported(&self) -> bool;

    fn create_tube(
        &mut self,
        name: &str,
        path: &CurvePath,
        profile: &RadiusProfile,
        style: &TubeStyle,
    ) -> Result<MeshHandle>;

    fn create_sphere(&mut self, name: &str, center: Point3, diameter: f64) -> Result<MeshHandle>;

    fn set_material(&mut self, mesh: MeshHandle, material: &Material) -> Result<()>;

    fn set_position(&mut self, mesh: MeshHandle, position: Point3) -> Result<()>;

    /// Uniform scale on all three axes.
    fn set_scaling(&mut self, mesh: MeshHandle, scale: f64) -> Result<()>;

    fn create_light(&mut self, name: &str, position: Point3) -> LightHandle;

    fn set_light_position(&mut self, light: LightHandle, position: Point3) -> Result<()>;

    fn set_light_enabled(&mut self, light: LightHandle, enabled: bool) -> Result<()>;

    fn camera_position(&self) -> Point3;

    fn set_camera_position(&mut self, position: Point3);

    /// Re-read the viewport size after a resize notification.
    fn recompute_viewport(&mut self);
}
