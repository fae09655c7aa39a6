//! Scene description: topology, timing preset, camera route and materials.
//!
//! Everything is serde-backed so a layout can live in a JSON file; the two
//! built-in layouts are available as [`NetworkConfig::neuron_default`] and
//! [`NetworkConfig::synapse_default`].

use std::path::Path;

use neurite_core::traits::Validate;
use neurite_core::{NeuriteError, Result};
use neurite_geometry::RadiusProfile;
use neurite_math::{dvec3, Point3};
use neurite_mesh::TubeStyle;
use serde::{Deserialize, Serialize};

use crate::preset::AnimationPreset;

/// Surface appearance handed to the renderer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub emissive: [f32; 3],
    /// Normal map image, resolved by the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bump_texture: Option<String>,
}

impl Material {
    /// Purple, bump-mapped membrane used for nuclei, tubes and synapse ends.
    pub fn tissue() -> Self {
        Self {
            name: "tissue".into(),
            diffuse: [1.0, 0.5, 1.0],
            specular: [1.0, 0.0, 1.0],
            emissive: [0.0, 0.0, 0.0],
            bump_texture: Some("NormalMapM.png".into()),
        }
    }

    /// Self-lit violet for the traveling light spheres.
    pub fn pulse() -> Self {
        Self {
            name: "pulse".into(),
            diffuse: [0.0, 0.0, 0.0],
            specular: [0.0, 0.0, 0.0],
            emissive: [0.3, 0.0, 1.0],
            bump_texture: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Materials {
    pub tissue: Material,
    pub pulse: Material,
}

impl Default for Materials {
    fn default() -> Self {
        Self {
            tissue: Material::tissue(),
            pulse: Material::pulse(),
        }
    }
}

/// A nucleus with horn-shaped axons radiating to `axon_ends`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronConfig {
    pub name: String,
    pub center: Point3,
    pub nucleus_diameter: f64,
    pub axon_ends: Vec<Point3>,
    /// Put a sphere at the end of every axon.
    #[serde(default)]
    pub show_synapses: bool,
    /// Send traveling lights along the axons.
    #[serde(default = "default_true")]
    pub animated: bool,
}

/// A single point-to-point tube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynapseConfig {
    pub name: String,
    pub start: Point3,
    pub end: Point3,
    #[serde(default = "default_true")]
    pub animated: bool,
}

/// The pulsing central sphere and its flash light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseConfig {
    pub center: Point3,
    pub diameter: f64,
    pub period: u32,
    /// Redraw the period from `[1, jitter)` on every restart.
    #[serde(default)]
    pub period_jitter: Option<u32>,
    pub light_position: Point3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Start, two control points, end of the flight Bezier.
    pub waypoints: [Point3; 4],
    /// Keep the scene light on the camera.
    #[serde(default = "default_true")]
    pub headlight: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            waypoints: [
                dvec3(-20.0, 55.0, 40.0),
                dvec3(-30.0, 80.0, 20.0),
                dvec3(30.0, -80.0, 20.0),
                dvec3(-100.0, -40.0, 100.0),
            ],
            headlight: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Seed for start offsets and pulse jitter; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub preset: AnimationPreset,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub neurons: Vec<NeuronConfig>,
    #[serde(default)]
    pub synapses: Vec<SynapseConfig>,
    #[serde(default)]
    pub pulse: Option<PulseConfig>,
    #[serde(default)]
    pub tube: TubeStyle,
    #[serde(default)]
    pub radius: RadiusProfile,
    #[serde(default)]
    pub materials: Materials,
    #[serde(default = "default_marker_diameter")]
    pub marker_diameter: f64,
    #[serde(default = "default_sphere_segments")]
    pub sphere_segments: usize,
}

fn default_true() -> bool {
    true
}

fn default_marker_diameter() -> f64 {
    1.0
}

fn default_sphere_segments() -> usize {
    16
}

impl NetworkConfig {
    fn empty(preset: AnimationPreset) -> Self {
        Self {
            seed: None,
            preset,
            camera: CameraConfig::default(),
            neurons: Vec::new(),
            synapses: Vec::new(),
            pulse: None,
            tube: TubeStyle::default(),
            radius: RadiusProfile::AXON,
            materials: Materials::default(),
            marker_diameter: default_marker_diameter(),
            sphere_segments: default_sphere_segments(),
        }
    }

    /// Three neurons; the first two fire and show their synapse ends.
    pub fn neuron_default() -> Self {
        let mut config = Self::empty(AnimationPreset::neuron());
        config.neurons = vec![
            NeuronConfig {
                name: "neuron1".into(),
                center: dvec3(0.0, 0.0, 0.0),
                nucleus_diameter: 5.0,
                axon_ends: vec![
                    dvec3(20.0, 0.0, 20.0),
                    dvec3(-20.0, 0.0, 20.0),
                    dvec3(10.0, -20.0, -10.0),
                    dvec3(0.0, 20.0, -20.0),
                ],
                show_synapses: true,
                animated: true,
            },
            NeuronConfig {
                name: "neuron2".into(),
                center: dvec3(20.0, 0.0, 20.0),
                nucleus_diameter: 3.0,
                axon_ends: vec![dvec3(30.0, 10.0, 20.0), dvec3(20.0, -10.0, 30.0)],
                show_synapses: true,
                animated: true,
            },
            NeuronConfig {
                name: "neuron3".into(),
                center: dvec3(-20.0, 0.0, -20.0),
                nucleus_diameter: 3.0,
                axon_ends: vec![
                    dvec3(-30.0, -10.0, -20.0),
                    dvec3(-20.0, 10.0, -30.0),
                    dvec3(-10.0, 0.0, -10.0),
                ],
                show_synapses: false,
                animated: false,
            },
        ];
        config
    }

    /// Point-to-point synapses around a pulsing central sphere.
    pub fn synapse_default() -> Self {
        let mut config = Self::empty(AnimationPreset::synapse());
        let links = [
            ((-15.0, 0.0, -15.0), (0.0, 0.0, 0.0)),
            ((15.0, 5.0, -10.0), (0.0, 0.0, 0.0)),
            ((0.0, -15.0, 15.0), (0.0, 0.0, 0.0)),
            ((0.0, 0.0, 0.0), (20.0, 0.0, 20.0)),
            ((0.0, 0.0, 0.0), (-20.0, 10.0, 10.0)),
            ((20.0, 0.0, 20.0), (30.0, 10.0, 20.0)),
        ];
        config.synapses = links
            .iter()
            .enumerate()
            .map(|(i, &((sx, sy, sz), (ex, ey, ez)))| SynapseConfig {
                name: format!("synapse{}", i + 1),
                start: dvec3(sx, sy, sz),
                end: dvec3(ex, ey, ez),
                animated: true,
            })
            .collect();
        config.pulse = Some(PulseConfig {
            center: Point3::ZERO,
            diameter: 4.0,
            period: 50,
            period_jitter: None,
            light_position: dvec3(5.0, 5.0, 5.0),
        });
        config
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of tubes the layout will produce.
    pub fn strand_count(&self) -> usize {
        self.neurons.iter().map(|n| n.axon_ends.len()).sum::<usize>() + self.synapses.len()
    }
}

impl Validate for NetworkConfig {
    fn validate(&self) -> Result<()> {
        self.preset.validate()?;
        if self.strand_count() == 0 {
            return Err(NeuriteError::Config(
                "layout has no axons or synapses".into(),
            ));
        }
        if !(self.marker_diameter > 0.0) {
            return Err(NeuriteError::Config(format!(
                "marker_diameter must be positive, got {}",
                self.marker_diameter
            )));
        }
        for neuron in &self.neurons {
            if !(neuron.nucleus_diameter > 0.0) {
                return Err(NeuriteError::Config(format!(
                    "{}: nucleus_diameter must be positive",
                    neuron.name
                )));
            }
        }
        if let Some(pulse) = &self.pulse {
            if pulse.period == 0 {
                return Err(NeuriteError::Config("pulse period must be at least 1".into()));
            }
        }
        Ok(())
    }
}
