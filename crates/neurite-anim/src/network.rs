//! Neuron and synapse wiring on top of the path generator.
//!
//! Both layouts reduce to strands: horn-curved tubes from one point to another,
//! optionally carrying a traveling light. Neurons add a nucleus sphere and
//! optional synapse spheres at their axon ends.

use neurite_core::Result;
use neurite_geometry::{CubicBezier, CurvePath};
use neurite_math::Point3;
use rand::Rng;
use rayon::prelude::*;

use crate::config::NetworkConfig;
use crate::host::{MeshHandle, RenderHost};
use crate::traveler::{drive_marker, Traveler, TravelerFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrandKind {
    Axon,
    Synapse,
}

/// A traveler bound to the sphere it moves.
#[derive(Debug, Clone)]
pub struct TravelingLight {
    pub traveler: Traveler,
    pub marker: MeshHandle,
}

#[derive(Debug, Clone)]
pub struct Strand {
    pub name: String,
    pub kind: StrandKind,
    pub path: CurvePath,
    pub tube: MeshHandle,
    pub light: Option<TravelingLight>,
}

impl Strand {
    /// Advance this strand's light, if it has one.
    pub fn tick<H: RenderHost + ?Sized>(
        &mut self,
        step: usize,
        host: &mut H,
    ) -> Result<Option<TravelerFrame>> {
        match &mut self.light {
            Some(light) => {
                drive_marker(&mut light.traveler, step, &self.path, light.marker, host).map(Some)
            }
            None => Ok(None),
        }
    }
}

/// Meshes and animation state of a built layout.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub strands: Vec<Strand>,
    pub nuclei: Vec<MeshHandle>,
    pub synapse_ends: Vec<MeshHandle>,
}

struct StrandSpec {
    name: String,
    kind: StrandKind,
    start: Point3,
    end: Point3,
    animated: bool,
}

impl Network {
    /// Generate every strand path, then register all meshes with `host`.
    ///
    /// Paths are computed in parallel; meshes and start offsets are created in
    /// layout order so a seeded `rng` gives the same scene every time.
    pub fn build<H, R>(config: &NetworkConfig, host: &mut H, rng: &mut R) -> Result<Self>
    where
        H: RenderHost + ?Sized,
        R: Rng + ?Sized,
    {
        let specs = strand_specs(config);
        let segments = config.preset.max_cycles;
        let paths: Vec<CurvePath> = specs
            .par_iter()
            .map(|spec| CubicBezier::horn(spec.start, spec.end).sample(segments))
            .collect::<Result<_>>()?;

        let mut network = Network::default();
        let materials = &config.materials;

        for neuron in &config.neurons {
            let nucleus = host.create_sphere(
                &format!("{}_central_sphere", neuron.name),
                neuron.center,
                neuron.nucleus_diameter,
            )?;
            host.set_material(nucleus, &materials.tissue)?;
            network.nuclei.push(nucleus);

            if neuron.show_synapses {
                for (i, &end) in neuron.axon_ends.iter().enumerate() {
                    let sphere = host.create_sphere(
                        &format!("{}_sinaps_{}", neuron.name, i),
                        end,
                        config.marker_diameter,
                    )?;
                    host.set_material(sphere, &materials.tissue)?;
                    network.synapse_ends.push(sphere);
                }
            }
        }

        for (spec, path) in specs.into_iter().zip(paths) {
            let tube = host.create_tube(
                &format!("{}_tube", spec.name),
                &path,
                &config.radius,
                &config.tube,
            )?;
            host.set_material(tube, &materials.tissue)?;

            let light = if spec.animated {
                let marker = host.create_sphere(
                    &format!("{}_light", spec.name),
                    path.first(),
                    config.marker_diameter,
                )?;
                host.set_material(marker, &materials.pulse)?;
                Some(TravelingLight {
                    traveler: Traveler::from_preset(&config.preset, rng),
                    marker,
                })
            } else {
                None
            };

            network.strands.push(Strand {
                name: spec.name,
                kind: spec.kind,
                path,
                tube,
                light,
            });
        }

        log::debug!(
            "built network: {} strands, {} nuclei, {} synapse ends",
            network.strands.len(),
            network.nuclei.len(),
            network.synapse_ends.len()
        );
        Ok(network)
    }

    pub fn animated_strands(&self) -> impl Iterator<Item = &Strand> + '_ {
        self.strands.iter().filter(|s| s.light.is_some())
    }
}

fn strand_specs(config: &NetworkConfig) -> Vec<StrandSpec> {
    let axons = config.neurons.iter().flat_map(|neuron| {
        neuron
            .axon_ends
            .iter()
            .enumerate()
            .map(move |(i, &end)| StrandSpec {
                name: format!("{}_{}", neuron.name, i),
                kind: StrandKind::Axon,
                start: neuron.center,
                end,
                animated: neuron.animated,
            })
    });
    let synapses = config.synapses.iter().map(|synapse| StrandSpec {
        name: synapse.name.clone(),
        kind: StrandKind::Synapse,
        start: synapse.start,
        end: synapse.end,
        animated: synapse.animated,
    });
    axons.chain(synapses).collect()
}
