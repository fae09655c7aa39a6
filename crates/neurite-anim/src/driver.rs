//! Per-frame orchestration of a built network.

use neurite_core::traits::Validate;
use neurite_core::{NeuriteError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::CameraFlight;
use crate::config::NetworkConfig;
use crate::host::{LightHandle, MeshHandle, RenderHost};
use crate::network::Network;
use crate::pulse::PulseFlash;

/// What happened during one [`FrameDriver::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub frame: u64,
    /// Lights that completed a loop this frame.
    pub wrapped: usize,
    /// Entities whose update failed; the others were still updated.
    pub failures: usize,
    pub camera_moved: bool,
}

struct PulseRig {
    flash: PulseFlash,
    sphere: MeshHandle,
    light: LightHandle,
}

/// Owns all animation state and advances it once per rendered frame.
pub struct FrameDriver {
    network: Network,
    camera: CameraFlight,
    headlight: Option<LightHandle>,
    pulse: Option<PulseRig>,
    step: usize,
    rng: StdRng,
    frame: u64,
}

impl FrameDriver {
    /// Check the host, build the layout and park the camera at the flight start.
    ///
    /// Fails with `UnsupportedEnvironment` before touching the host when it
    /// cannot render.
    pub fn start<H: RenderHost + ?Sized>(config: &NetworkConfig, host: &mut H) -> Result<Self> {
        if !host.is_supported() {
            log::error!("render host reports no 3D support, aborting start-up");
            return Err(NeuriteError::UnsupportedEnvironment(
                "the rendering host cannot display 3D content".into(),
            ));
        }
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let network = Network::build(config, host, &mut rng)?;
        let camera = CameraFlight::from_waypoints(config.camera.waypoints, config.preset.camera_samples)?;
        host.set_camera_position(config.camera.waypoints[0]);

        let headlight = config
            .camera
            .headlight
            .then(|| host.create_light("headlight", config.camera.waypoints[0]));

        let pulse = match &config.pulse {
            Some(pulse) => {
                let sphere = host.create_sphere("pulse_sphere", pulse.center, pulse.diameter)?;
                host.set_material(sphere, &config.materials.tissue)?;
                let light = host.create_light("flash", pulse.light_position);
                host.set_light_enabled(light, false)?;
                Some(PulseRig {
                    flash: PulseFlash::new(pulse.period, pulse.period_jitter),
                    sphere,
                    light,
                })
            }
            None => None,
        };

        log::info!(
            "animation ready: {} strands ({} lit), camera path of {} samples",
            network.strands.len(),
            network.animated_strands().count(),
            camera.path().len()
        );

        Ok(Self {
            network,
            camera,
            headlight,
            pulse,
            step: config.preset.step,
            rng,
            frame: 0,
        })
    }

    /// Advance every traveler, the pulse and the camera by one tick.
    ///
    /// A failing entity is logged and counted; it never stops the others.
    pub fn tick<H: RenderHost + ?Sized>(&mut self, host: &mut H) -> TickReport {
        self.frame += 1;
        let mut report = TickReport {
            frame: self.frame,
            ..TickReport::default()
        };

        for strand in &mut self.network.strands {
            match strand.tick(self.step, host) {
                Ok(Some(frame)) if frame.wrapped => report.wrapped += 1,
                Ok(_) => {}
                Err(e) => {
                    log::warn!("frame {}: {} skipped: {}", self.frame, strand.name, e);
                    report.failures += 1;
                }
            }
        }

        if let Some(light) = self.headlight {
            let eye = host.camera_position();
            if let Err(e) = host.set_light_position(light, eye) {
                log::warn!("frame {}: headlight skipped: {}", self.frame, e);
                report.failures += 1;
            }
        }

        if let Some(rig) = &mut self.pulse {
            let pulse = rig.flash.tick(&mut self.rng);
            let result = host
                .set_scaling(rig.sphere, pulse.scale)
                .and_then(|()| match pulse.light {
                    Some(enabled) => host.set_light_enabled(rig.light, enabled),
                    None => Ok(()),
                });
            if let Err(e) = result {
                log::warn!("frame {}: pulse skipped: {}", self.frame, e);
                report.failures += 1;
            }
        }

        if let Some(position) = self.camera.tick() {
            host.set_camera_position(position);
            report.camera_moved = true;
        }

        report
    }

    /// Forward a viewport size change to the host.
    pub fn resize<H: RenderHost + ?Sized>(&self, host: &mut H) {
        host.recompute_viewport();
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn camera(&self) -> &CameraFlight {
        &self.camera
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}
