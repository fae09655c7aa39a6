//! Frame-driven animation over precomputed curve paths.
//!
//! Everything here mutates once per rendered frame and talks to the renderer
//! only through [`RenderHost`].

pub mod camera;
pub mod config;
pub mod driver;
pub mod host;
pub mod network;
pub mod preset;
pub mod pulse;
pub mod traveler;

pub use camera::CameraFlight;
pub use config::{Material, NetworkConfig, NeuronConfig, PulseConfig, SynapseConfig};
pub use driver::{FrameDriver, TickReport};
pub use host::{LightHandle, MeshHandle, RenderHost};
pub use network::{Network, Strand, StrandKind, TravelingLight};
pub use preset::{AnimationPreset, WrapMode, MAX_SAMPLES};
pub use pulse::{PulseFlash, PulseFrame};
pub use traveler::{drive_marker, Traveler, TravelerFrame, TravelerState};
