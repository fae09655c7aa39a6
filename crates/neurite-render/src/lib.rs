pub mod camera;
pub mod export;
pub mod recording;
pub mod scene;

// Re-export main types
pub use camera::{Camera, Viewport};
pub use recording::{FrameSnapshot, Recording};
pub use scene::{Scene, SceneLight, SceneNode};
