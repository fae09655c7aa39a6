//! One-shot camera flight along a sampled Bezier, traversed end to start.

use neurite_core::Result;
use neurite_geometry::{CubicBezier, CurvePath};
use neurite_math::Point3;

#[derive(Debug, Clone)]
pub struct CameraFlight {
    path: CurvePath,
    cursor: usize,
}

impl CameraFlight {
    /// Flight over `path` with the cursor parked on its last sample.
    pub fn new(path: CurvePath) -> Self {
        let cursor = path.len() - 1;
        Self { path, cursor }
    }

    /// Sample the Bezier through `waypoints` (start, two controls, end).
    pub fn from_waypoints(waypoints: [Point3; 4], samples: usize) -> Result<Self> {
        let [start, control1, control2, end] = waypoints;
        let path = CubicBezier::new(start, control1, control2, end).sample(samples)?;
        Ok(Self::new(path))
    }

    /// Step the cursor toward 0 and return the new camera position.
    ///
    /// Returns `None` once the cursor has reached 0; the camera then stays on
    /// the first sample.
    pub fn tick(&mut self) -> Option<Point3> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.path[self.cursor])
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor == 0
    }

    pub fn path(&self) -> &CurvePath {
        &self.path
    }
}
