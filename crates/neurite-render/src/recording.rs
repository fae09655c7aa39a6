//! Frame-by-frame capture of the animated parts of a [`Scene`].

use neurite_anim::{LightHandle, MeshHandle};
use neurite_math::Point3;
use serde::Serialize;

use crate::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeState {
    pub position: Point3,
    pub scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LightState {
    pub position: Point3,
    pub enabled: bool,
}

/// Transforms, lights and camera as they stood after one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub camera: Point3,
    pub nodes: Vec<(MeshHandle, NodeState)>,
    pub lights: Vec<(LightHandle, LightState)>,
}

#[derive(Debug, Clone, Default)]
pub struct Recording {
    pub frames: Vec<FrameSnapshot>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture(&mut self, scene: &Scene) {
        let nodes = scene
            .nodes
            .iter()
            .map(|(handle, node)| {
                let state = NodeState {
                    position: node.position,
                    scale: node.scale,
                };
                (handle, state)
            })
            .collect();
        let lights = scene
            .lights
            .iter()
            .map(|(handle, light)| {
                let state = LightState {
                    position: light.position,
                    enabled: light.enabled,
                };
                (handle, state)
            })
            .collect();
        self.frames.push(FrameSnapshot {
            camera: scene.camera.eye,
            nodes,
            lights,
        });
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// States of one mesh across all frames, skipping frames where it was absent.
    pub fn track(&self, mesh: MeshHandle) -> Vec<NodeState> {
        self.frames
            .iter()
            .filter_map(|frame| {
                frame
                    .nodes
                    .iter()
                    .find(|(handle, _)| *handle == mesh)
                    .map(|(_, state)| *state)
            })
            .collect()
    }
}
