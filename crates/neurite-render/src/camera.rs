use neurite_math::{Point3, Vector3};

/// Drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; a zero-height viewport counts as square.
    pub fn aspect(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f64 / self.height as f64
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// A perspective camera that always looks at `target`.
#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Point3,       // camera position
    pub target: Point3,    // look-at target
    pub up: Vector3,       // up vector
    pub fov_y: f64,        // vertical FOV in radians
    pub aspect: f64,       // width/height
    pub near: f64,         // near clip plane
    pub far: f64,          // far clip plane
}

impl Camera {
    /// Camera orbiting the origin from `eye`, framed for a scene a few hundred units wide.
    pub fn looking_at_origin(eye: Point3) -> Self {
        Self {
            eye,
            target: Point3::ZERO,
            up: Vector3::Y,
            fov_y: 0.8,
            aspect: Viewport::default().aspect(),
            near: 1.0,
            far: 10_000.0,
        }
    }

    /// Adopt the aspect ratio of `viewport`.
    pub fn fit_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    pub fn distance_to_target(&self) -> f64 {
        (self.target - self.eye).length()
    }

    /// Unit vector from the eye toward the target, `None` when they coincide.
    pub fn forward(&self) -> Option<Vector3> {
        (self.target - self.eye).try_normalize()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::looking_at_origin(Point3::new(0.0, 0.0, -10.0))
    }
}
