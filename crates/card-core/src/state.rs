//! Camera and lighting description shared with the web renderer.
//!
//! These types avoid platform-specific APIs; the renderer only turns them into
//! uniform data.

use glam::{Mat4, Vec3};

/// Where the cake camera sits.
pub const CAKE_EYE: Vec3 = Vec3::new(1.5, 3.0, 9.0);

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera framing the cake from slightly above and to the right.
    pub fn cake(aspect: f32) -> Self {
        Self {
            eye: CAKE_EYE,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: 75f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Ambient fill plus one directional light.
#[derive(Clone, Debug)]
pub struct Lighting {
    pub ambient: f32,
    pub directional: f32,
    /// Position of the directional light; it shines toward the origin.
    pub direction_from: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: 0.6,
            directional: 0.8,
            direction_from: Vec3::new(10.0, 10.0, 5.0),
        }
    }
}
