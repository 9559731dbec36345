//! Camera state shared with both frontends.

use crate::constants::*;
use crate::gesture::HandState;
use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

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
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Orbit camera around the origin: drag to orbit, scroll to zoom, slow
/// auto-rotation while no gesture is active. No panning.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub aspect: f32,
}

impl OrbitCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: CAMERA_DISTANCE,
            aspect,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    pub fn camera(&self) -> Camera {
        Camera {
            eye: self.eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: self.aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        self.camera().view_proj()
    }

    pub fn orbit(&mut self, dx_px: f32, dy_px: f32) {
        self.yaw -= dx_px * CAMERA_ORBIT_SENSITIVITY;
        self.pitch =
            (self.pitch + dy_px * CAMERA_ORBIT_SENSITIVITY).clamp(-CAMERA_MAX_PITCH, CAMERA_MAX_PITCH);
    }

    /// Zoom by scroll notches; positive moves closer.
    pub fn zoom(&mut self, notches: f32) {
        self.distance = (self.distance * CAMERA_ZOOM_STEP.powf(notches))
            .clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    /// Advance auto-rotation. Only spins while the hand is idle.
    pub fn update(&mut self, dt: f32, hand_state: HandState) {
        if hand_state == HandState::Idle {
            self.yaw += auto_rotate_rate() * dt;
        }
    }
}

#[inline]
pub fn auto_rotate_rate() -> f32 {
    TAU / 60.0 * CAMERA_AUTO_ROTATE_SPEED
}
