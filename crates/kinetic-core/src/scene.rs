//! Top-level app state: particle system, color, camera and the gesture
//! mailbox, advanced once per displayed frame.

use crate::color::{palette_color, ColorState};
use crate::config::SessionConfig;
use crate::constants::REFERENCE_FPS;
use crate::controls::Command;
use crate::gesture::{GestureMailbox, GestureState, HandState, KinematicsProfile};
use crate::shapes::ShapeKind;
use crate::simulation::{LerpMode, ParticleSystem};
use crate::state::OrbitCamera;
use glam::{Mat4, Vec3};
use rand::Rng;
use std::sync::Arc;

pub const TITLE: &str = "KINETIC PARTICLES";

pub struct Scene {
    system: ParticleSystem,
    color: ColorState,
    // Restored when auto-cycle is switched off.
    last_fixed: [f32; 3],
    palette_index: isize,
    camera: OrbitCamera,
    mailbox: Arc<GestureMailbox>,
    last_gesture: GestureState,
    last_tau: Option<f64>,
}

impl Scene {
    pub fn new<R: Rng + ?Sized>(
        config: &SessionConfig,
        mailbox: Arc<GestureMailbox>,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Self {
        let mut camera = OrbitCamera::new(1.0);
        camera.set_viewport(width, height);
        Self {
            system: ParticleSystem::new(config, rng),
            color: config.color,
            last_fixed: match config.color {
                ColorState::Fixed(rgb) => rgb,
                ColorState::AutoCycle => palette_color(0),
            },
            palette_index: 0,
            camera,
            mailbox,
            last_gesture: GestureState::default(),
            last_tau: None,
        }
    }

    pub fn mailbox(&self) -> &Arc<GestureMailbox> {
        &self.mailbox
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn color(&self) -> ColorState {
        self.color
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    pub fn set_shape<R: Rng + ?Sized>(&mut self, shape: ShapeKind, rng: &mut R) -> bool {
        self.system.set_shape(shape, rng)
    }

    pub fn set_color(&mut self, color: ColorState) {
        log::info!("[color] {color}");
        if let ColorState::Fixed(rgb) = color {
            self.last_fixed = rgb;
        }
        self.color = color;
    }

    /// Switch auto-cycle on, or back off to the last fixed color.
    pub fn set_auto_color(&mut self, enabled: bool) {
        if self.color.is_auto() == enabled {
            return;
        }
        let color = if enabled {
            ColorState::AutoCycle
        } else {
            ColorState::Fixed(self.last_fixed)
        };
        self.set_color(color);
    }

    pub fn apply<R: Rng + ?Sized>(&mut self, command: Command, rng: &mut R) {
        match command {
            Command::SelectShape(shape) => {
                self.system.set_shape(shape, rng);
            }
            Command::NextShape => {
                let next = self.system.shape().next();
                self.system.set_shape(next, rng);
            }
            Command::Regenerate => self.system.regenerate(rng),
            Command::Gesture(state) => self.mailbox.publish(state),
            Command::ToggleAutoColor => {
                let enabled = !self.color.is_auto();
                self.set_auto_color(enabled);
            }
            Command::Palette(delta) => {
                self.palette_index += delta;
                self.set_color(ColorState::Fixed(palette_color(self.palette_index)));
            }
            Command::ToggleProfile => {
                let profile = match self.system.profile() {
                    KinematicsProfile::Calm => KinematicsProfile::Hyper,
                    KinematicsProfile::Hyper => KinematicsProfile::Calm,
                };
                log::info!("[sim] profile {profile:?}");
                self.system.set_profile(profile);
            }
            Command::ToggleLerpMode => {
                let mode = match self.system.lerp_mode() {
                    LerpMode::PerFrame => LerpMode::FrameRateIndependent {
                        reference_fps: REFERENCE_FPS,
                    },
                    LerpMode::FrameRateIndependent { .. } => LerpMode::PerFrame,
                };
                log::info!("[sim] lerp {mode:?}");
                self.system.set_lerp_mode(mode);
            }
        }
    }

    /// Step everything to elapsed time `tau` (seconds since start).
    pub fn advance(&mut self, tau: f64) -> GestureState {
        let dt = self.last_tau.map_or(0.0, |last| (tau - last).max(0.0) as f32);
        self.last_tau = Some(tau);
        let gesture = self.mailbox.snapshot();
        if gesture.hand_state != self.last_gesture.hand_state {
            log::info!(
                "[gesture] {} -> {} ({})",
                self.last_gesture.hand_state,
                gesture.hand_state,
                gesture.hand_state.status_label()
            );
        }
        self.last_gesture = gesture;
        self.camera.update(dt, gesture.hand_state);
        self.system.tick(&gesture, tau, dt);
        gesture
    }

    pub fn positions(&self) -> &[Vec3] {
        self.system.positions()
    }

    pub fn color_at(&self, tau: f64) -> [f32; 3] {
        self.color.resolve(tau)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.camera.view_proj()
    }

    pub fn hand_state(&self) -> HandState {
        self.last_gesture.hand_state
    }

    /// One-line status for window titles: connection, gesture, shape.
    pub fn status_line(&self) -> String {
        let link = if self.mailbox.is_connected() {
            "LIVE"
        } else {
            "OFFLINE"
        };
        format!(
            "{TITLE} | {link} | {} | {}",
            self.last_gesture.hand_state.status_label(),
            self.system.shape().label()
        )
    }
}
