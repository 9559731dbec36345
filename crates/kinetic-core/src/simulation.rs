//! Per-frame particle stepping. Each particle closes a fixed fraction of the
//! gap to its goal every frame: the shape target scaled by the gesture,
//! wobbled by a per-particle phase and spun about +Y.

use crate::config::SessionConfig;
use crate::constants::SEED_PHASE_SPREAD;
use crate::gesture::{kinematics, GestureState, Kinematics, KinematicsProfile};
use crate::shapes::{generate_targets, regenerate_into, ShapeKind};
use glam::Vec3;
use rand::Rng;
use std::f64::consts::TAU;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LerpMode {
    /// `lerp_speed` is applied verbatim once per frame. Visual speed follows
    /// the display refresh rate.
    #[default]
    PerFrame,
    /// The factor is rescaled by `dt` so that one frame at `reference_fps`
    /// matches `PerFrame`.
    FrameRateIndependent { reference_fps: f32 },
}

impl LerpMode {
    #[inline]
    pub fn factor(self, lerp_speed: f32, dt: f32) -> f32 {
        match self {
            LerpMode::PerFrame => lerp_speed,
            LerpMode::FrameRateIndependent { reference_fps } => {
                let frames = (dt * reference_fps).max(0.0);
                1.0 - (1.0 - lerp_speed.clamp(0.0, 1.0)).powf(frames)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    pub kinematics: Kinematics,
    /// Elapsed session time in seconds. Kept in f64 so phases stay smooth
    /// over long sessions.
    pub tau: f64,
    pub dt: f32,
    pub lerp_mode: LerpMode,
}

#[inline]
pub fn rotate_y(p: Vec3, theta: f32) -> Vec3 {
    let (s, c) = theta.sin_cos();
    Vec3::new(p.x * c - p.z * s, p.y, p.x * s + p.z * c)
}

/// `tau * rate` in radians, wrapped into [0, 2π) before narrowing to f32.
#[inline]
pub fn wrapped_phase(tau: f64, rate: f32) -> f32 {
    (tau * f64::from(rate)).rem_euclid(TAU) as f32
}

#[inline]
pub fn desired_position(target: Vec3, seed: f32, kin: &Kinematics, tau: f64) -> Vec3 {
    let scaled = target * kin.target_scale;
    let phase = wrapped_phase(tau, kin.noise_frequency) + seed * SEED_PHASE_SPREAD;
    let (s, c) = phase.sin_cos();
    let breathing = Vec3::new(s, c, s) * kin.noise_amplitude;
    rotate_y(scaled + breathing, wrapped_phase(tau, kin.rotation_speed))
}

/// Advance `current` one frame toward the gesture-shaped targets.
///
/// Buffers are walked in lockstep; a length mismatch only steps the common
/// prefix.
pub fn step_in_place(current: &mut [Vec3], targets: &[Vec3], seeds: &[f32], frame: &FrameParams) {
    debug_assert_eq!(current.len(), targets.len());
    debug_assert_eq!(current.len(), seeds.len());
    let alpha = frame
        .lerp_mode
        .factor(frame.kinematics.lerp_speed, frame.dt);
    for ((pos, target), seed) in current.iter_mut().zip(targets).zip(seeds) {
        let desired = desired_position(*target, *seed, &frame.kinematics, frame.tau);
        *pos += (desired - *pos) * alpha;
    }
}

pub fn step(current: &[Vec3], targets: &[Vec3], seeds: &[f32], frame: &FrameParams) -> Vec<Vec3> {
    let mut next = current.to_vec();
    step_in_place(&mut next, targets, seeds, frame);
    next
}

pub fn generate_seeds<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<f32> {
    (0..count).map(|_| rng.gen::<f32>()).collect()
}

/// Particle buffers for one session. The count is fixed at construction;
/// shape changes resample targets in place and keep positions and seeds.
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    shape: ShapeKind,
    profile: KinematicsProfile,
    lerp_mode: LerpMode,
    targets: Vec<Vec3>,
    seeds: Vec<f32>,
    current: Vec<Vec3>,
}

impl ParticleSystem {
    pub fn new<R: Rng + ?Sized>(config: &SessionConfig, rng: &mut R) -> Self {
        let count = config.particle_count.max(1);
        let targets = generate_targets(config.shape, count, rng);
        let seeds = generate_seeds(count, rng);
        let current = targets.clone();
        log::info!(
            "[sim] particles={} shape={} profile={:?} lerp={:?}",
            count,
            config.shape.label(),
            config.profile,
            config.lerp_mode
        );
        Self {
            shape: config.shape,
            profile: config.profile,
            lerp_mode: config.lerp_mode,
            targets,
            seeds,
            current,
        }
    }

    /// Switch shape. Returns `false` (and keeps the targets) when `shape` is
    /// already active.
    pub fn set_shape<R: Rng + ?Sized>(&mut self, shape: ShapeKind, rng: &mut R) -> bool {
        if shape == self.shape {
            return false;
        }
        regenerate_into(shape, &mut self.targets, rng);
        log::info!("[shape] {} -> {}", self.shape.label(), shape.label());
        self.shape = shape;
        true
    }

    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        regenerate_into(self.shape, &mut self.targets, rng);
    }

    pub fn set_profile(&mut self, profile: KinematicsProfile) {
        self.profile = profile;
    }

    pub fn set_lerp_mode(&mut self, lerp_mode: LerpMode) {
        self.lerp_mode = lerp_mode;
    }

    // Returns the kinematics that were applied
    pub fn tick(&mut self, gesture: &GestureState, tau: f64, dt: f32) -> Kinematics {
        let frame = FrameParams {
            kinematics: kinematics(gesture.hand_state, self.profile),
            tau,
            dt,
            lerp_mode: self.lerp_mode,
        };
        self.apply(&frame);
        frame.kinematics
    }

    pub fn apply(&mut self, frame: &FrameParams) {
        step_in_place(&mut self.current, &self.targets, &self.seeds, frame);
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.current
    }

    #[inline]
    pub fn targets(&self) -> &[Vec3] {
        &self.targets
    }

    #[inline]
    pub fn seeds(&self) -> &[f32] {
        &self.seeds
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn profile(&self) -> KinematicsProfile {
        self.profile
    }

    pub fn lerp_mode(&self) -> LerpMode {
        self.lerp_mode
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}
