//! Session configuration fixed at startup.
//!
//! Defaults come from `constants`; front-ends may override them from the
//! environment (native) or from JS (web).

use crate::color::ColorState;
use crate::constants::PARTICLE_COUNT;
use crate::error::ConfigError;
use crate::gesture::KinematicsProfile;
use crate::shapes::ShapeKind;
use crate::simulation::LerpMode;

pub const ENV_PARTICLES: &str = "KINETIC_PARTICLES";
pub const ENV_SHAPE: &str = "KINETIC_SHAPE";
pub const ENV_COLOR: &str = "KINETIC_COLOR";
pub const ENV_PROFILE: &str = "KINETIC_PROFILE";
pub const ENV_LERP_FPS: &str = "KINETIC_LERP_FPS";

#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub particle_count: usize,
    pub shape: ShapeKind,
    pub color: ColorState,
    pub profile: KinematicsProfile,
    pub lerp_mode: LerpMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            shape: ShapeKind::default(),
            color: ColorState::default(),
            profile: KinematicsProfile::default(),
            lerp_mode: LerpMode::default(),
        }
    }
}

impl SessionConfig {
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count.max(1);
        self
    }

    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_color(mut self, color: ColorState) -> Self {
        self.color = color;
        self
    }

    pub fn with_profile(mut self, profile: KinematicsProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_lerp_mode(mut self, lerp_mode: LerpMode) -> Self {
        self.lerp_mode = lerp_mode;
        self
    }

    /// Build a config from key lookups (e.g. environment variables).
    ///
    /// Missing keys keep their defaults. The shape never fails to parse
    /// (unknown ids become a sphere); other malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_PARTICLES) {
            let count = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::ParticleCount {
                    key: ENV_PARTICLES,
                    value: raw.clone(),
                })?;
            config = config.with_particle_count(count);
        }
        if let Some(raw) = lookup(ENV_SHAPE) {
            config = config.with_shape(ShapeKind::from_id(&raw));
        }
        if let Some(raw) = lookup(ENV_COLOR) {
            let color = raw.parse::<ColorState>().map_err(|source| ConfigError::Color {
                key: ENV_COLOR,
                source,
            })?;
            config = config.with_color(color);
        }
        if let Some(raw) = lookup(ENV_PROFILE) {
            let profile =
                KinematicsProfile::from_name(&raw).ok_or_else(|| ConfigError::Profile {
                    key: ENV_PROFILE,
                    value: raw.clone(),
                })?;
            config = config.with_profile(profile);
        }
        if let Some(raw) = lookup(ENV_LERP_FPS) {
            let reference_fps = raw
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|fps| fps.is_finite() && *fps > 0.0)
                .ok_or_else(|| ConfigError::ReferenceFps {
                    key: ENV_LERP_FPS,
                    value: raw.clone(),
                })?;
            config = config.with_lerp_mode(LerpMode::FrameRateIndependent { reference_fps });
        }
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}
