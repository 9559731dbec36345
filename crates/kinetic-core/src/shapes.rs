//! Target geometry for the particle cloud.
//!
//! Every shape is sampled point by point with fresh uniform draws, so two
//! generations of the same shape share a distribution but not positions.

use crate::constants::*;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    #[default]
    Sphere,
    Cube,
    Torus,
    Helix,
    Trefoil,
    Galaxy,
}

/// Draws the target point for particle `index`.
pub type Sampler<R> = fn(&mut R, usize) -> Vec3;

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Sphere,
        ShapeKind::Cube,
        ShapeKind::Torus,
        ShapeKind::Helix,
        ShapeKind::Trefoil,
        ShapeKind::Galaxy,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ShapeKind::Sphere => "SPHERE",
            ShapeKind::Cube => "CUBE",
            ShapeKind::Torus => "TORUS",
            ShapeKind::Helix => "DNA",
            ShapeKind::Trefoil => "TARDFYOU",
            ShapeKind::Galaxy => "GALAXY",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Cube => "Cube",
            ShapeKind::Torus => "Vortex",
            ShapeKind::Helix => "Helix",
            ShapeKind::Trefoil => "Tardfyou",
            ShapeKind::Galaxy => "Hyper Galaxy",
        }
    }

    /// Resolve an identifier, label or 1-based position. Never fails:
    /// anything unrecognised is a sphere.
    pub fn from_id(id: &str) -> Self {
        let id = id.trim();
        if let Ok(n) = id.parse::<usize>() {
            return n.checked_sub(1).map_or(ShapeKind::Sphere, Self::from_index);
        }
        let found = Self::ALL.into_iter().find(|s| {
            s.id().eq_ignore_ascii_case(id)
                || s.label().eq_ignore_ascii_case(id)
                || format!("{s:?}").eq_ignore_ascii_case(id)
        });
        match found {
            Some(shape) => shape,
            None => {
                log::debug!("[shape] unknown id {id:?}, using sphere");
                ShapeKind::Sphere
            }
        }
    }

    /// 0-based lookup into [`ShapeKind::ALL`]; out of range is a sphere.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::from_index((self.index() + 1) % Self::ALL.len())
    }

    pub fn sampler<R: Rng + ?Sized>(self) -> Sampler<R> {
        match self {
            ShapeKind::Sphere => sample_sphere::<R>,
            ShapeKind::Cube => sample_cube::<R>,
            ShapeKind::Torus => sample_torus::<R>,
            ShapeKind::Helix => sample_helix::<R>,
            ShapeKind::Trefoil => sample_trefoil::<R>,
            ShapeKind::Galaxy => sample_galaxy::<R>,
        }
    }
}

pub fn generate_targets<R: Rng + ?Sized>(shape: ShapeKind, count: usize, rng: &mut R) -> Vec<Vec3> {
    let sample = shape.sampler::<R>();
    (0..count).map(|i| sample(rng, i)).collect()
}

/// Resample `shape` into an existing buffer without changing its length.
pub fn regenerate_into<R: Rng + ?Sized>(shape: ShapeKind, out: &mut [Vec3], rng: &mut R) {
    let sample = shape.sampler::<R>();
    for (i, p) in out.iter_mut().enumerate() {
        *p = sample(rng, i);
    }
}

#[inline]
fn signed<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * 2.0 * half
}

// Cube-root radius keeps density uniform by volume.
fn sample_sphere<R: Rng + ?Sized>(rng: &mut R, _index: usize) -> Vec3 {
    let r = SPHERE_RADIUS * rng.gen::<f32>().cbrt();
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
        r * phi.sin() * theta.cos(),
    )
}

fn sample_cube<R: Rng + ?Sized>(rng: &mut R, _index: usize) -> Vec3 {
    Vec3::new(
        signed(rng, CUBE_HALF_EXTENT),
        signed(rng, CUBE_HALF_EXTENT),
        signed(rng, CUBE_HALF_EXTENT),
    )
}

fn sample_torus<R: Rng + ?Sized>(rng: &mut R, _index: usize) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = rng.gen::<f32>() * TAU;
    let ring = TORUS_MAJOR_RADIUS + TORUS_MINOR_RADIUS * phi.cos();
    Vec3::new(
        ring * theta.cos(),
        ring * theta.sin(),
        TORUS_MINOR_RADIUS * phi.sin(),
    )
}

fn sample_helix<R: Rng + ?Sized>(rng: &mut R, _index: usize) -> Vec3 {
    let t = signed(rng, HELIX_HALF_HEIGHT);
    let strand = if rng.gen::<bool>() { 0.0 } else { PI };
    let angle = t * HELIX_FREQUENCY + strand;
    Vec3::new(
        HELIX_RADIUS * angle.cos() + signed(rng, HELIX_JITTER),
        t,
        HELIX_RADIUS * angle.sin() + signed(rng, HELIX_JITTER),
    )
}

fn sample_trefoil<R: Rng + ?Sized>(rng: &mut R, _index: usize) -> Vec3 {
    let t = rng.gen::<f32>() * 2.0 * TAU;
    let curve = TREFOIL_SCALE
        * Vec3::new(
            t.sin() + 2.0 * (2.0 * t).sin(),
            t.cos() - 2.0 * (2.0 * t).cos(),
            -(3.0 * t).sin(),
        );
    curve
        + Vec3::new(
            signed(rng, TREFOIL_JITTER),
            signed(rng, TREFOIL_JITTER),
            signed(rng, TREFOIL_JITTER),
        )
}

// Arms are assigned round-robin; cubing the radial draw packs the core.
fn sample_galaxy<R: Rng + ?Sized>(rng: &mut R, index: usize) -> Vec3 {
    let arm = index % GALAXY_ARMS;
    let r = GALAXY_RADIUS * rng.gen::<f32>().powi(3);
    let branch = arm as f32 / GALAXY_ARMS as f32 * TAU;
    let angle = branch + r * GALAXY_SPIN;
    let half_height = GALAXY_THICKNESS / (r + GALAXY_THICKNESS_EPS);
    let disk = Vec3::new(angle.cos() * r, signed(rng, half_height), angle.sin() * r);
    disk + Vec3::new(
        signed(rng, GALAXY_STAR_DUST),
        signed(rng, GALAXY_STAR_DUST),
        signed(rng, GALAXY_STAR_DUST),
    )
}
