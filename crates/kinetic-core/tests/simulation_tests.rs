// Host-side tests for the simulation stepper and the particle system.

use glam::Vec3;
use kinetic_core::{
    desired_position, generate_seeds, generate_targets, kinematics, step, FrameParams,
    GestureState, HandState, KinematicsProfile, LerpMode, ParticleSystem, SessionConfig,
    ShapeKind,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn frame(state: HandState, tau: f64) -> FrameParams {
    FrameParams {
        kinematics: kinematics(state, KinematicsProfile::Calm),
        tau,
        dt: 1.0 / 60.0,
        lerp_mode: LerpMode::PerFrame,
    }
}

fn gesture(hand_state: HandState) -> GestureState {
    GestureState {
        hand_state,
        confidence: 1.0,
        is_tracking: true,
    }
}

#[test]
fn step_preserves_length_and_finiteness() {
    let mut rng = rng();
    let targets = generate_targets(ShapeKind::Galaxy, 300, &mut rng);
    let seeds = generate_seeds(300, &mut rng);
    let mut current = vec![Vec3::ZERO; 300];
    for i in 0..200 {
        current = step(&current, &targets, &seeds, &frame(HandState::Pinch, f64::from(i) * 0.016));
        assert_eq!(current.len(), 300);
        assert!(current.iter().all(|p| p.is_finite()));
    }
}

#[test]
fn step_is_pure() {
    let mut rng = rng();
    let targets = generate_targets(ShapeKind::Torus, 64, &mut rng);
    let seeds = generate_seeds(64, &mut rng);
    let current = generate_targets(ShapeKind::Cube, 64, &mut rng);
    let f = frame(HandState::Open, 3.25);
    assert_eq!(step(&current, &targets, &seeds, &f), step(&current, &targets, &seeds, &f));
}

#[test]
fn each_frame_closes_a_fixed_fraction_of_the_gap() {
    let mut rng = rng();
    let targets = generate_targets(ShapeKind::Sphere, 100, &mut rng);
    let seeds = generate_seeds(100, &mut rng);
    let current = generate_targets(ShapeKind::Cube, 100, &mut rng);
    let f = frame(HandState::Open, 1.5);
    let next = step(&current, &targets, &seeds, &f);
    for i in 0..100 {
        let desired = desired_position(targets[i], seeds[i], &f.kinematics, f.tau);
        let moved = (next[i] - current[i]).length();
        let expected = f.kinematics.lerp_speed * (desired - current[i]).length();
        assert!((moved - expected).abs() < 1e-4, "particle {i}: {moved} vs {expected}");
    }
}

#[test]
fn convergence_is_monotone_with_a_fixed_goal() {
    let mut rng = rng();
    let targets = generate_targets(ShapeKind::Helix, 50, &mut rng);
    let seeds = generate_seeds(50, &mut rng);
    for lerp in [0.01, 0.05, 0.5, 0.99] {
        let mut f = frame(HandState::Open, 0.75);
        f.kinematics.lerp_speed = lerp;
        let desired: Vec<Vec3> = targets
            .iter()
            .zip(&seeds)
            .map(|(t, s)| desired_position(*t, *s, &f.kinematics, f.tau))
            .collect();
        let distance = |current: &[Vec3]| -> f32 {
            current.iter().zip(&desired).map(|(c, d)| (*d - *c).length()).sum()
        };

        let mut current = vec![Vec3::new(5.0, -5.0, 5.0); 50];
        let mut last = distance(&current);
        for _ in 0..50 {
            current = step(&current, &targets, &seeds, &f);
            let now = distance(&current);
            assert!(now < last || now < 1e-3, "lerp {lerp}: {now} >= {last}");
            last = now;
        }
    }
}

#[test]
fn full_lerp_lands_on_the_goal() {
    let mut rng = rng();
    let targets = generate_targets(ShapeKind::Trefoil, 20, &mut rng);
    let seeds = generate_seeds(20, &mut rng);
    let mut f = frame(HandState::Closed, 2.0);
    f.kinematics.lerp_speed = 1.0;
    let next = step(&vec![Vec3::ZERO; 20], &targets, &seeds, &f);
    for i in 0..20 {
        let desired = desired_position(targets[i], seeds[i], &f.kinematics, f.tau);
        assert!((next[i] - desired).length() < 1e-5);
    }
}

#[test]
fn explode_then_relax_scales_the_cloud() {
    let mut rng = rng();
    let targets = generate_targets(ShapeKind::Sphere, 200, &mut rng);
    let seeds = generate_seeds(200, &mut rng);
    let mut current = targets.clone();

    // Noise off and tau held at zero so the goal is exactly scale * target
    let run = |current: &mut Vec<Vec3>, state: HandState| {
        let mut f = frame(state, 0.0);
        f.kinematics = f.kinematics.without_noise();
        for _ in 0..400 {
            *current = step(current, &targets, &seeds, &f);
        }
    };

    run(&mut current, HandState::Open);
    for (c, t) in current.iter().zip(&targets) {
        assert!((c.length() - 2.5 * t.length()).abs() < 1e-3);
    }
    run(&mut current, HandState::Idle);
    for (c, t) in current.iter().zip(&targets) {
        assert!((c.length() - t.length()).abs() < 1e-3);
    }
}

#[test]
fn rotation_preserves_the_distance_from_the_axis() {
    let kin = kinematics(HandState::Idle, KinematicsProfile::Hyper).without_noise();
    let target = Vec3::new(1.0, 0.5, -2.0);
    for tau in [0.0, 0.3, 7.0, 100.0] {
        let p = desired_position(target, 0.4, &kin, tau);
        assert!((p.y - target.y).abs() < 1e-5);
        assert!((p.length() - target.length()).abs() < 1e-4);
    }
}

#[test]
fn frame_rate_independent_lerp_matches_at_reference_rate() {
    let mode = LerpMode::FrameRateIndependent { reference_fps: 60.0 };
    for lerp in [0.04, 0.05, 0.08, 0.10] {
        assert!((mode.factor(lerp, 1.0 / 60.0) - lerp).abs() < 1e-5);
        // Two frames at 120 Hz move as far as one at 60 Hz
        let half = mode.factor(lerp, 1.0 / 120.0);
        let combined = 1.0 - (1.0 - half) * (1.0 - half);
        assert!((combined - lerp).abs() < 1e-5);
    }
    assert_eq!(mode.factor(0.1, 0.0), 0.0);
    assert_eq!(LerpMode::PerFrame.factor(0.1, 0.5), 0.1);
}

#[test]
fn system_starts_on_its_targets() {
    let config = SessionConfig::default().with_particle_count(500);
    let system = ParticleSystem::new(&config, &mut rng());
    assert_eq!(system.len(), 500);
    assert_eq!(system.positions(), system.targets());
    assert!(system.seeds().iter().all(|s| (0.0..1.0).contains(s)));
}

#[test]
fn zero_particles_is_raised_to_one() {
    let config = SessionConfig {
        particle_count: 0,
        ..SessionConfig::default()
    };
    let system = ParticleSystem::new(&config, &mut rng());
    assert_eq!(system.len(), 1);
    assert!(!system.is_empty());
}

#[test]
fn same_shape_does_not_regenerate() {
    let mut rng = rng();
    let mut system = ParticleSystem::new(&SessionConfig::default().with_particle_count(100), &mut rng);
    let before = system.targets().to_vec();
    assert!(!system.set_shape(ShapeKind::Sphere, &mut rng));
    assert_eq!(system.targets(), before.as_slice());
}

#[test]
fn shape_change_keeps_seeds_and_current_positions() {
    let mut rng = rng();
    let mut system = ParticleSystem::new(&SessionConfig::default().with_particle_count(100), &mut rng);
    system.tick(&gesture(HandState::Open), 0.5, 1.0 / 60.0);
    let seeds = system.seeds().to_vec();
    let positions = system.positions().to_vec();
    let targets = system.targets().to_vec();

    assert!(system.set_shape(ShapeKind::Galaxy, &mut rng));
    assert_eq!(system.shape(), ShapeKind::Galaxy);
    assert_eq!(system.seeds(), seeds.as_slice());
    assert_eq!(system.positions(), positions.as_slice());
    assert_ne!(system.targets(), targets.as_slice());
    assert_eq!(system.targets().len(), 100);
}

#[test]
fn regenerate_resamples_without_changing_shape() {
    let mut rng = rng();
    let mut system = ParticleSystem::new(
        &SessionConfig::default()
            .with_particle_count(64)
            .with_shape(ShapeKind::Cube),
        &mut rng,
    );
    let before = system.targets().to_vec();
    system.regenerate(&mut rng);
    assert_eq!(system.shape(), ShapeKind::Cube);
    assert_ne!(system.targets(), before.as_slice());
}

#[test]
fn tick_reports_the_kinematics_it_applied() {
    let mut system = ParticleSystem::new(&SessionConfig::default().with_particle_count(10), &mut rng());
    system.set_profile(KinematicsProfile::Hyper);
    let applied = system.tick(&gesture(HandState::Pinch), 1.0, 1.0 / 60.0);
    assert_eq!(applied, kinematics(HandState::Pinch, KinematicsProfile::Hyper));
}

#[test]
fn goal_stays_exact_hours_into_a_session() {
    let target = Vec3::new(2.0, 0.5, -3.0);
    let seed = 0.37_f32;
    for (state, profile) in [
        (HandState::Idle, KinematicsProfile::Calm),
        (HandState::Pinch, KinematicsProfile::Hyper),
    ] {
        let kin = kinematics(state, profile);
        for tau in [8.0 * 3600.0 + 0.123, 30.0 * 3600.0 + 0.987] {
            let phase = tau * f64::from(kin.noise_frequency) + f64::from(seed) * 10.0;
            let amp = f64::from(kin.noise_amplitude);
            let scale = f64::from(kin.target_scale);
            let dx = f64::from(target.x) * scale + phase.sin() * amp;
            let dy = f64::from(target.y) * scale + phase.cos() * amp;
            let dz = f64::from(target.z) * scale + phase.sin() * amp;
            let (s, c) = (tau * f64::from(kin.rotation_speed)).sin_cos();
            let expected = Vec3::new(
                (dx * c - dz * s) as f32,
                dy as f32,
                (dx * s + dz * c) as f32,
            );

            let p = desired_position(target, seed, &kin, tau);
            assert!((p - expected).length() < 1e-4, "{state:?} at {tau}: {p} vs {expected}");
        }
    }
}
