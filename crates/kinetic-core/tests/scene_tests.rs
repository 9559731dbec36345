// Host-side tests for the orbit camera and the frame-level scene.

use kinetic_core::constants::{CAMERA_DISTANCE, CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE, PALETTE};
use kinetic_core::{
    auto_rotate_rate, ColorState, Command, GestureMailbox, HandState, KinematicsProfile,
    LerpMode, OrbitCamera, Scene, SessionConfig, ShapeKind,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn scene() -> (Scene, StdRng) {
    let mut rng = StdRng::seed_from_u64(3);
    let config = SessionConfig::default().with_particle_count(200);
    let scene = Scene::new(&config, Arc::new(GestureMailbox::new()), 800, 600, &mut rng);
    (scene, rng)
}

#[test]
fn camera_starts_eight_units_out_on_z() {
    let camera = OrbitCamera::new(1.0);
    let eye = camera.eye();
    assert!((eye.z - CAMERA_DISTANCE).abs() < 1e-5);
    assert!(eye.x.abs() < 1e-5 && eye.y.abs() < 1e-5);
}

#[test]
fn zoom_is_clamped() {
    let mut camera = OrbitCamera::new(1.0);
    camera.zoom(1000.0);
    assert_eq!(camera.distance, CAMERA_MIN_DISTANCE);
    camera.zoom(-1000.0);
    assert_eq!(camera.distance, CAMERA_MAX_DISTANCE);
}

#[test]
fn orbit_pitch_never_flips_over_the_pole() {
    let mut camera = OrbitCamera::new(1.0);
    camera.orbit(0.0, 1.0e6);
    assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
    camera.orbit(0.0, -2.0e6);
    assert!(camera.pitch > -std::f32::consts::FRAC_PI_2);
}

#[test]
fn auto_rotation_only_runs_while_idle() {
    let mut camera = OrbitCamera::new(1.0);
    for state in [HandState::Open, HandState::Closed, HandState::Pinch] {
        camera.update(1.0, state);
        assert_eq!(camera.yaw, 0.0, "{state:?}");
    }
    camera.update(2.0, HandState::Idle);
    assert!((camera.yaw - 2.0 * auto_rotate_rate()).abs() < 1e-6);
    // One full turn every two minutes
    assert!((auto_rotate_rate() * 120.0 - std::f32::consts::TAU).abs() < 1e-4);
}

#[test]
fn advance_reads_the_mailbox() {
    let (mut scene, _) = scene();
    assert_eq!(scene.advance(0.0).hand_state, HandState::Idle);
    scene.mailbox().publish(HandState::Open);
    assert_eq!(scene.advance(0.016).hand_state, HandState::Open);
    assert_eq!(scene.hand_state(), HandState::Open);
    // Silence keeps the last gesture
    assert_eq!(scene.advance(10.0).hand_state, HandState::Open);
}

#[test]
fn keyboard_gestures_go_through_the_mailbox() {
    let (mut scene, mut rng) = scene();
    scene.apply(Command::Gesture(HandState::Pinch), &mut rng);
    assert_eq!(scene.mailbox().hand_state(), HandState::Pinch);
    assert_eq!(scene.mailbox().updates(), 1);
}

#[test]
fn shape_commands_switch_and_cycle() {
    let (mut scene, mut rng) = scene();
    scene.apply(Command::SelectShape(ShapeKind::Helix), &mut rng);
    assert_eq!(scene.system().shape(), ShapeKind::Helix);
    scene.apply(Command::NextShape, &mut rng);
    assert_eq!(scene.system().shape(), ShapeKind::Trefoil);
    assert_eq!(scene.positions().len(), 200);
}

#[test]
fn color_commands_toggle_auto_and_walk_the_palette() {
    let (mut scene, mut rng) = scene();
    assert_eq!(scene.color(), ColorState::Fixed(PALETTE[0]));
    scene.apply(Command::ToggleAutoColor, &mut rng);
    assert!(scene.color().is_auto());
    scene.apply(Command::ToggleAutoColor, &mut rng);
    assert_eq!(scene.color(), ColorState::Fixed(PALETTE[0]));

    scene.apply(Command::Palette(1), &mut rng);
    assert_eq!(scene.color(), ColorState::Fixed(PALETTE[1]));
    scene.apply(Command::Palette(-2), &mut rng);
    assert_eq!(scene.color(), ColorState::Fixed(PALETTE[PALETTE.len() - 1]));
}

#[test]
fn auto_color_off_restores_the_last_fixed_color() {
    let (mut scene, mut rng) = scene();
    let magenta = ColorState::Fixed([1.0, 0.0, 1.0]);
    scene.set_color(magenta);
    scene.set_auto_color(true);
    assert!(scene.color().is_auto());
    scene.set_auto_color(true);
    assert!(scene.color().is_auto());
    scene.set_auto_color(false);
    assert_eq!(scene.color(), magenta);

    scene.apply(Command::ToggleAutoColor, &mut rng);
    scene.apply(Command::ToggleAutoColor, &mut rng);
    assert_eq!(scene.color(), magenta);
}

#[test]
fn auto_color_session_falls_back_to_the_palette() {
    let mut rng = StdRng::seed_from_u64(5);
    let config = SessionConfig {
        color: ColorState::AutoCycle,
        ..SessionConfig::default().with_particle_count(10)
    };
    let mut scene = Scene::new(&config, Arc::new(GestureMailbox::new()), 800, 600, &mut rng);
    assert!(scene.color().is_auto());
    scene.set_auto_color(false);
    assert_eq!(scene.color(), ColorState::Fixed(PALETTE[0]));
}

#[test]
fn toggles_flip_profile_and_lerp_mode() {
    let (mut scene, mut rng) = scene();
    scene.apply(Command::ToggleProfile, &mut rng);
    assert_eq!(scene.system().profile(), KinematicsProfile::Hyper);
    scene.apply(Command::ToggleLerpMode, &mut rng);
    assert!(matches!(
        scene.system().lerp_mode(),
        LerpMode::FrameRateIndependent { .. }
    ));
    scene.apply(Command::ToggleLerpMode, &mut rng);
    assert_eq!(scene.system().lerp_mode(), LerpMode::PerFrame);
}

#[test]
fn status_line_reports_link_gesture_and_shape() {
    let (mut scene, _) = scene();
    scene.advance(0.0);
    assert_eq!(scene.status_line(), "KINETIC PARTICLES | OFFLINE | Idle | Sphere");

    scene.mailbox().set_connected(true);
    scene.mailbox().publish(HandState::Closed);
    scene.advance(0.1);
    assert_eq!(
        scene.status_line(),
        "KINETIC PARTICLES | LIVE | Contracting | Sphere"
    );
}
