// Host-side tests for session configuration, color handling and controls.

use kinetic_core::{
    auto_cycle_hue, command_for_key, parse_hex_color, to_hex, ColorState, Command, ConfigError,
    HandState, KinematicsProfile, LerpMode, SessionConfig, ShapeKind, ENV_COLOR, ENV_LERP_FPS,
    ENV_PARTICLES, ENV_PROFILE, ENV_SHAPE,
};
use std::collections::HashMap;

fn lookup(pairs: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<&str, &str> = pairs.iter().copied().collect();
    move |key: &str| map.get(key).map(|v| v.to_string())
}

#[test]
fn empty_lookup_gives_defaults() {
    let config = SessionConfig::from_lookup(|_| None).unwrap();
    assert_eq!(config, SessionConfig::default());
    assert_eq!(config.particle_count, 4000);
    assert_eq!(config.shape, ShapeKind::Sphere);
    assert_eq!(config.lerp_mode, LerpMode::PerFrame);
}

#[test]
fn lookup_reads_every_key() {
    let config = SessionConfig::from_lookup(lookup(&[
        (ENV_PARTICLES, "1200"),
        (ENV_SHAPE, "galaxy"),
        (ENV_COLOR, "#ff00ff"),
        (ENV_PROFILE, "hyper"),
        (ENV_LERP_FPS, "60"),
    ]))
    .unwrap();
    assert_eq!(config.particle_count, 1200);
    assert_eq!(config.shape, ShapeKind::Galaxy);
    assert_eq!(config.color, ColorState::Fixed([1.0, 0.0, 1.0]));
    assert_eq!(config.profile, KinematicsProfile::Hyper);
    assert_eq!(
        config.lerp_mode,
        LerpMode::FrameRateIndependent { reference_fps: 60.0 }
    );
}

#[test]
fn unknown_shape_is_not_an_error() {
    let config = SessionConfig::from_lookup(lookup(&[(ENV_SHAPE, "pyramid")])).unwrap();
    assert_eq!(config.shape, ShapeKind::Sphere);
}

#[test]
fn rejects_bad_values() {
    assert!(matches!(
        SessionConfig::from_lookup(lookup(&[(ENV_PARTICLES, "0")])),
        Err(ConfigError::ParticleCount { .. })
    ));
    assert!(matches!(
        SessionConfig::from_lookup(lookup(&[(ENV_PARTICLES, "lots")])),
        Err(ConfigError::ParticleCount { .. })
    ));
    assert!(matches!(
        SessionConfig::from_lookup(lookup(&[(ENV_COLOR, "#12345")])),
        Err(ConfigError::Color { .. })
    ));
    assert!(matches!(
        SessionConfig::from_lookup(lookup(&[(ENV_PROFILE, "frantic")])),
        Err(ConfigError::Profile { .. })
    ));
    for fps in ["0", "-30", "NaN", "inf", "fast"] {
        assert!(matches!(
            SessionConfig::from_lookup(lookup(&[(ENV_LERP_FPS, fps)])),
            Err(ConfigError::ReferenceFps { .. })
        ));
    }
}

#[test]
fn config_errors_name_the_key() {
    let err = SessionConfig::from_lookup(lookup(&[(ENV_COLOR, "teal")])).unwrap_err();
    assert!(err.to_string().starts_with(ENV_COLOR));
}

#[test]
fn hex_colors_parse_in_all_supported_forms() {
    let cyan = [0.0, 1.0, 1.0];
    assert_eq!(parse_hex_color("#00ffff").unwrap(), cyan);
    assert_eq!(parse_hex_color("00FFFF").unwrap(), cyan);
    assert_eq!(parse_hex_color("#0ff").unwrap(), cyan);
    for bad in ["", "#", "#00ff", "#00ffzz", "#00ffff00", "cyan"] {
        assert!(parse_hex_color(bad).is_err(), "{bad:?} should not parse");
    }
    assert_eq!(to_hex([1.0, 0.0, 1.0]), "#ff00ff");
}

#[test]
fn color_state_parses_auto_and_hex() {
    assert_eq!("auto".parse::<ColorState>().unwrap(), ColorState::AutoCycle);
    assert_eq!("AUTO".parse::<ColorState>().unwrap(), ColorState::AutoCycle);
    assert!(matches!("#f00".parse::<ColorState>(), Ok(ColorState::Fixed(_))));
    assert_eq!(ColorState::AutoCycle.to_string(), "auto");
    assert_eq!(ColorState::default().to_string(), "#00ffff");
}

#[test]
fn auto_cycle_starts_red_and_wraps_every_five_seconds() {
    assert_eq!(auto_cycle_hue(0.0), 0.0);
    let red = ColorState::AutoCycle.resolve(0.0);
    assert!((red[0] - 1.0).abs() < 1e-5);
    assert!((red[1] - 0.2).abs() < 1e-5);
    assert!((red[2] - 0.2).abs() < 1e-5);

    for tau in [0.7, 1.9, 3.3] {
        assert!((auto_cycle_hue(tau) - auto_cycle_hue(tau + 5.0)).abs() < 1e-4);
    }
    assert!((auto_cycle_hue(2.5) - 0.5).abs() < 1e-6);
}

#[test]
fn auto_cycle_keeps_moving_smoothly_after_hours() {
    let tau = 10.0 * 3600.0;
    let step = auto_cycle_hue(tau + 0.01) - auto_cycle_hue(tau);
    assert!((step - 0.002).abs() < 1e-6, "{step}");
}

#[test]
fn fixed_color_ignores_time() {
    let color = ColorState::Fixed([0.25, 0.5, 0.75]);
    assert_eq!(color.resolve(0.0), color.resolve(123.4));
}

#[test]
fn keys_map_to_commands() {
    assert_eq!(command_for_key("1"), Some(Command::SelectShape(ShapeKind::Sphere)));
    assert_eq!(command_for_key("6"), Some(Command::SelectShape(ShapeKind::Galaxy)));
    assert_eq!(command_for_key("Tab"), Some(Command::NextShape));
    assert_eq!(command_for_key("o"), Some(Command::Gesture(HandState::Open)));
    assert_eq!(command_for_key("P"), Some(Command::Gesture(HandState::Pinch)));
    assert_eq!(command_for_key("a"), Some(Command::ToggleAutoColor));
    assert_eq!(command_for_key("]"), Some(Command::Palette(1)));
    assert_eq!(command_for_key("["), Some(Command::Palette(-1)));
    assert_eq!(command_for_key("7"), None);
    assert_eq!(command_for_key("z"), None);
}
