use crate::gesture::HandState;
use crate::shapes::ShapeKind;

/// User-level actions shared by the keyboard handlers of both frontends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SelectShape(ShapeKind),
    NextShape,
    Regenerate,
    /// Local stand-in for the remote classifier.
    Gesture(HandState),
    ToggleAutoColor,
    Palette(isize),
    ToggleProfile,
    ToggleLerpMode,
}

/// Map a key name (winit logical key text or `KeyboardEvent.key`) to a command.
#[inline]
pub fn command_for_key(key: &str) -> Option<Command> {
    if let Some(shape) = shape_for_digit(key) {
        return Some(Command::SelectShape(shape));
    }
    if let Some(state) = gesture_for_key(key) {
        return Some(Command::Gesture(state));
    }
    match key {
        "Tab" => Some(Command::NextShape),
        "r" | "R" => Some(Command::Regenerate),
        "a" | "A" => Some(Command::ToggleAutoColor),
        "]" => Some(Command::Palette(1)),
        "[" => Some(Command::Palette(-1)),
        "h" | "H" => Some(Command::ToggleProfile),
        "f" | "F" => Some(Command::ToggleLerpMode),
        _ => None,
    }
}

#[inline]
pub fn shape_for_digit(key: &str) -> Option<ShapeKind> {
    match key {
        "1" => Some(ShapeKind::Sphere),
        "2" => Some(ShapeKind::Cube),
        "3" => Some(ShapeKind::Torus),
        "4" => Some(ShapeKind::Helix),
        "5" => Some(ShapeKind::Trefoil),
        "6" => Some(ShapeKind::Galaxy),
        _ => None,
    }
}

#[inline]
pub fn gesture_for_key(key: &str) -> Option<HandState> {
    match key {
        "i" | "I" => Some(HandState::Idle),
        "o" | "O" => Some(HandState::Open),
        "c" | "C" => Some(HandState::Closed),
        "p" | "P" => Some(HandState::Pinch),
        _ => None,
    }
}
