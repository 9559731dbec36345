//! Hand gestures and the latest-value mailbox the classifier writes into.
//! Frames never wait on the classifier; silence keeps the last state.

use crate::constants::*;
use crate::error::{GestureParseError, HandStateParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicU8, Ordering};

#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HandState {
    #[default]
    Idle = 0,
    Open = 1,
    Closed = 2,
    Pinch = 3,
}

impl HandState {
    pub const ALL: [HandState; 4] = [
        HandState::Idle,
        HandState::Open,
        HandState::Closed,
        HandState::Pinch,
    ];

    pub fn id(self) -> &'static str {
        match self {
            HandState::Idle => "IDLE",
            HandState::Open => "OPEN",
            HandState::Closed => "CLOSED",
            HandState::Pinch => "PINCH",
        }
    }

    pub fn status_label(self) -> &'static str {
        match self {
            HandState::Idle => "Idle",
            HandState::Open => "Exploding",
            HandState::Closed => "Contracting",
            HandState::Pinch => "Aggregating",
        }
    }

    // Fist or pinch: implode and jitter
    #[inline]
    pub fn is_compressed(self) -> bool {
        matches!(self, HandState::Closed | HandState::Pinch)
    }

    #[inline]
    pub fn is_interacting(self) -> bool {
        self != HandState::Idle
    }

    fn from_u8(raw: u8) -> Self {
        Self::ALL.get(raw as usize).copied().unwrap_or_default()
    }
}

impl fmt::Display for HandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for HandState {
    type Err = HandStateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|h| h.id().eq_ignore_ascii_case(token))
            .ok_or_else(|| HandStateParseError(token.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    pub hand_state: HandState,
    pub confidence: f32,
    pub is_tracking: bool,
}

/// Which kinematics table to use. `Hyper` has stronger noise and a much
/// faster spin when compressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KinematicsProfile {
    #[default]
    Calm,
    Hyper,
}

impl KinematicsProfile {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "calm" | "classic" | "1" => Some(KinematicsProfile::Calm),
            "hyper" | "galaxy" | "2" => Some(KinematicsProfile::Hyper),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    pub target_scale: f32,
    pub noise_amplitude: f32,
    pub noise_frequency: f32,
    pub rotation_speed: f32,
    /// Fraction of the remaining distance closed per frame.
    pub lerp_speed: f32,
}

impl Kinematics {
    pub fn without_noise(self) -> Self {
        Self {
            noise_amplitude: 0.0,
            ..self
        }
    }
}

struct Regime {
    amplitude: f32,
    frequency: f32,
    rotation: f32,
}

struct ProfileTable {
    loose: Regime,
    compressed: Regime,
    lerp_active: f32,
    lerp_idle: f32,
}

const CALM: ProfileTable = ProfileTable {
    loose: Regime {
        amplitude: 0.10,
        frequency: 2.0,
        rotation: 0.2,
    },
    compressed: Regime {
        amplitude: 0.02,
        frequency: 15.0,
        rotation: 0.5,
    },
    lerp_active: 0.10,
    lerp_idle: 0.05,
};

const HYPER: ProfileTable = ProfileTable {
    loose: Regime {
        amplitude: 0.15,
        frequency: 1.5,
        rotation: 0.5,
    },
    compressed: Regime {
        amplitude: 0.05,
        frequency: 20.0,
        rotation: 4.0,
    },
    lerp_active: 0.08,
    lerp_idle: 0.04,
};

pub fn kinematics(state: HandState, profile: KinematicsProfile) -> Kinematics {
    let table = match profile {
        KinematicsProfile::Calm => &CALM,
        KinematicsProfile::Hyper => &HYPER,
    };
    let target_scale = match state {
        HandState::Idle => SCALE_IDLE,
        HandState::Open => SCALE_OPEN,
        HandState::Closed | HandState::Pinch => SCALE_COMPRESSED,
    };
    let regime = if state.is_compressed() {
        &table.compressed
    } else {
        &table.loose
    };
    let lerp_speed = if state.is_interacting() {
        table.lerp_active
    } else {
        table.lerp_idle
    };
    Kinematics {
        target_scale,
        noise_amplitude: regime.amplitude,
        noise_frequency: regime.frequency,
        rotation_speed: regime.rotation,
        lerp_speed,
    }
}

// ---------------- Mailbox ----------------

/// Single-slot latest-gesture register. Writers on any thread and the frame
/// reader never block each other; intermediate updates may be lost.
#[derive(Debug)]
pub struct GestureMailbox {
    hand_state: AtomicU8,
    confidence_bits: AtomicU32,
    tracking: AtomicBool,
    connected: AtomicBool,
    updates: AtomicU64,
}

impl Default for GestureMailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureMailbox {
    pub fn new() -> Self {
        Self {
            hand_state: AtomicU8::new(HandState::Idle as u8),
            confidence_bits: AtomicU32::new(0.0_f32.to_bits()),
            tracking: AtomicBool::new(false),
            connected: AtomicBool::new(false),
            updates: AtomicU64::new(0),
        }
    }

    // Confidence is 1.0 whenever the classifier commits to a state
    pub fn publish(&self, state: HandState) {
        self.hand_state.store(state as u8, Ordering::SeqCst);
        self.confidence_bits
            .store(1.0_f32.to_bits(), Ordering::SeqCst);
        self.updates.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> GestureState {
        GestureState {
            hand_state: HandState::from_u8(self.hand_state.load(Ordering::SeqCst)),
            confidence: f32::from_bits(self.confidence_bits.load(Ordering::SeqCst)),
            is_tracking: self.tracking.load(Ordering::SeqCst),
        }
    }

    #[inline]
    pub fn hand_state(&self) -> HandState {
        HandState::from_u8(self.hand_state.load(Ordering::SeqCst))
    }

    pub fn set_tracking(&self, tracking: bool) {
        self.tracking.store(tracking, Ordering::SeqCst);
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::SeqCst)
    }

    /// Apply a raw transport message. Anything that does not parse is
    /// dropped and the current state is left untouched. A well-formed call
    /// with a bad state still comes back so the caller can acknowledge it.
    pub fn offer(&self, raw: &str) -> Option<GestureUpdate> {
        match parse_gesture_message(raw) {
            Ok(update) => {
                match update.state {
                    Some(state) => self.publish(state),
                    None => log::debug!("[gesture] call without a usable state, keeping current"),
                }
                Some(update)
            }
            Err(e) => {
                log::debug!("[gesture] ignoring message: {e}");
                None
            }
        }
    }
}

// ---------------- Transport messages ----------------

pub const UPDATE_GESTURE_FN: &str = "updateGesture";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub args: GestureArgs,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureArgs {
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateSource {
    Token,
    Call { id: Option<String> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GestureUpdate {
    /// `None` for an `updateGesture` call whose state is missing or unknown.
    pub state: Option<HandState>,
    pub source: UpdateSource,
}

impl GestureUpdate {
    pub fn acknowledgement(&self) -> Option<ToolResponse> {
        match &self.source {
            UpdateSource::Call { id } => Some(ToolResponse::ok(id.clone())),
            UpdateSource::Token => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToolResponse {
    pub id: Option<String>,
    pub name: &'static str,
    pub response: ToolResult,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToolResult {
    pub result: &'static str,
}

impl ToolResponse {
    pub fn ok(id: Option<String>) -> Self {
        Self {
            id,
            name: UPDATE_GESTURE_FN,
            response: ToolResult { result: "ok" },
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Parse either an `updateGesture` JSON call or a bare state token.
///
/// A bare token must name a state. A call only has to be well formed: its
/// state argument is parsed separately and may come back as `None`.
pub fn parse_gesture_message(raw: &str) -> Result<GestureUpdate, GestureParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(GestureParseError::Empty);
    }
    if !raw.starts_with('{') {
        return Ok(GestureUpdate {
            state: Some(raw.parse()?),
            source: UpdateSource::Token,
        });
    }
    let call: FunctionCall = serde_json::from_str(raw)?;
    if call.name != UPDATE_GESTURE_FN {
        return Err(GestureParseError::UnknownFunction(call.name));
    }
    let state = call.args.state.as_deref().and_then(|token| match token.parse() {
        Ok(state) => Some(state),
        Err(e) => {
            log::debug!("[gesture] {e}");
            None
        }
    });
    Ok(GestureUpdate {
        state,
        source: UpdateSource::Call { id: call.id },
    })
}
