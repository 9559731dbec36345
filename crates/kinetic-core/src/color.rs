//! Particle color: a fixed RGB value or a hue that cycles with time.

use crate::constants::*;
use crate::error::ColorParseError;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorState {
    Fixed([f32; 3]),
    AutoCycle,
}

impl Default for ColorState {
    fn default() -> Self {
        ColorState::Fixed(PALETTE[0])
    }
}

impl ColorState {
    pub fn resolve(&self, tau: f64) -> [f32; 3] {
        match self {
            ColorState::Fixed(rgb) => *rgb,
            ColorState::AutoCycle => hsl_to_rgb(auto_cycle_hue(tau), AUTO_SATURATION, AUTO_LIGHTNESS),
        }
    }

    #[inline]
    pub fn is_auto(&self) -> bool {
        matches!(self, ColorState::AutoCycle)
    }
}

impl FromStr for ColorState {
    type Err = ColorParseError;

    /// `auto` (or `cycle`) selects auto-cycle, anything else must be hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") || s.eq_ignore_ascii_case("cycle") {
            return Ok(ColorState::AutoCycle);
        }
        parse_hex_color(s).map(ColorState::Fixed)
    }
}

impl fmt::Display for ColorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorState::Fixed(rgb) => f.write_str(&to_hex(*rgb)),
            ColorState::AutoCycle => f.write_str("auto"),
        }
    }
}

/// Hue in [0, 1) for auto-cycle mode.
#[inline]
pub fn auto_cycle_hue(tau: f64) -> f32 {
    (tau * f64::from(HUE_CYCLE_RATE)).rem_euclid(1.0) as f32
}

/// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb` into 0..1 RGB.
pub fn parse_hex_color(s: &str) -> Result<[f32; 3], ColorParseError> {
    let err = || ColorParseError(s.to_string());
    let hex = s.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(err());
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| err());
    let bytes = match hex.len() {
        6 => [channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?],
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                out[i] = channel(&c.to_string())? * 17;
            }
            out
        }
        _ => return Err(err()),
    };
    Ok(bytes.map(|b| b as f32 / 255.0))
}

pub fn to_hex(rgb: [f32; 3]) -> String {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("#{r:02x}{g:02x}{b:02x}")
}

pub fn palette_color(index: isize) -> [f32; 3] {
    PALETTE[index.rem_euclid(PALETTE.len() as isize) as usize]
}

/// HSL (all components 0..1) to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}
