// File: crates/responsive-chart/src/color.rs
// Summary: RGBA colour type and continuous perceptual colour schemes for sequential scales.

use std::fmt;

use serde::Deserialize;

use crate::geometry::{clamp, lerp};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self { Self { r, g, b, a } }

    /// `const` parser for `0xRRGGBB` literals.
    pub const fn hex(v: u32) -> Self {
        Self::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#')?;
        let byte = |i: usize| u8::from_str_radix(s.get(i..i + 2)?, 16).ok();
        match s.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Channel-wise interpolation in RGB space.
    pub fn mix(self, other: Self, t: f64) -> Self {
        let t = clamp(t, 0.0, 1.0);
        let ch = |a: u8, b: u8| lerp(a as f64, b as f64, t).round() as u8;
        Self {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
            a: ch(self.a, other.a),
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

const SPECTRAL: [Rgba; 11] = [
    Rgba::hex(0x9e0142), Rgba::hex(0xd53e4f), Rgba::hex(0xf46d43), Rgba::hex(0xfdae61),
    Rgba::hex(0xfee08b), Rgba::hex(0xffffbf), Rgba::hex(0xe6f598), Rgba::hex(0xabdda4),
    Rgba::hex(0x66c2a5), Rgba::hex(0x3288bd), Rgba::hex(0x5e4fa2),
];

const VIRIDIS: [Rgba; 10] = [
    Rgba::hex(0x440154), Rgba::hex(0x482878), Rgba::hex(0x3e4989), Rgba::hex(0x31688e),
    Rgba::hex(0x26828e), Rgba::hex(0x1f9e89), Rgba::hex(0x35b779), Rgba::hex(0x6ece58),
    Rgba::hex(0xb5de2b), Rgba::hex(0xfde725),
];

const BLUES: [Rgba; 9] = [
    Rgba::hex(0xf7fbff), Rgba::hex(0xdeebf7), Rgba::hex(0xc6dbef), Rgba::hex(0x9ecae1),
    Rgba::hex(0x6baed6), Rgba::hex(0x4292c6), Rgba::hex(0x2171b5), Rgba::hex(0x08519c),
    Rgba::hex(0x08306b),
];

/// Continuous colour ramp over t in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    Spectral,
    Viridis,
    Blues,
}

impl ColorScheme {
    fn stops(&self) -> &'static [Rgba] {
        match self {
            ColorScheme::Spectral => &SPECTRAL,
            ColorScheme::Viridis => &VIRIDIS,
            ColorScheme::Blues => &BLUES,
        }
    }

    /// Piecewise-linear interpolation between the scheme's stops; t is clamped.
    pub fn interpolate(&self, t: f64) -> Rgba {
        let stops = self.stops();
        let t = if t.is_finite() { clamp(t, 0.0, 1.0) } else { 0.5 };
        let segments = (stops.len() - 1) as f64;
        let pos = t * segments;
        let i = (pos.floor() as usize).min(stops.len() - 2);
        stops[i].mix(stops[i + 1], pos - i as f64)
    }
}
