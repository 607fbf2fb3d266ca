//! RGB color with HSV brightness transforms.
//!
//! `darker` and `lighter` scale the HSV value channel by a percentage factor,
//! the same way desktop toolkits derive shades for bevels and "off" lights.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LedError, LedResult};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Named colors accepted by [`Rgb::from_str`].
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("green", Rgb::GREEN),
    ("red", Rgb::RED),
    ("yellow", Rgb::YELLOW),
    ("blue", Rgb::BLUE),
    ("orange", Rgb::ORANGE),
    ("cyan", Rgb::CYAN),
    ("magenta", Rgb::MAGENTA),
    ("gray", Rgb::GRAY),
    ("grey", Rgb::GRAY),
    ("white", Rgb::WHITE),
    ("black", Rgb::BLACK),
];

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const GRAY: Rgb = Rgb::new(160, 160, 160);
    /// SVG "green", the default LED color.
    pub const GREEN: Rgb = Rgb::new(0, 128, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const ORANGE: Rgb = Rgb::new(255, 165, 0);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to HSV. Hue is in degrees `[0, 360)`, saturation and value in `0..=255`.
    pub fn to_hsv(self) -> (f64, i32, i32) {
        let r = self.r as i32;
        let g = self.g as i32;
        let b = self.b as i32;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let v = max;
        let s = if max == 0 {
            0
        } else {
            ((255.0 * delta as f64) / max as f64).round() as i32
        };

        let h = if delta == 0 {
            0.0
        } else if max == r {
            (60.0 * (g - b) as f64 / delta as f64).rem_euclid(360.0)
        } else if max == g {
            60.0 * (b - r) as f64 / delta as f64 + 120.0
        } else {
            60.0 * (r - g) as f64 / delta as f64 + 240.0
        };

        (h, s, v)
    }

    /// Build a color from HSV components (see [`Rgb::to_hsv`] for ranges).
    pub fn from_hsv(h: f64, s: i32, v: i32) -> Self {
        let s = s.clamp(0, 255) as f64;
        let v = v.clamp(0, 255) as f64;
        if s == 0.0 {
            let v = v.round() as u8;
            return Self::new(v, v, v);
        }

        let h = h.rem_euclid(360.0) / 60.0;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (255.0 - s) / 255.0;
        let q = v * (255.0 - s * f) / 255.0;
        let t = v * (255.0 - s * (1.0 - f)) / 255.0;

        let (r, g, b) = match sector as i32 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Return a darker shade. A factor of 300 yields a third of the brightness.
    ///
    /// Factors below 100 produce a lighter color; non-positive factors leave the
    /// color unchanged.
    pub fn darker(self, factor: i32) -> Self {
        if factor <= 0 {
            return self;
        }
        if factor < 100 {
            return self.lighter(10_000 / factor);
        }
        let (h, s, v) = self.to_hsv();
        Self::from_hsv(h, s, v * 100 / factor)
    }

    /// Return a lighter shade. A factor of 150 yields 50% more brightness.
    ///
    /// Once the value channel saturates, the overshoot is taken from saturation
    /// so that very light shades fade towards white.
    pub fn lighter(self, factor: i32) -> Self {
        if factor <= 0 {
            return self;
        }
        if factor < 100 {
            return self.darker(10_000 / factor);
        }
        let (h, mut s, mut v) = self.to_hsv();
        v = v.saturating_mul(factor) / 100;
        if v > 255 {
            s = (s - (v - 255)).max(0);
            v = 255;
        }
        Self::from_hsv(h, s, v)
    }

    /// Linear interpolation between two colors, `t` in `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| channel(a as f64 + (b as f64 - a as f64) * t as f64);
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl Default for Rgb {
    fn default() -> Self {
        Self::GREEN
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = LedError;

    /// Parse `#rrggbb` or one of the named colors.
    fn from_str(s: &str) -> LedResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(LedError::InvalidColor(s.to_string()));
            }
            let component = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&hex[range], 16).map_err(|_| LedError::InvalidColor(s.to_string()))
            };
            return Ok(Self::new(component(0..2)?, component(2..4)?, component(4..6)?));
        }

        let lower = s.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, color)| *color)
            .ok_or_else(|| LedError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Rgb {
    type Error = LedError;

    fn try_from(value: String) -> LedResult<Self> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_darker_divides_value() {
        assert_eq!(Rgb::GREEN.darker(300), Rgb::new(0, 42, 0));
        assert_eq!(Rgb::RED.darker(200), Rgb::new(127, 0, 0));
    }

    #[test]
    fn test_lighter_scales_value() {
        assert_eq!(Rgb::new(0, 100, 0).lighter(200), Rgb::new(0, 200, 0));
        assert_eq!(Rgb::new(128, 128, 128).lighter(150), Rgb::new(192, 192, 192));
    }

    #[test]
    fn test_lighter_saturates_towards_white() {
        assert_eq!(Rgb::WHITE.lighter(200), Rgb::WHITE);
        let light = Rgb::GREEN.lighter(200);
        assert_eq!(light.g, 255);
        assert!(light.r <= 2 && light.b <= 2);
    }

    #[test]
    fn test_invalid_factors() {
        assert_eq!(Rgb::GREEN.darker(0), Rgb::GREEN);
        assert_eq!(Rgb::GREEN.lighter(-5), Rgb::GREEN);
        // Factors below 100 invert the direction
        assert_eq!(Rgb::new(0, 200, 0).darker(50), Rgb::new(0, 200, 0).lighter(200));
    }

    #[test]
    fn test_huge_lighter_factor_saturates() {
        assert_eq!(Rgb::GREEN.lighter(20_000_000), Rgb::WHITE);
        assert_eq!(Rgb::GREEN.lighter(i32::MAX), Rgb::WHITE);
    }

    #[test]
    fn test_hsv_conversion() {
        let (h, s, v) = Rgb::BLUE.to_hsv();
        assert!((h - 240.0).abs() < 1e-9);
        assert_eq!(s, 255);
        assert_eq!(v, 255);
        assert_eq!(Rgb::from_hsv(h, s, v), Rgb::BLUE);
        assert_eq!(Rgb::from_hsv(0.0, 0, 77), Rgb::new(77, 77, 77));
    }

    #[test]
    fn test_parse() {
        assert_eq!("#ff8000".parse::<Rgb>().unwrap(), Rgb::new(255, 128, 0));
        assert_eq!("Green".parse::<Rgb>().unwrap(), Rgb::GREEN);
        assert!(matches!("#12".parse::<Rgb>(), Err(LedError::InvalidColor(_))));
        assert!(matches!("chartreuse-ish".parse::<Rgb>(), Err(LedError::InvalidColor(_))));
        assert!(matches!("#+1+2+3".parse::<Rgb>(), Err(LedError::InvalidColor(_))));
        assert!(matches!("#12345g".parse::<Rgb>(), Err(LedError::InvalidColor(_))));
    }

    #[test]
    fn test_lerp() {
        assert_eq!(Rgb::BLACK.lerp(Rgb::WHITE, 0.5), Rgb::new(128, 128, 128));
        assert_eq!(Rgb::BLACK.lerp(Rgb::WHITE, 2.0), Rgb::WHITE);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
        let back: Rgb = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(back, Rgb::RED);
    }
}
