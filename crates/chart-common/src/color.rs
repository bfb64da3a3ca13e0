//! ARGB color value type with HSV conversion.
//!
//! Colors are four 8-bit channels compared exactly; all blending helpers
//! return new values. The surrounding application persists series colors
//! in its settings, so the type is serde-derived and round-trips through
//! the `#aarrggbb` string form.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ChartError, ChartResult};

/// A color described by alpha, red, green and blue channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Alpha channel (255 = opaque)
    pub a: u8,
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::from_u32(0xFF00_0000);
    pub const WHITE: Color = Color::from_u32(0xFFFF_FFFF);
    pub const RED: Color = Color::from_u32(0xFFFF_0000);
    pub const GREEN: Color = Color::from_u32(0xFF00_8000);
    pub const BLUE: Color = Color::from_u32(0xFF00_00FF);
    pub const CYAN: Color = Color::from_u32(0xFF00_FFFF);
    pub const MAGENTA: Color = Color::from_u32(0xFFFF_00FF);
    pub const YELLOW: Color = Color::from_u32(0xFFFF_FF00);
    pub const ORANGE: Color = Color::from_u32(0xFFFF_A500);
    pub const VIOLET: Color = Color::from_u32(0xFFEE_82EE);
    pub const INDIGO: Color = Color::from_u32(0xFF4B_0082);
    pub const DARK_BLUE: Color = Color::from_u32(0xFF00_008B);
    pub const DARK_RED: Color = Color::from_u32(0xFF8B_0000);
    pub const TRANSPARENT: Color = Color::from_u32(0x00FF_FFFF);

    /// Create an opaque color from RGB channels.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    /// Create a color from all four channels.
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Unpack a color from `0xAARRGGBB`.
    pub const fn from_u32(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Pack the channels as `0xAARRGGBB`.
    pub const fn to_u32(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Same color with a different alpha channel.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            a,
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }

    /// Parse a color from `"#AARRGGBB"`, `"#RRGGBB"` (alpha 255),
    /// `"a,r,g,b"` or `"r,g,b"`.
    pub fn parse(value: &str) -> ChartResult<Self> {
        let value = value.trim();

        if let Some(hex) = value.strip_prefix('#') {
            let mut u = u32::from_str_radix(hex, 16)
                .map_err(|_| ChartError::invalid("color", format!("invalid hex color: {value}")))?;
            if hex.len() < 8 {
                // alpha value was not specified
                u |= 0xFF00_0000;
            }
            return Ok(Self::from_u32(u));
        }

        let channels: Vec<u8> = value
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .map_err(|_| ChartError::invalid("color", format!("invalid color channels: {value}")))?;

        match channels.as_slice() {
            [r, g, b] => Ok(Self::from_rgb(*r, *g, *b)),
            [a, r, g, b] => Ok(Self::from_argb(*a, *r, *g, *b)),
            _ => Err(ChartError::invalid(
                "color",
                format!("expected 3 or 4 channels, got {}", channels.len()),
            )),
        }
    }

    /// Convert from HSV, each component in `[0, 1]`.
    ///
    /// The alpha channel of the result is 255.
    pub fn from_hsv(hue: f64, sat: f64, val: f64) -> Self {
        let (r, g, b) = if sat == 0.0 {
            // Gray scale
            (val, val, val)
        } else {
            let hue = if hue == 1.0 { 0.0 } else { hue } * 6.0;
            let i = hue.floor();
            let f = hue - i;
            let aa = val * (1.0 - sat);
            let bb = val * (1.0 - (sat * f));
            let cc = val * (1.0 - (sat * (1.0 - f)));
            match i as i32 {
                0 => (val, cc, aa),
                1 => (bb, val, aa),
                2 => (aa, val, cc),
                3 => (aa, bb, val),
                4 => (cc, aa, val),
                5 => (val, aa, bb),
                _ => (0.0, 0.0, 0.0),
            }
        };

        Self::from_rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
    }

    /// Convert to `(hue, saturation, value)`, each in `[0, 1]`.
    ///
    /// Round trip through [`Color::from_hsv`] reproduces the channels
    /// within ±1 (rounding loss, not a defect).
    pub fn to_hsv(self) -> (f64, f64, f64) {
        let min = self.r.min(self.g).min(self.b);
        let v = self.r.max(self.g).max(self.b);
        let delta = (v - min) as f64;

        let s = if v == 0 { 0.0 } else { delta / v as f64 };
        let mut h = 0.0;

        if s != 0.0 {
            if self.r == v {
                h = (self.g as f64 - self.b as f64) / delta;
            } else if self.g == v {
                h = 2.0 + (self.b as f64 - self.r as f64) / delta;
            } else if self.b == v {
                h = 4.0 + (self.r as f64 - self.g as f64) / delta;
            }

            h *= 60.0;
            if h < 0.0 {
                h += 360.0;
            }
        }

        (h / 360.0, s, v as f64 / 255.0)
    }

    /// Linear blend of two colors; `t = 0` gives `c1`, `t = 1` gives `c2`.
    pub fn interpolate(c1: Color, c2: Color, t: f64) -> Self {
        let blend = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t) as u8;
        Self::from_argb(
            blend(c1.a, c2.a),
            blend(c1.r, c2.r),
            blend(c1.g, c2.g),
            blend(c1.b, c2.b),
        )
    }

    /// The complementary color (hue shifted by half a turn).
    pub fn complementary(self) -> Self {
        let (h, s, v) = self.to_hsv();
        let mut h = h - 0.5;
        if h < 0.0 {
            h += 1.0;
        }
        Self::from_hsv(h, s, v)
    }

    /// Scale the HSV value component, clamped to 1.
    pub fn change_intensity(self, factor: f64) -> Self {
        let (h, s, v) = self.to_hsv();
        Self::from_hsv(h, s, (v * factor).min(1.0))
    }

    /// L2 distance between two colors in normalized RGBA space.
    pub fn color_difference(c1: Color, c2: Color) -> f64 {
        let dr = (c1.r as f64 - c2.r as f64) / 255.0;
        let dg = (c1.g as f64 - c2.g as f64) / 255.0;
        let db = (c1.b as f64 - c2.b as f64) / 255.0;
        let da = (c1.a as f64 - c2.a as f64) / 255.0;
        (dr * dr + dg * dg + db * db + da * da).sqrt()
    }

    /// Distance between the hues of two colors, wrapped to `[0, 0.5]`.
    pub fn hue_difference(c1: Color, c2: Color) -> f64 {
        let (h1, _, _) = c1.to_hsv();
        let (h2, _, _) = c2.to_hsv();
        let mut dh = h1 - h2;
        if dh > 0.5 {
            dh -= 1.0;
        }
        if dh < -0.5 {
            dh += 1.0;
        }
        dh.abs()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
    }
}
