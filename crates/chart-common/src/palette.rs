//! Color palettes built by interpolating a sequence of stops.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{ChartError, ChartResult};

/// An ordered list of colors, usually produced by [`Palette::interpolate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Interpolate the stop colors to a palette of exactly `size` colors.
    ///
    /// The first palette color equals the first stop and the last equals
    /// the last stop; interior colors are linear RGBA blends between the
    /// bracketing pair of stops at `size - 1` equal steps.
    ///
    /// # Errors
    /// `Unsupported` when `stops` is empty.
    pub fn interpolate(size: usize, stops: &[Color]) -> ChartResult<Self> {
        if stops.is_empty() {
            return Err(ChartError::Unsupported(
                "cannot interpolate a palette from zero stops".to_string(),
            ));
        }
        Ok(interpolate_stops(size, stops))
    }

    /// Black to white.
    pub fn gray(size: usize) -> Self {
        interpolate_stops(size, &[Color::BLACK, Color::WHITE])
    }

    /// Cyan to magenta.
    pub fn cool(size: usize) -> Self {
        interpolate_stops(size, &[Color::CYAN, Color::MAGENTA])
    }

    /// Black body radiation ramp.
    pub fn hot(size: usize) -> Self {
        interpolate_stops(
            size,
            &[
                Color::BLACK,
                Color::from_rgb(127, 0, 0),
                Color::from_rgb(255, 127, 0),
                Color::from_rgb(255, 255, 127),
                Color::WHITE,
            ],
        )
    }

    /// The hue circle of the HSV color model; suited to periodic data.
    pub fn hue(size: usize) -> Self {
        interpolate_stops(
            size,
            &[
                Color::RED,
                Color::YELLOW,
                Color::GREEN,
                Color::CYAN,
                Color::BLUE,
                Color::MAGENTA,
                Color::RED,
            ],
        )
    }

    /// The MATLAB-style jet ramp.
    pub fn jet(size: usize) -> Self {
        interpolate_stops(
            size,
            &[
                Color::DARK_BLUE,
                Color::CYAN,
                Color::YELLOW,
                Color::ORANGE,
                Color::DARK_RED,
            ],
        )
    }

    pub fn rainbow(size: usize) -> Self {
        interpolate_stops(
            size,
            &[
                Color::VIOLET,
                Color::INDIGO,
                Color::BLUE,
                Color::GREEN,
                Color::YELLOW,
                Color::ORANGE,
                Color::RED,
            ],
        )
    }

    pub fn black_white_red(size: usize) -> Self {
        interpolate_stops(size, &[Color::BLACK, Color::WHITE, Color::RED])
    }

    pub fn blue_white_red(size: usize) -> Self {
        interpolate_stops(size, &[Color::BLUE, Color::WHITE, Color::RED])
    }
}

/// Interpolation core; callers guarantee at least one stop.
fn interpolate_stops(size: usize, stops: &[Color]) -> Palette {
    // A single output color degenerates to the first stop.
    if size == 1 {
        return Palette::new(vec![stops[0]]);
    }

    let mut colors = Vec::with_capacity(size);
    for i in 0..size {
        let y = i as f64 / (size - 1) as f64;
        let x = y * (stops.len() - 1) as f64;
        let i0 = x as usize;
        let i1 = if i0 + 1 < stops.len() { i0 + 1 } else { i0 };
        colors.push(Color::interpolate(stops[i0], stops[i1], x - i0 as f64));
    }

    Palette::new(colors)
}
