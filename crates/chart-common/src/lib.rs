//! Common value types shared across the chart kernel crates.

pub mod color;
pub mod error;
pub mod geometry;
pub mod palette;

pub use color::Color;
pub use error::{ChartError, ChartResult};
pub use geometry::{sub_paths, Point, Rect, Vector};
pub use palette::Palette;
