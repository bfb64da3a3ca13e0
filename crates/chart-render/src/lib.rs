//! Geometry and encoding kernel for sensor-history charts.
//!
//! Implements the pure algorithms the plot panel draws with:
//! - Rectangle clipping (Cohen-Sutherland lines, Sutherland-Hodgman polygons)
//! - Canonical spline interpolation
//! - Contour extraction (Conrec)
//! - Uncompressed PNG encoding
//!
//! Every operation is a synchronous pure function: plain data in, a fresh
//! result out. Callers own all buffers; nothing here is mutated after
//! being returned.

pub mod clip;
pub mod contour;
pub mod png;
pub mod spline;

pub use chart_common::{ChartError, ChartResult, Color, Palette, Point, Rect, Vector};
