//! Contour (iso-line) extraction from a 2D scalar grid.
//!
//! A port of the classic Conrec algorithm (Paul Bourke): each grid cell
//! is split into four triangles sharing a synthetic center vertex, and a
//! fixed case table maps the sign pattern of every triangle against a
//! contour level to one of nine segment placements.

use chart_common::{ChartError, ChartResult, Point};
use tracing::debug;

/// One contour line segment, tagged with the level that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourSegment {
    pub level: f64,
    pub start: Point,
    pub end: Point,
}

/// A chained contour polyline (see [`connect_segments`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub level: f64,
    pub points: Vec<Point>,
    pub closed: bool,
}

/// Corner offsets of cell vertices 1..=4 in column (`IM`) and row (`JM`)
/// direction. The cell center is vertex 0.
const IM: [usize; 4] = [0, 1, 1, 0];
const JM: [usize; 4] = [0, 0, 1, 1];

/// Sign-triple case table: `CASES[s1+1][s2+1][s3+1]` for the signs of
/// triangle vertices (m1, m2, m3) selects one of nine segment placements
/// (0 = no segment). Fixed data from the original Fortran formulation.
const CASES: [[[u8; 3]; 3]; 3] = [
    [[0, 0, 8], [0, 2, 5], [7, 6, 9]],
    [[0, 3, 4], [1, 3, 1], [4, 3, 0]],
    [[9, 6, 7], [5, 2, 0], [8, 0, 0]],
];

/// Extract contour segments for every level, collected into a vector.
///
/// See [`trace_into`] for the input contract. Segment order follows the
/// nominal cell walk (rows descending, columns ascending), but only the
/// segment *set* is part of the contract; compare results as sets.
pub fn trace(d: &[f64], x: &[f64], y: &[f64], levels: &[f64]) -> ChartResult<Vec<ContourSegment>> {
    let mut segments = Vec::new();
    trace_into(d, x, y, levels, |segment| segments.push(segment))?;

    debug!(
        cols = x.len(),
        rows = y.len(),
        num_levels = levels.len(),
        num_segments = segments.len(),
        "traced contour segments"
    );

    Ok(segments)
}

/// Extract contour segments, passing each one to `emit` as it is found.
///
/// # Arguments
/// - `d`: scalar grid in row-major order, `d[row * x.len() + col]`
/// - `x`: column coordinates, ascending, `x.len()` columns
/// - `y`: row coordinates, ascending, `y.len()` rows
/// - `levels`: contour levels, strictly ascending
/// - `emit`: segment sink
///
/// Cells containing a NaN corner are skipped (sensor grids have gaps).
/// A grid smaller than 2x2 or an empty level set yields no segments.
///
/// # Errors
/// `InvalidArgument` when `d.len() != x.len() * y.len()` or the levels
/// are not strictly ascending.
pub fn trace_into<F>(
    d: &[f64],
    x: &[f64],
    y: &[f64],
    levels: &[f64],
    mut emit: F,
) -> ChartResult<()>
where
    F: FnMut(ContourSegment),
{
    let cols = x.len();
    let rows = y.len();

    if d.len() != cols * rows {
        return Err(ChartError::invalid(
            "d",
            format!(
                "grid has {} values but axes imply {} ({} cols x {} rows)",
                d.len(),
                cols * rows,
                cols,
                rows
            ),
        ));
    }
    if levels.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ChartError::invalid(
            "levels",
            "contour levels must be strictly ascending",
        ));
    }
    if cols < 2 || rows < 2 || levels.is_empty() {
        return Ok(());
    }

    // Relative heights of the cell corners (1..=4) and the synthetic
    // center (0), with matching coordinates and signs.
    let mut h = [0.0f64; 5];
    let mut xh = [0.0f64; 5];
    let mut yh = [0.0f64; 5];
    let mut sh = [0i8; 5];

    for j in (0..rows - 1).rev() {
        for i in 0..cols - 1 {
            let corner = |m: usize| d[(j + JM[m]) * cols + (i + IM[m])];
            let (c1, c2, c3, c4) = (corner(0), corner(1), corner(2), corner(3));

            if c1.is_nan() || c2.is_nan() || c3.is_nan() || c4.is_nan() {
                continue;
            }

            let dmin = c1.min(c2).min(c3).min(c4);
            let dmax = c1.max(c2).max(c3).max(c4);

            // Cell entirely outside the level range.
            if dmax < levels[0] || dmin > levels[levels.len() - 1] {
                continue;
            }

            for &level in levels {
                if level < dmin || level > dmax {
                    continue;
                }

                for m in 1..=4 {
                    h[m] = d[(j + JM[m - 1]) * cols + (i + IM[m - 1])] - level;
                    xh[m] = x[i + IM[m - 1]];
                    yh[m] = y[j + JM[m - 1]];
                }
                h[0] = 0.25 * (h[1] + h[2] + h[3] + h[4]);
                xh[0] = 0.5 * (x[i] + x[i + 1]);
                yh[0] = 0.5 * (y[j] + y[j + 1]);

                for m in 0..=4 {
                    sh[m] = if h[m] > 0.0 {
                        1
                    } else if h[m] < 0.0 {
                        -1
                    } else {
                        0
                    };
                }

                // Intersection of a triangle side with the level, by
                // linear interpolation of the field.
                let xsect = |p1: usize, p2: usize| (h[p2] * xh[p1] - h[p1] * xh[p2]) / (h[p2] - h[p1]);
                let ysect = |p1: usize, p2: usize| (h[p2] * yh[p1] - h[p1] * yh[p2]) / (h[p2] - h[p1]);
                let vertex = |m: usize| Point::new(xh[m], yh[m]);
                let side = |p1: usize, p2: usize| Point::new(xsect(p1, p2), ysect(p1, p2));

                // Scan the four triangles around the center vertex.
                for m in 1..=4usize {
                    let m1 = m;
                    let m2 = 0;
                    let m3 = if m != 4 { m + 1 } else { 1 };

                    let case = CASES[(sh[m1] + 1) as usize][(sh[m2] + 1) as usize]
                        [(sh[m3] + 1) as usize];

                    let (start, end) = match case {
                        1 => (vertex(m1), vertex(m2)),
                        2 => (vertex(m2), vertex(m3)),
                        3 => (vertex(m3), vertex(m1)),
                        4 => (vertex(m1), side(m2, m3)),
                        5 => (vertex(m2), side(m3, m1)),
                        6 => (vertex(m3), side(m1, m2)),
                        7 => (side(m1, m2), side(m2, m3)),
                        8 => (side(m2, m3), side(m3, m1)),
                        9 => (side(m3, m1), side(m1, m2)),
                        _ => continue,
                    };

                    emit(ContourSegment { level, start, end });
                }
            }
        }
    }

    Ok(())
}

/// Chain unordered segments into contour polylines.
///
/// Segments are joined end-to-start (either orientation) when their
/// endpoints match within `epsilon` and they carry the same level. A
/// polyline whose last point meets its first is marked closed.
pub fn connect_segments(segments: &[ContourSegment], epsilon: f64) -> Vec<Contour> {
    let mut contours = Vec::new();
    let mut used = vec![false; segments.len()];

    for start_idx in 0..segments.len() {
        if used[start_idx] {
            continue;
        }
        used[start_idx] = true;

        let level = segments[start_idx].level;
        let mut points = vec![segments[start_idx].start, segments[start_idx].end];

        // Grow at the tail, then flip and grow the other way so a seed in
        // the middle of a chain still collects both halves.
        extend_chain(segments, &mut used, &mut points, level, epsilon);
        points.reverse();
        extend_chain(segments, &mut used, &mut points, level, epsilon);

        let closed = points[0].distance_to(points[points.len() - 1]) < epsilon;
        contours.push(Contour {
            level,
            points,
            closed,
        });
    }

    contours
}

/// Append unused same-level segments continuing from the chain's last
/// point until none matches.
fn extend_chain(
    segments: &[ContourSegment],
    used: &mut [bool],
    points: &mut Vec<Point>,
    level: f64,
    epsilon: f64,
) {
    let mut changed = true;
    while changed {
        changed = false;
        let current_end = points[points.len() - 1];

        for (i, seg) in segments.iter().enumerate() {
            if used[i] || seg.level != level {
                continue;
            }

            if seg.start.distance_to(current_end) < epsilon {
                points.push(seg.end);
            } else if seg.end.distance_to(current_end) < epsilon {
                points.push(seg.start);
            } else {
                continue;
            }

            used[i] = true;
            changed = true;
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_grid_fast_reject() {
        let d = vec![5.0; 9];
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 1.0, 2.0];
        let segments = trace(&d, &x, &y, &[4.0]).unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn test_mismatched_grid_rejected() {
        let d = vec![0.0; 5];
        let err = trace(&d, &[0.0, 1.0], &[0.0, 1.0], &[0.5]).unwrap_err();
        assert!(matches!(err, ChartError::InvalidArgument { param: "d", .. }));
    }

    #[test]
    fn test_unsorted_levels_rejected() {
        let d = vec![0.0; 4];
        let err = trace(&d, &[0.0, 1.0], &[0.0, 1.0], &[1.0, 0.5]).unwrap_err();
        assert!(matches!(
            err,
            ChartError::InvalidArgument { param: "levels", .. }
        ));
    }

    #[test]
    fn test_nan_cell_skipped() {
        let d = vec![0.0, f64::NAN, 10.0, 10.0];
        let x = [0.0, 1.0];
        let y = [0.0, 1.0];
        assert!(trace(&d, &x, &y, &[5.0]).unwrap().is_empty());
    }

    #[test]
    fn test_peak_produces_segments() {
        let d = vec![
            0.0, 0.0, 0.0, //
            0.0, 10.0, 0.0, //
            0.0, 0.0, 0.0,
        ];
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 1.0, 2.0];
        let segments = trace(&d, &x, &y, &[5.0]).unwrap();
        assert!(!segments.is_empty());
        for s in &segments {
            assert_eq!(s.level, 5.0);
        }
    }

    #[test]
    fn test_connect_joins_shared_endpoints() {
        let segments = [
            ContourSegment {
                level: 1.0,
                start: Point::new(0.0, 0.0),
                end: Point::new(1.0, 0.0),
            },
            ContourSegment {
                level: 1.0,
                start: Point::new(1.0, 0.0),
                end: Point::new(1.0, 1.0),
            },
        ];
        let contours = connect_segments(&segments, 1e-6);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].points.len(), 3);
        assert!(!contours[0].closed);
    }

    #[test]
    fn test_connect_closes_a_loop() {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let segments: Vec<ContourSegment> = (0..4)
            .map(|i| ContourSegment {
                level: 3.0,
                start: corners[i],
                end: corners[(i + 1) % 4],
            })
            .collect();

        let contours = connect_segments(&segments, 1e-6);
        assert_eq!(contours.len(), 1);
        assert!(contours[0].closed);
        assert_eq!(contours[0].points.len(), 5);
    }

    #[test]
    fn test_connect_respects_levels() {
        let segments = [
            ContourSegment {
                level: 1.0,
                start: Point::new(0.0, 0.0),
                end: Point::new(1.0, 0.0),
            },
            ContourSegment {
                level: 2.0,
                start: Point::new(1.0, 0.0),
                end: Point::new(1.0, 1.0),
            },
        ];
        let contours = connect_segments(&segments, 1e-6);
        assert_eq!(contours.len(), 2);
    }
}
