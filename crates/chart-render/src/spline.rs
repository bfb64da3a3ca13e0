//! Canonical (cardinal) spline interpolation.
//!
//! Densifies a polyline into a smooth piecewise-cubic curve through all
//! input points. Tension scales the neighbor-difference tangents; 0 gives
//! straight segments, 1 the full Catmull-Rom-style rounding.

use chart_common::{ChartError, ChartResult, Point};

/// Tangent tension, uniform or per control point.
///
/// A per-point sequence cycles when it is shorter than the point list.
#[derive(Debug, Clone, PartialEq)]
pub enum Tension {
    Uniform(f64),
    PerPoint(Vec<f64>),
}

impl Tension {
    fn at(&self, i: usize) -> f64 {
        match self {
            Tension::Uniform(t) => *t,
            Tension::PerPoint(ts) => ts[i % ts.len()],
        }
    }
}

/// Interpolate `points` with a canonical spline.
///
/// Each cubic segment is subdivided into
/// `ceil((|dx| + |dy|) / tolerance)` samples (at least one) at parametric
/// `t` in `(0, 1]`. The first input point opens the output verbatim and
/// every segment emits its end point verbatim, so consecutive segments
/// share exactly one boundary point and the output's first and last
/// points equal the input's exactly.
///
/// # Arguments
/// - `points`: the polyline to smooth
/// - `tension`: tangent scaling, see [`Tension`]
/// - `closed`: wrap the neighbor selection around the ends
/// - `tolerance`: subdivision step in coordinate units, must be positive
///
/// # Errors
/// `InvalidArgument` for a non-positive/non-finite tolerance or an empty
/// per-point tension sequence.
pub fn create_spline(
    points: &[Point],
    tension: &Tension,
    closed: bool,
    tolerance: f64,
) -> ChartResult<Vec<Point>> {
    if !(tolerance > 0.0) || !tolerance.is_finite() {
        return Err(ChartError::invalid(
            "tolerance",
            format!("must be a positive finite number, got {tolerance}"),
        ));
    }
    if matches!(tension, Tension::PerPoint(ts) if ts.is_empty()) {
        return Err(ChartError::invalid(
            "tension",
            "per-point tension sequence must not be empty",
        ));
    }

    let n = points.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if n == 1 {
        return Ok(points.to_vec());
    }

    let mut result = vec![points[0]];

    if n == 2 {
        if !closed {
            // Duplicated virtual neighbors turn the pair into one segment.
            result.extend(segment(
                points[0],
                points[0],
                points[1],
                points[1],
                tension.at(0),
                tension.at(1),
                tolerance,
            ));
        } else {
            result.extend(segment(
                points[1],
                points[0],
                points[1],
                points[0],
                tension.at(0),
                tension.at(1),
                tolerance,
            ));
            result.extend(segment(
                points[0],
                points[1],
                points[0],
                points[1],
                tension.at(1),
                tension.at(0),
                tolerance,
            ));
        }
        return Ok(result);
    }

    for i in 0..n {
        let t1 = tension.at(i);
        let t2 = tension.at(i + 1);

        if i == 0 {
            result.extend(segment(
                if closed { points[n - 1] } else { points[0] },
                points[0],
                points[1],
                points[2],
                t1,
                t2,
                tolerance,
            ));
        } else if i == n - 2 {
            result.extend(segment(
                points[i - 1],
                points[i],
                points[i + 1],
                if closed { points[0] } else { points[i + 1] },
                t1,
                t2,
                tolerance,
            ));
        } else if i == n - 1 {
            if closed {
                result.extend(segment(
                    points[i - 1],
                    points[i],
                    points[0],
                    points[1],
                    t1,
                    t2,
                    tolerance,
                ));
            }
        } else {
            result.extend(segment(
                points[i - 1],
                points[i],
                points[i + 1],
                points[i + 2],
                t1,
                t2,
                tolerance,
            ));
        }
    }

    Ok(result)
}

/// Subdivide the cubic Hermite segment from `pt1` to `pt2` whose tangents
/// come from the neighbor differences `pt2 - pt0` and `pt3 - pt1`.
///
/// Returns the samples at `t` in `(0, 1]`; the caller supplies the `t = 0`
/// point. The end point is pushed exactly rather than evaluated, keeping
/// seams free of round-off.
fn segment(
    pt0: Point,
    pt1: Point,
    pt2: Point,
    pt3: Point,
    t1: f64,
    t2: f64,
    tolerance: f64,
) -> Vec<Point> {
    // Coefficients per the Petzold derivation of the canonical spline.
    let sx1 = t1 * (pt2.x - pt0.x);
    let sy1 = t1 * (pt2.y - pt0.y);
    let sx2 = t2 * (pt3.x - pt1.x);
    let sy2 = t2 * (pt3.y - pt1.y);

    let ax = sx1 + sx2 + 2.0 * pt1.x - 2.0 * pt2.x;
    let ay = sy1 + sy2 + 2.0 * pt1.y - 2.0 * pt2.y;
    let bx = -2.0 * sx1 - sx2 - 3.0 * pt1.x + 3.0 * pt2.x;
    let by = -2.0 * sy1 - sy2 - 3.0 * pt1.y + 3.0 * pt2.y;

    let cx = sx1;
    let cy = sy1;
    let dx = pt1.x;
    let dy = pt1.y;

    let manhattan = (pt1.x - pt2.x).abs() + (pt1.y - pt2.y).abs();
    let num = ((manhattan / tolerance).ceil() as usize).max(1);

    let mut out = Vec::with_capacity(num);
    for i in 1..=num {
        if i == num {
            out.push(pt2);
        } else {
            let t = i as f64 / num as f64;
            out.push(Point::new(
                ((ax * t + bx) * t + cx) * t + dx,
                ((ay * t + by) * t + cy) * t + dy,
            ));
        }
    }

    out
}
