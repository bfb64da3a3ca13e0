//! Rectangle clipping for line segments and polygons.
//!
//! Two classic algorithms:
//! - **Cohen-Sutherland** for a single segment, via 4-bit outcodes.
//! - **Sutherland-Hodgman** for a closed polygon, clipping against the
//!   four half-planes in fixed order.
//!
//! Both build new output; caller-owned input is never mutated.

use chart_common::{ChartError, ChartResult, Point, Rect};

const INSIDE: u8 = 0; // 0000
const LEFT: u8 = 1; // 0001
const RIGHT: u8 = 2; // 0010
const BOTTOM: u8 = 4; // 0100
const TOP: u8 = 8; // 1000

/// Clips line segments against a rectangle using the Cohen-Sutherland
/// outcode algorithm.
#[derive(Debug, Clone, Copy)]
pub struct CohenSutherland {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

impl CohenSutherland {
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    pub fn from_rect(rect: &Rect) -> Self {
        Self::new(rect.left, rect.right(), rect.top, rect.bottom())
    }

    /// Clip the segment `p0`-`p1` to the rectangle.
    ///
    /// Returns `None` when the segment lies entirely outside, otherwise
    /// the endpoints moved onto the boundary where the segment leaves the
    /// rectangle. A segment already fully inside is returned unchanged.
    pub fn clip_line(&self, p0: Point, p1: Point) -> Option<(Point, Point)> {
        let (mut x0, mut y0) = (p0.x, p0.y);
        let (mut x1, mut y1) = (p1.x, p1.y);

        let mut outcode0 = self.outcode(x0, y0);
        let mut outcode1 = self.outcode(x1, y1);

        // Each endpoint can cross at most four edges.
        for _ in 0..8 {
            if outcode0 | outcode1 == INSIDE {
                // Both inside; trivially accept.
                return Some((Point::new(x0, y0), Point::new(x1, y1)));
            }

            if outcode0 & outcode1 != INSIDE {
                // Both outside on a shared side; trivially reject.
                return None;
            }

            // Pick the endpoint that lies outside and move it to the
            // intersection with a violated edge.
            let out = if outcode0 != INSIDE { outcode0 } else { outcode1 };

            let (x, y) = match self.edge_intercept(out, x0, y0, x1, y1) {
                Some(hit) => hit,
                // Every violated edge is parallel to the segment, so the
                // point cannot be moved; nothing of the segment is inside.
                None => return None,
            };

            if out == outcode0 {
                x0 = x;
                y0 = y;
                outcode0 = self.outcode(x0, y0);
            } else {
                x1 = x;
                y1 = y;
                outcode1 = self.outcode(x1, y1);
            }
        }

        None
    }

    /// Whether the point lies inside the rectangle (boundary included).
    pub fn is_inside(&self, p: Point) -> bool {
        self.outcode(p.x, p.y) == INSIDE
    }

    /// Intersection of the segment with the first violated edge whose
    /// intercept formula has a nonzero denominator.
    ///
    /// The segment's parametric equations are
    /// `y = y0 + slope * (x - x0)` and `x = x0 + (1 / slope) * (y - y0)`;
    /// an axis-aligned segment has no intersection with a parallel edge
    /// and that edge is skipped.
    fn edge_intercept(&self, out: u8, x0: f64, y0: f64, x1: f64, y1: f64) -> Option<(f64, f64)> {
        if out & TOP != INSIDE && y1 != y0 {
            return Some((x0 + (x1 - x0) * (self.ymax - y0) / (y1 - y0), self.ymax));
        }
        if out & BOTTOM != INSIDE && y1 != y0 {
            return Some((x0 + (x1 - x0) * (self.ymin - y0) / (y1 - y0), self.ymin));
        }
        if out & RIGHT != INSIDE && x1 != x0 {
            return Some((self.xmax, y0 + (y1 - y0) * (self.xmax - x0) / (x1 - x0)));
        }
        if out & LEFT != INSIDE && x1 != x0 {
            return Some((self.xmin, y0 + (y1 - y0) * (self.xmin - x0) / (x1 - x0)));
        }
        None
    }

    /// 4-bit classification of a point against the four half-planes.
    fn outcode(&self, x: f64, y: f64) -> u8 {
        let mut code = INSIDE;

        if x < self.xmin {
            code |= LEFT;
        } else if x > self.xmax {
            code |= RIGHT;
        }

        if y < self.ymin {
            code |= BOTTOM;
        } else if y > self.ymax {
            code |= TOP;
        }

        code
    }
}

/// One rectangle edge, as a half-plane to clip against.
#[derive(Debug, Clone, Copy)]
enum RectEdge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Clip a closed polygon to a rectangle with the Sutherland-Hodgman
/// algorithm.
///
/// The polygon need not be convex or free of self-intersections. The
/// result has between 0 and n+4 vertices; a fully inside polygon is
/// returned unchanged, a fully outside one comes back empty.
pub fn clip_polygon(bounds: &Rect, vertices: &[Point]) -> ChartResult<Vec<Point>> {
    let p1 = clip_one_axis(bounds, RectEdge::Left, vertices)?;
    let p2 = clip_one_axis(bounds, RectEdge::Right, &p1)?;
    let p3 = clip_one_axis(bounds, RectEdge::Top, &p2)?;
    clip_one_axis(bounds, RectEdge::Bottom, &p3)
}

/// Clip against a single half-plane, walking consecutive vertex pairs
/// `(s, p)` and emitting by the 4-state rule.
fn clip_one_axis(bounds: &Rect, edge: RectEdge, v: &[Point]) -> ChartResult<Vec<Point>> {
    if v.is_empty() {
        return Ok(Vec::new());
    }

    let mut polygon = Vec::with_capacity(v.len() + 1);
    let mut s = v[v.len() - 1];

    for &p in v {
        let sin = edge_contains(bounds, edge, s);
        let pin = edge_contains(bounds, edge, p);

        match (sin, pin) {
            // inside -> inside
            (true, true) => polygon.push(p),
            // inside -> outside
            (true, false) => polygon.push(line_intercept(bounds, edge, s, p)?),
            // outside -> outside
            (false, false) => {}
            // outside -> inside
            (false, true) => {
                polygon.push(line_intercept(bounds, edge, s, p)?);
                polygon.push(p);
            }
        }

        s = p;
    }

    Ok(polygon)
}

/// Half-plane membership. Points exactly on the left/top boundary are
/// inside; points exactly on the right/bottom boundary are outside.
fn edge_contains(bounds: &Rect, edge: RectEdge, p: Point) -> bool {
    match edge {
        RectEdge::Left => !(p.x < bounds.left),
        RectEdge::Right => !(p.x >= bounds.right()),
        RectEdge::Top => !(p.y < bounds.top),
        RectEdge::Bottom => !(p.y >= bounds.bottom()),
    }
}

/// Intersection of the segment `a`-`b` with the boundary line of `edge`.
///
/// Requesting an intercept for two coincident points is a computation
/// error, as is a segment parallel to the boundary; both report
/// [`ChartError::DegenerateGeometry`] instead of producing NaN.
fn line_intercept(bounds: &Rect, edge: RectEdge, a: Point, b: Point) -> ChartResult<Point> {
    if a == b {
        return Err(ChartError::DegenerateGeometry(format!(
            "coincident points ({}, {}) cannot intercept a clip edge",
            a.x, a.y
        )));
    }

    let no_intercept =
        || ChartError::DegenerateGeometry("no intercept with the clip edge".to_string());

    match edge {
        RectEdge::Bottom => {
            if b.y == a.y {
                return Err(no_intercept());
            }
            let bottom = bounds.bottom();
            Ok(Point::new(
                a.x + (b.x - a.x) * (bottom - a.y) / (b.y - a.y),
                bottom,
            ))
        }
        RectEdge::Left => {
            if b.x == a.x {
                return Err(no_intercept());
            }
            Ok(Point::new(
                bounds.left,
                a.y + (b.y - a.y) * (bounds.left - a.x) / (b.x - a.x),
            ))
        }
        RectEdge::Right => {
            if b.x == a.x {
                return Err(no_intercept());
            }
            let right = bounds.right();
            Ok(Point::new(
                right,
                a.y + (b.y - a.y) * (right - a.x) / (b.x - a.x),
            ))
        }
        RectEdge::Top => {
            if b.y == a.y {
                return Err(no_intercept());
            }
            Ok(Point::new(
                a.x + (b.x - a.x) * (bounds.top - a.y) / (b.y - a.y),
                bounds.top,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_clipper() -> CohenSutherland {
        CohenSutherland::new(0.0, 1.0, 0.0, 1.0)
    }

    #[test]
    fn test_clip_line_inside_unchanged() {
        let c = unit_clipper();
        let p0 = Point::new(0.25, 0.25);
        let p1 = Point::new(0.75, 0.5);
        assert_eq!(c.clip_line(p0, p1), Some((p0, p1)));
    }

    #[test]
    fn test_clip_line_trivial_reject() {
        let c = unit_clipper();
        // both endpoints share the RIGHT outcode bit
        let clipped = c.clip_line(Point::new(2.0, 0.2), Point::new(3.0, 0.8));
        assert_eq!(clipped, None);
    }

    #[test]
    fn test_clip_line_crossing() {
        let c = unit_clipper();
        let (a, b) = c
            .clip_line(Point::new(-1.0, 0.5), Point::new(2.0, 0.5))
            .unwrap();
        assert_eq!(a, Point::new(0.0, 0.5));
        assert_eq!(b, Point::new(1.0, 0.5));
    }

    #[test]
    fn test_clip_line_horizontal_on_boundary() {
        // exactly on the top boundary; the guard must not divide by zero
        let c = unit_clipper();
        let (a, b) = c
            .clip_line(Point::new(-1.0, 1.0), Point::new(2.0, 1.0))
            .unwrap();
        assert_eq!(a, Point::new(0.0, 1.0));
        assert_eq!(b, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_is_inside_boundary() {
        let c = unit_clipper();
        assert!(c.is_inside(Point::new(0.0, 0.0)));
        assert!(c.is_inside(Point::new(1.0, 1.0)));
        assert!(!c.is_inside(Point::new(1.0 + 1e-9, 1.0)));
    }

    #[test]
    fn test_clip_polygon_inside_unchanged() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let square = vec![
            Point::new(2.0, 2.0),
            Point::new(8.0, 2.0),
            Point::new(8.0, 8.0),
            Point::new(2.0, 8.0),
        ];
        assert_eq!(clip_polygon(&bounds, &square).unwrap(), square);
    }

    #[test]
    fn test_clip_polygon_corner_cut() {
        let bounds = Rect::new(0.0, 0.0, 1.0, 1.0);
        // triangle poking out of the right edge
        let tri = [
            Point::new(0.5, 0.25),
            Point::new(2.0, 0.5),
            Point::new(0.5, 0.75),
        ];
        let clipped = clip_polygon(&bounds, &tri).unwrap();
        assert!(!clipped.is_empty());
        for p in &clipped {
            assert!(p.x <= 1.0 + 1e-12 && p.x >= 0.0 - 1e-12);
        }
    }

    #[test]
    fn test_clip_polygon_outside_empty() {
        let bounds = Rect::new(0.0, 0.0, 1.0, 1.0);
        let tri = [
            Point::new(5.0, 5.0),
            Point::new(6.0, 5.0),
            Point::new(5.0, 6.0),
        ];
        assert!(clip_polygon(&bounds, &tri).unwrap().is_empty());
    }
}
