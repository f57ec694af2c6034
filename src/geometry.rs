//! Intersection, membership, angle and projection operations.
//!
//! Every function here is pure. Degenerate inputs (parallel lines, rays that
//! miss) yield `None`, an empty list, or the unchanged far endpoint.

use crate::config::{CIRCLE_TOLERANCE, EPS};
use crate::figure::{Circle, Polygon};
use crate::types::{LineEquation, Point, Segment};
use crate::utils::normalize_angle;

pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(&b)
}

pub fn length(segment: &Segment) -> f64 {
    segment.length()
}

/// True when `p` satisfies the segment's line equation within `EPS` and lies
/// inside its bounding box (inclusive).
pub fn point_on_segment(p: Point, segment: &Segment) -> bool {
    if segment.equation().eval(p).abs() > EPS {
        return false;
    }
    let (s, e) = (segment.start, segment.end);
    p.x <= s.x.max(e.x) && p.x >= s.x.min(e.x) && p.y <= s.y.max(e.y) && p.y >= s.y.min(e.y)
}

pub fn point_on_polygon(p: Point, polygon: &Polygon) -> bool {
    polygon.walls().any(|wall| point_on_segment(p, &wall))
}

pub fn point_on_circle(p: Point, circle: &Circle) -> bool {
    let dist_sq = (circle.center.x - p.x).powi(2) + (circle.center.y - p.y).powi(2);
    (dist_sq - circle.radius * circle.radius).abs() <= CIRCLE_TOLERANCE
}

/// Intersection of two infinite lines, `None` when they share `(a, b)`.
///
/// The result is not bounded by any segment; callers check membership.
pub fn line_intersect(first: &LineEquation, second: &LineEquation) -> Option<Point> {
    // Keep the vertical line (if any) first so the y solve uses a sloped one.
    let (first, second) = if second.is_vertical() {
        (second, first)
    } else {
        (first, second)
    };
    if first.a == second.a && first.b == second.b {
        return None;
    }
    let x = if first.is_vertical() {
        -first.c
    } else {
        (first.c * second.a - second.c) / (second.b - second.a * first.b)
    };
    let y = -second.b * x - second.c;
    if x.is_finite() && y.is_finite() {
        Some(Point::new(x, y))
    } else {
        None
    }
}

pub fn segment_intersect(first: &Segment, second: &Segment) -> Option<Point> {
    line_intersect(&first.equation(), &second.equation())
        .filter(|p| point_on_segment(*p, first) && point_on_segment(*p, second))
}

/// Line/circle intersection: zero, one (tangent) or two points.
///
/// Solved through the distance `h` from the centre to the line, which is the
/// quadratic's discriminant up to a positive factor. Lines within `EPS` of
/// tangency return the single foot of the perpendicular, whatever the slope.
pub fn circle_intersect(line: &LineEquation, circle: &Circle) -> Vec<Point> {
    let norm = line.a.hypot(line.b);
    if norm == 0.0 {
        return Vec::new();
    }
    // Unit normal is (b, a) / norm, unit direction (-a, b) / norm
    let signed = line.eval(circle.center) / norm;
    let foot = Point::new(
        circle.center.x - signed * line.b / norm,
        circle.center.y - signed * line.a / norm,
    );
    let h = signed.abs();
    if (h - circle.radius).abs() <= EPS {
        return vec![foot];
    }
    if h > circle.radius {
        return Vec::new();
    }
    let half = (circle.radius * circle.radius - h * h).sqrt();
    let (ux, uy) = (-line.a / norm, line.b / norm);
    vec![
        Point::new(foot.x + half * ux, foot.y + half * uy),
        Point::new(foot.x - half * ux, foot.y - half * uy),
    ]
}

/// Nearest circle intersection lying on `segment`, or `segment.end` if none.
pub fn closest_circle_hit(segment: &Segment, circle: &Circle) -> Point {
    circle_intersect(&segment.equation(), circle)
        .into_iter()
        .filter(|p| point_on_segment(*p, segment))
        .fold(ClosestHit::new(segment), ClosestHit::offer)
        .point
}

/// Polar angle of the segment direction, in `[0, 2π)`.
///
/// Independent of the `EPS` used for vertical line equations, so very short
/// segments keep their true direction.
pub fn angle(segment: &Segment) -> f64 {
    normalize_angle(segment.dy().atan2(segment.dx()))
}

pub fn ray_from(origin: Point, angle: f64, length: f64) -> Segment {
    Segment::new(
        origin,
        Point::new(
            origin.x + angle.cos() * length,
            origin.y + angle.sin() * length,
        ),
    )
}

/// Shortest segment from `point` to `wall`: to the perpendicular foot when it
/// falls within the wall, otherwise to the nearer endpoint.
pub fn closest_approach(point: Point, wall: &Segment) -> Segment {
    let (dx, dy) = (wall.dx(), wall.dy());
    let len_sq = dx * dx + dy * dy;
    if len_sq > 0.0 {
        let t = ((point.x - wall.start.x) * dx + (point.y - wall.start.y) * dy) / len_sq;
        if (0.0..=1.0).contains(&t) {
            let foot = Point::new(wall.start.x + t * dx, wall.start.y + t * dy);
            return Segment::new(point, foot);
        }
    }
    let nearer = if point.distance(&wall.start) < point.distance(&wall.end) {
        wall.start
    } else {
        wall.end
    };
    Segment::new(point, nearer)
}

/// Running "closest hit so far" along a ray.
///
/// Seeded with the ray's far endpoint; folding candidate points through
/// [`ClosestHit::offer`] leaves the first surface hit along the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestHit {
    pub origin: Point,
    pub point: Point,
    pub distance: f64,
}

impl ClosestHit {
    pub fn new(ray: &Segment) -> Self {
        ClosestHit {
            origin: ray.start,
            point: ray.end,
            distance: ray.length(),
        }
    }

    pub fn offer(self, candidate: Point) -> Self {
        let distance = self.origin.distance(&candidate);
        if distance < self.distance {
            ClosestHit {
                point: candidate,
                distance,
                ..self
            }
        } else {
            self
        }
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.origin, self.point)
    }
}
