//! Geometry primitives shared by the kernel and the world model.

use crate::config::EPS;

/// A point (or free vector) in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A directed segment from `start` to `end`.
///
/// Rays are segments too: `start` is the origin and `end` the far point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Segment { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    pub fn equation(&self) -> LineEquation {
        LineEquation::through(self.start, self.end)
    }

    pub fn dx(&self) -> f64 {
        self.end.x - self.start.x
    }

    pub fn dy(&self) -> f64 {
        self.end.y - self.start.y
    }
}

/// Line in the form `a*y + b*x + c = 0`.
///
/// Non-vertical lines are normalised to `a = 1`; lines whose endpoints differ
/// by at most `EPS` in x are stored as `a = 0, b = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEquation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl LineEquation {
    pub fn through(p: Point, q: Point) -> Self {
        if (p.x - q.x).abs() <= EPS {
            LineEquation {
                a: 0.0,
                b: 1.0,
                c: -p.x,
            }
        } else {
            let b = -(p.y - q.y) / (p.x - q.x);
            LineEquation {
                a: 1.0,
                b,
                c: -p.y - b * p.x,
            }
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.a == 0.0
    }

    /// Residual of the equation at `p`; zero when `p` lies on the line.
    pub fn eval(&self, p: Point) -> f64 {
        self.a * p.y + self.b * p.x + self.c
    }
}
