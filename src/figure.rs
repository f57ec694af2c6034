//! Obstacle shapes and their surface textures.

use crate::error::ArenaError;
use crate::geometry::{self, ClosestHit};
use crate::types::{Point, Segment};

/// Handle for a surface image.
///
/// Image decoding belongs to the renderer; the kernel only needs to know which
/// image covers a surface and whether it is stretched or tiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Texture {
    Bricks,
    Planks,
    Wood,
    StoneBricks,
    Stone,
    Birch,
    PlayerFront,
    PlayerRight,
    PlayerBack,
    PlayerLeft,
}

impl Texture {
    pub fn file_name(&self) -> &'static str {
        match self {
            Texture::Bricks => "bricks.png",
            Texture::Planks => "planks.png",
            Texture::Wood => "wood.png",
            Texture::StoneBricks => "stone_bricks.png",
            Texture::Stone => "stone.png",
            Texture::Birch => "birch.png",
            Texture::PlayerFront => "front.png",
            Texture::PlayerRight => "right.png",
            Texture::PlayerBack => "back.png",
            Texture::PlayerLeft => "left.png",
        }
    }

    /// Stretched textures span a whole surface once; the rest repeat.
    pub fn is_stretched(&self) -> bool {
        matches!(
            self,
            Texture::PlayerFront | Texture::PlayerRight | Texture::PlayerBack | Texture::PlayerLeft
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub texture: Texture,
}

impl Circle {
    pub fn new(center: Point, radius: f64, texture: Texture) -> Result<Self, ArenaError> {
        if !(radius > 0.0) {
            return Err(ArenaError::InvalidRadius(radius));
        }
        Ok(Circle {
            center,
            radius,
            texture,
        })
    }
}

/// Closed polygon; edge `i` runs from point `i` to point `(i + 1) % n` and is
/// covered by texture `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
    textures: Vec<Texture>,
}

impl Polygon {
    pub fn new(points: Vec<Point>, textures: Vec<Texture>) -> Result<Self, ArenaError> {
        if points.len() < 3 {
            return Err(ArenaError::TooFewPoints(points.len()));
        }
        if points.len() != textures.len() {
            return Err(ArenaError::TextureMismatch {
                points: points.len(),
                textures: textures.len(),
            });
        }
        Ok(Polygon { points, textures })
    }

    /// Polygon with the same texture on every edge.
    pub fn uniform(points: Vec<Point>, texture: Texture) -> Result<Self, ArenaError> {
        let textures = vec![texture; points.len()];
        Self::new(points, textures)
    }

    // Hitboxes are always well-formed quads, so skip validation.
    pub(crate) fn quad(points: [Point; 4], textures: [Texture; 4]) -> Self {
        Polygon {
            points: points.to_vec(),
            textures: textures.to_vec(),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn textures(&self) -> &[Texture] {
        &self.textures
    }

    pub fn walls(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| Segment::new(self.points[i], self.points[(i + 1) % n]))
    }

    /// First edge containing `point`, with its index.
    pub fn wall_at(&self, point: Point) -> Option<(usize, Segment)> {
        self.walls()
            .enumerate()
            .find(|(_, wall)| geometry::point_on_segment(point, wall))
    }

    pub fn texture_at(&self, point: Point) -> Option<Texture> {
        self.wall_at(point).map(|(i, _)| self.textures[i])
    }

    pub(crate) fn clip(&self, ray: &Segment, hit: ClosestHit) -> ClosestHit {
        self.walls().fold(hit, |hit, wall| {
            match geometry::segment_intersect(ray, &wall) {
                Some(point) => hit.offer(point),
                None => hit,
            }
        })
    }
}

/// A static obstacle.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Circle(Circle),
    Polygon(Polygon),
}

impl Figure {
    /// Whether `point` lies on the figure's boundary.
    pub fn contains_surface_point(&self, point: Point) -> bool {
        match self {
            Figure::Circle(circle) => geometry::point_on_circle(point, circle),
            Figure::Polygon(polygon) => geometry::point_on_polygon(point, polygon),
        }
    }

    /// Folds this figure's intersections with `ray` into `hit`.
    pub fn clip(&self, ray: &Segment, hit: ClosestHit) -> ClosestHit {
        match self {
            Figure::Circle(circle) => geometry::circle_intersect(&ray.equation(), circle)
                .into_iter()
                .filter(|p| geometry::point_on_segment(*p, ray))
                .fold(hit, ClosestHit::offer),
            Figure::Polygon(polygon) => polygon.clip(ray, hit),
        }
    }
}

impl From<Circle> for Figure {
    fn from(circle: Circle) -> Self {
        Figure::Circle(circle)
    }
}

impl From<Polygon> for Figure {
    fn from(polygon: Polygon) -> Self {
        Figure::Polygon(polygon)
    }
}
