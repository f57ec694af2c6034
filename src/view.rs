//! Read-only queries a renderer needs to draw one frame.
//!
//! Nothing here draws. Each function turns the arena's current ray fan into
//! numbers (texture columns, projected heights, shading, marker positions) so
//! any front end can paint them.

use std::f64::consts::{PI, TAU};

use crate::arena::Arena;
use crate::config::{LINE_COUNT, LINE_LENGTH, TILE_DISTANCE};
use crate::figure::{Figure, Polygon, Texture};
use crate::geometry;
use crate::player::ActorId;
use crate::types::{Point, Segment};

/// Texture and horizontal position in `[0, 1)` of a surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub texture: Texture,
    pub column: f64,
}

/// One screen column's worth of a view ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSample {
    pub distance: f64,
    pub height: f64, // Half-height of the projected wall slice
    pub shade: f64,  // 0 = no darkening, 1 = fully dark
    pub surface: Option<Surface>,
}

/// Health bar anchor for a bot in view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotMarker {
    pub bot: usize,
    pub column: f64,
    pub height: f64,
    pub health: i32,
}

fn polygon_surface(polygon: &Polygon, point: Point) -> Option<Surface> {
    let (index, wall) = polygon.wall_at(point)?;
    let texture = polygon.textures()[index];
    let span = if texture.is_stretched() {
        wall.length()
    } else {
        2.0 * TILE_DISTANCE
    };
    Some(Surface {
        texture,
        column: (wall.start.distance(&point) / span).fract(),
    })
}

/// What is painted at `point`: a figure first, then a bot hitbox.
pub fn surface_at(arena: &Arena, point: Point) -> Option<Surface> {
    match arena.figure_at(point) {
        Some(Figure::Polygon(polygon)) => polygon_surface(polygon, point),
        Some(Figure::Circle(circle)) => {
            let around = geometry::angle(&Segment::new(circle.center, point)) + PI;
            let turns = if circle.texture.is_stretched() {
                around / TAU
            } else {
                around * circle.radius / (2.0 * TILE_DISTANCE)
            };
            Some(Surface {
                texture: circle.texture,
                column: turns.fract(),
            })
        }
        None => {
            let bot = arena.bot_at(point)?;
            polygon_surface(&arena.bots()[bot].model(), point)
        }
    }
}

/// Index into the view fan for screen column `x` of `screen_width`.
pub fn ray_for_column(x: usize, screen_width: usize) -> usize {
    if screen_width == 0 {
        return 0;
    }
    (x * LINE_COUNT / screen_width).min(LINE_COUNT - 1)
}

/// Projects every ray of the current fan, left edge first.
pub fn sample_columns(arena: &Arena, screen_height: f64) -> Vec<ColumnSample> {
    arena
        .view_rays()
        .iter()
        .map(|ray| {
            let distance = ray.length();
            ColumnSample {
                distance,
                height: screen_height * TILE_DISTANCE / distance,
                shade: (distance / LINE_LENGTH).clamp(0.0, 1.0),
                surface: surface_at(arena, ray.end),
            }
        })
        .collect()
}

/// Bots the player can see inside the field of view, with their screen column.
pub fn bot_markers(arena: &Arena, screen_width: f64, screen_height: f64) -> Vec<BotMarker> {
    let rays = arena.view_rays();
    let (Some(first), Some(last)) = (rays.first(), rays.last()) else {
        return Vec::new();
    };
    let right = geometry::angle(first);
    let mut left = geometry::angle(last);
    if left > right {
        left -= TAU;
    }
    if right <= left {
        return Vec::new();
    }

    let eye = arena.player().position;
    let mut markers = Vec::new();
    for (i, bot) in arena.bots().iter().enumerate() {
        let sight = Segment::new(eye, bot.position);
        let mut bearing = geometry::angle(&sight);
        if bearing > right {
            bearing -= TAU;
        }
        if bearing < left || !arena.is_visible(ActorId::Player, ActorId::Bot(i)) {
            continue;
        }
        let clipped = arena.cast_and_clip(ActorId::Player, sight);
        markers.push(BotMarker {
            bot: i,
            column: screen_width * (right - bearing) / (right - left),
            height: screen_height * TILE_DISTANCE / clipped.length(),
            health: bot.health,
        });
    }
    markers
}
