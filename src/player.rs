use std::f64::consts::FRAC_PI_4;
use std::fmt;

use crate::config;
use crate::figure::{Polygon, Texture};
use crate::geometry;
use crate::types::Point;
use crate::utils::normalize_angle;

/// Identifies a member of the arena roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorId {
    Player,
    Bot(usize),
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorId::Player => write!(f, "Player"),
            ActorId::Bot(i) => write!(f, "Bot {}", i),
        }
    }
}

// Textures drawn on the four faces of a player's hitbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skin {
    pub front: Texture,
    pub right: Texture,
    pub back: Texture,
    pub left: Texture,
}

impl Default for Skin {
    fn default() -> Self {
        Skin {
            front: Texture::PlayerFront,
            right: Texture::PlayerRight,
            back: Texture::PlayerBack,
            left: Texture::PlayerLeft,
        }
    }
}

// Represents the human player or a bot
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Point,
    orientation: f64, // Radians, always in [0, 2π)
    pub health: i32,
    pub skin: Skin,
}

impl Player {
    pub fn new(position: Point) -> Self {
        Player {
            position,
            orientation: 0.0,
            health: config::INITIAL_HEALTH,
            skin: Skin::default(),
        }
    }

    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: f64) {
        self.orientation = normalize_angle(orientation);
    }

    pub fn rotate(&mut self, delta: f64) {
        self.set_orientation(self.orientation + delta);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Hitbox square rotated by the orientation, corners `PLAYER_WIDTH` from
    /// the centre. Recomputed on every call so it always tracks the body.
    pub fn model(&self) -> Polygon {
        let corner = |offset: f64| {
            geometry::ray_from(self.position, self.orientation + offset, config::PLAYER_WIDTH).end
        };
        Polygon::quad(
            [
                corner(-FRAC_PI_4),
                corner(FRAC_PI_4),
                corner(3.0 * FRAC_PI_4),
                corner(-3.0 * FRAC_PI_4),
            ],
            [self.skin.front, self.skin.left, self.skin.back, self.skin.right],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_orientation_stays_normalized() {
        let mut player = Player::new(Point::new(0.0, 0.0));
        let deltas = [
            0.3, -1.0, 7.5, -20.0, PI, -PI, TAU, -TAU, 1e-12, -1e-12, 123.456, -0.0001,
        ];
        for delta in deltas {
            player.rotate(delta);
            let o = player.orientation();
            assert!((0.0..TAU).contains(&o), "orientation {} out of range", o);
        }

        player.set_orientation(-PI / 2.0);
        assert_approx_eq!(player.orientation(), 3.0 * PI / 2.0);
        player.set_orientation(5.0 * PI);
        assert_approx_eq!(player.orientation(), PI);
    }

    #[test]
    fn test_model_corners_at_player_width() {
        let mut player = Player::new(Point::new(100.0, 200.0));
        player.set_orientation(0.7);
        let model = player.model();
        assert_eq!(model.points().len(), 4);
        for corner in model.points() {
            assert_approx_eq!(corner.distance(&player.position), config::PLAYER_WIDTH);
        }
        // Front face is the first edge and straddles the facing direction
        let front = model.walls().next().unwrap();
        let mid = Point::new(
            (front.start.x + front.end.x) / 2.0,
            (front.start.y + front.end.y) / 2.0,
        );
        let facing = geometry::ray_from(player.position, 0.7, 1.0).end;
        assert!(mid.distance(&facing) < player.position.distance(&mid));
        assert_eq!(model.textures()[0], Texture::PlayerFront);
    }

    #[test]
    fn test_model_follows_position() {
        let mut player = Player::new(Point::new(0.0, 0.0));
        let before = player.model();
        player.position = Point::new(10.0, 0.0);
        let after = player.model();
        for (a, b) in before.points().iter().zip(after.points()) {
            assert_approx_eq!(b.x - a.x, 10.0);
            assert_approx_eq!(b.y - a.y, 0.0);
        }
    }

    #[test]
    fn test_death_threshold_is_inclusive() {
        let mut player = Player::new(Point::new(0.0, 0.0));
        player.health = 1;
        assert!(!player.is_dead());
        player.health = 0;
        assert!(player.is_dead());
        player.health = -25;
        assert!(player.is_dead());
    }

    #[test]
    fn test_actor_display() {
        assert_eq!(ActorId::Player.to_string(), "Player");
        assert_eq!(ActorId::Bot(2).to_string(), "Bot 2");
    }
}
