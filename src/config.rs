//! Configuration constants for the raycasting arena.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

// Numeric tolerances
pub const EPS: f64 = 1e-4; // Line/segment membership tolerance
pub const CIRCLE_TOLERANCE: f64 = 0.1; // |dist^2 - r^2| tolerance for circle membership

// Map
pub const MAP_SIZE: f64 = 500.0; // Side length of the standard map

// Player body and movement
pub const STEP_LENGTH: f64 = 1.0; // Distance covered by one move command
pub const PLAYER_WIDTH: f64 = 5.0; // Half-diagonal of the hitbox square
pub const INITIAL_HEALTH: i32 = 100;

// View
pub const VIEW_ANGLE: f64 = FRAC_PI_2; // Field of view, centred on the orientation
pub const LINE_LENGTH: f64 = 700.0; // Maximum length of a view ray
pub const LINE_COUNT: usize = 1000; // Rays per frame
pub const TILE_DISTANCE: f64 = 15.0; // Projection distance; tiled textures repeat every 2x this
pub const MOUSE_TURN_SPAN: f64 = FRAC_PI_3; // Turn produced by sweeping the full screen width

// Combat
pub const SHOT_RANGE: f64 = 1.0e6; // Far beyond any map; the outer walls always clip it
pub const SHOT_DAMAGE: i32 = 25;
pub const DEFAULT_BOT_COUNT: usize = 4;

// Bot behaviour
pub const SHOT_COOLDOWN_TICKS: u32 = 10; // A bot fires only once its counter exceeds this
pub const TURN_DAMPING: f64 = 7.0; // Bearing error is divided by this each tick

// Circle collision chords
pub const CIRCLE_PROBE_MARGIN: f64 = 10.0; // Probe overshoot when already inside a circle
pub const CIRCLE_CHORD_HALF_LENGTH: f64 = 1.0;

// Scheduler periods (milliseconds)
pub const WANDER_REROLL_PERIOD_MS: u64 = 1000;
pub const BOT_THINK_PERIOD_MS: u64 = 10;
pub const FRAME_PERIOD_MS: u64 = 3;
