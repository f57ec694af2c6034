pub mod arena;
pub mod bot;
pub mod config;
pub mod error;
pub mod figure;
pub mod game;
pub mod geometry;
pub mod logging;
pub mod map;
pub mod player;
pub mod types;
pub mod utils;
pub mod view;

pub use arena::{Arena, Command, ShotOutcome};
pub use error::ArenaError;
pub use game::{Game, MoveInput};
pub use player::ActorId;
