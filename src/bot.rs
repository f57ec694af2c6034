use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::arena::Arena;
use crate::config::{SHOT_COOLDOWN_TICKS, TURN_DAMPING};
use crate::geometry;
use crate::player::ActorId;
use crate::types::Segment;
use crate::utils::signed_angle_delta;

/// The eight wander headings, relative to a bot's orientation.
pub const WANDER_DIRECTIONS: [f64; 8] = [
    0.0,
    FRAC_PI_4,
    FRAC_PI_2,
    3.0 * FRAC_PI_4,
    PI,
    -3.0 * FRAC_PI_4,
    -FRAC_PI_2,
    -FRAC_PI_4,
];

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BotState {
    pub direction: f64, // Relative wander heading
    pub since_last_shot: u32, // Think ticks since the last shot
}

/// Whether a bot with `cooldown` ticks on the clock may fire at a target.
pub fn should_fire(target_visible: bool, cooldown: u32) -> bool {
    target_visible && cooldown > SHOT_COOLDOWN_TICKS
}

// Drives every bot in the arena: wander, pick a target, fire, steer
#[derive(Debug)]
pub struct BotController {
    pub states: Vec<BotState>,
    rng: StdRng,
}

impl BotController {
    /// A fixed `seed` makes wander choices reproducible.
    pub fn new(bot_count: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        BotController {
            states: vec![BotState::default(); bot_count],
            rng,
        }
    }

    /// Picks a fresh wander octant for every bot.
    pub fn reroll_directions(&mut self) {
        for (i, state) in self.states.iter_mut().enumerate() {
            state.direction = WANDER_DIRECTIONS[self.rng.gen_range(0..WANDER_DIRECTIONS.len())];
            crate::debug_bot!("Bot {} now wandering at {:.3} rad", i, state.direction);
        }
    }

    /// One think step for every bot, in roster order.
    pub fn tick(&mut self, arena: &mut Arena) {
        for (i, state) in self.states.iter_mut().enumerate() {
            let me = ActorId::Bot(i);
            if arena.actor(me).is_none() {
                continue;
            }
            state.since_last_shot += 1;
            arena.move_actor(me, state.direction);

            let enemies = arena.enemies(me);
            let visible: Vec<ActorId> = enemies
                .iter()
                .copied()
                .filter(|&enemy| arena.is_visible(me, enemy))
                .collect();
            let candidates = if visible.is_empty() { enemies } else { visible };

            let Some(target) = nearest(arena, me, &candidates) else {
                continue;
            };

            if should_fire(arena.is_visible(me, target), state.since_last_shot) {
                crate::debug_bot!("Bot {} firing at {}", i, target);
                arena.shoot(me);
                state.since_last_shot = 0;
            }

            // Re-read positions: the shot may have respawned the target
            let (Some(body), Some(enemy)) = (arena.actor(me), arena.actor(target)) else {
                continue;
            };
            let bearing = geometry::angle(&Segment::new(body.position, enemy.position));
            let correction = signed_angle_delta(body.orientation(), bearing) / TURN_DAMPING;
            arena.turn(me, correction);
        }
    }
}

// First candidate with the smallest straight-line distance
fn nearest(arena: &Arena, me: ActorId, candidates: &[ActorId]) -> Option<ActorId> {
    let origin = arena.actor(me)?.position;
    let mut best: Option<(ActorId, f64)> = None;
    for &id in candidates {
        let Some(actor) = arena.actor(id) else {
            continue;
        };
        let dist = origin.distance(&actor.position);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((id, dist)),
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{INITIAL_HEALTH, SHOT_DAMAGE};
    use crate::figure::{Polygon, Texture};
    use crate::types::Point;
    use assert_approx_eq::assert_approx_eq;

    fn duel() -> Arena {
        Arena::new(
            Vec::new(),
            vec![Point::new(80.0, 150.0), Point::new(420.0, 150.0)],
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_should_fire() {
        assert!(!should_fire(true, SHOT_COOLDOWN_TICKS));
        assert!(should_fire(true, SHOT_COOLDOWN_TICKS + 1));
        assert!(!should_fire(false, 1000));
    }

    #[test]
    fn test_turns_a_seventh_toward_target_behind() {
        let mut arena = duel();
        let mut bots = BotController::new(1, Some(1));
        assert_approx_eq!(arena.bots[0].orientation(), 0.0);

        bots.tick(&mut arena);

        // Wandered one step straight ahead, then steered toward the player
        assert_approx_eq!(arena.bots[0].position.x, 421.0);
        assert_approx_eq!(arena.bots[0].orientation(), PI / 7.0);
        assert_eq!(bots.states[0].since_last_shot, 1);
        assert_eq!(arena.player.health, INITIAL_HEALTH);
    }

    #[test]
    fn test_fires_once_cooldown_exceeds_threshold() {
        let mut arena = duel();
        arena.bots[0].set_orientation(PI);
        let mut bots = BotController::new(1, Some(1));

        bots.states[0].since_last_shot = 9;
        bots.tick(&mut arena);
        assert_eq!(bots.states[0].since_last_shot, 10);
        assert_eq!(arena.player.health, INITIAL_HEALTH);

        bots.tick(&mut arena);
        assert_eq!(bots.states[0].since_last_shot, 0);
        assert_eq!(arena.player.health, INITIAL_HEALTH - SHOT_DAMAGE);
    }

    #[test]
    fn test_hidden_target_still_steers_but_never_fires() {
        let wall = Polygon::uniform(
            vec![
                Point::new(200.0, 0.0),
                Point::new(210.0, 0.0),
                Point::new(210.0, 300.0),
                Point::new(200.0, 300.0),
            ],
            Texture::Stone,
        )
        .unwrap();
        let mut arena = Arena::new(
            vec![wall.into()],
            vec![Point::new(80.0, 150.0), Point::new(420.0, 150.0)],
            1,
        )
        .unwrap();
        assert!(!arena.is_visible(ActorId::Bot(0), ActorId::Player));

        let mut bots = BotController::new(1, Some(1));
        bots.states[0].since_last_shot = 50;
        bots.tick(&mut arena);

        assert_eq!(bots.states[0].since_last_shot, 51);
        assert_eq!(arena.player.health, INITIAL_HEALTH);
        assert_approx_eq!(arena.bots[0].orientation(), PI / 7.0);
    }

    #[test]
    fn test_steering_converges_on_target() {
        let mut arena = duel();
        arena.player.health = 10_000;
        let mut bots = BotController::new(1, Some(1));
        for _ in 0..60 {
            bots.tick(&mut arena);
        }
        let bot = &arena.bots[0];
        let bearing = geometry::angle(&Segment::new(bot.position, arena.player.position));
        assert!(signed_angle_delta(bot.orientation(), bearing).abs() < 0.05);
    }

    #[test]
    fn test_reroll_is_seeded_and_uses_octants() {
        let mut a = BotController::new(6, Some(42));
        let mut b = BotController::new(6, Some(42));
        for _ in 0..5 {
            a.reroll_directions();
            b.reroll_directions();
            assert_eq!(a.states, b.states);
            for state in &a.states {
                assert!(WANDER_DIRECTIONS.contains(&state.direction));
            }
        }
    }

    #[test]
    fn test_nearest_prefers_first_on_tie() {
        let mut arena = Arena::new(Vec::new(), vec![Point::new(0.0, 0.0)], 2).unwrap();
        arena.player.position = Point::new(0.0, 0.0);
        arena.bots[0].position = Point::new(10.0, 0.0);
        arena.bots[1].position = Point::new(20.0, 0.0);
        let me = ActorId::Bot(1);
        let candidates = arena.enemies(me);
        assert_eq!(nearest(&arena, me, &candidates), Some(ActorId::Bot(0)));

        arena.player.position = Point::new(30.0, 0.0);
        assert_eq!(nearest(&arena, me, &candidates), Some(ActorId::Bot(0)));
    }
}
