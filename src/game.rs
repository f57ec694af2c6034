use std::collections::VecDeque;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::time::Duration;

use log::info;

use crate::arena::Arena;
pub use crate::arena::Command;
use crate::bot::BotController;
use crate::config;
use crate::error::ArenaError;
use crate::player::ActorId;

/// Periodic work the simulation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    RerollDirections,
    BotThink,
    Frame,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    event: TickEvent,
    period: Duration,
    next_due: Duration,
}

/// Deterministic replacement for wall-clock timers.
///
/// Each timer first fires one period after start. Events due at the same
/// instant come out in registration order: re-roll, think, frame.
#[derive(Debug, Clone)]
pub struct Scheduler {
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        let timer = |event, millis| {
            let period = Duration::from_millis(millis);
            Timer {
                event,
                period,
                next_due: period,
            }
        };
        Scheduler {
            timers: vec![
                timer(TickEvent::RerollDirections, config::WANDER_REROLL_PERIOD_MS),
                timer(TickEvent::BotThink, config::BOT_THINK_PERIOD_MS),
                timer(TickEvent::Frame, config::FRAME_PERIOD_MS),
            ],
        }
    }

    /// Takes the earliest event due at or before `until`, rescheduling it.
    pub fn poll(&mut self, until: Duration) -> Option<TickEvent> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|timer| timer.next_due <= until)
            .min_by_key(|timer| timer.next_due)?;
        timer.next_due += timer.period;
        Some(timer.event)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Movement keys currently held by the human.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    /// Step direction relative to the orientation, or `None` when the held
    /// keys cancel out.
    pub fn relative_angle(&self) -> Option<f64> {
        let mut dir = 0;
        if self.forward {
            dir += 3;
        }
        if self.backward {
            dir -= 3;
        }
        if self.left {
            dir += 1;
        }
        if self.right {
            dir -= 1;
        }
        match dir {
            4 => Some(FRAC_PI_4),
            3 => Some(0.0),
            2 => Some(-FRAC_PI_4),
            1 => Some(FRAC_PI_2),
            -1 => Some(-FRAC_PI_2),
            -2 => Some(3.0 * FRAC_PI_4),
            -3 => Some(PI),
            -4 => Some(-3.0 * FRAC_PI_4),
            _ => None,
        }
    }
}

/// Turn produced by a horizontal mouse motion of `dx` pixels.
pub fn turn_from_mouse(dx: f64, screen_width: f64) -> f64 {
    dx * config::MOUSE_TURN_SPAN / screen_width
}

/// The Game struct owns the arena, the bot AI and the simulated clock
#[derive(Debug)]
pub struct Game {
    pub arena: Arena,
    pub bots: BotController,
    scheduler: Scheduler,
    commands: VecDeque<Command>,
    input: MoveInput,
    elapsed: Duration,
    frames: u64,
}

impl Game {
    /// A game on the standard map.
    pub fn new(bot_count: usize, seed: Option<u64>) -> Result<Self, ArenaError> {
        let arena = Arena::standard(bot_count)?;
        Ok(Self::with_arena(arena, seed))
    }

    pub fn with_arena(arena: Arena, seed: Option<u64>) -> Self {
        let bots = BotController::new(arena.bots().len(), seed);
        info!("Game ready with {} bots.", arena.bots().len());
        Game {
            arena,
            bots,
            scheduler: Scheduler::new(),
            commands: VecDeque::new(),
            input: MoveInput::default(),
            elapsed: Duration::ZERO,
            frames: 0,
        }
    }

    /// Queues a command for the next frame.
    pub fn submit(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    pub fn set_input(&mut self, input: MoveInput) {
        self.input = input;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs every event falling due within the next `dt`, in time order.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.elapsed + dt;
        while let Some(event) = self.scheduler.poll(until) {
            self.dispatch(event);
        }
        self.elapsed = until;
    }

    fn dispatch(&mut self, event: TickEvent) {
        match event {
            TickEvent::RerollDirections => self.bots.reroll_directions(),
            TickEvent::BotThink => self.bots.tick(&mut self.arena),
            TickEvent::Frame => {
                if let Some(angle) = self.input.relative_angle() {
                    self.arena.move_actor(ActorId::Player, angle);
                }
                while let Some(command) = self.commands.pop_front() {
                    self.arena.apply(command);
                }
                self.arena.update_view_rays();
                self.frames += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;
    use assert_approx_eq::assert_approx_eq;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_scheduler_counts_over_one_second() {
        let mut scheduler = Scheduler::new();
        let mut counts = [0; 3];
        while let Some(event) = scheduler.poll(Duration::from_secs(1)) {
            match event {
                TickEvent::RerollDirections => counts[0] += 1,
                TickEvent::BotThink => counts[1] += 1,
                TickEvent::Frame => counts[2] += 1,
            }
        }
        assert_eq!(counts, [1, 100, 333]);
    }

    #[test]
    fn test_scheduler_orders_ties_and_waits_a_period() {
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.poll(Duration::from_millis(2)), None);
        assert_eq!(scheduler.poll(Duration::from_millis(3)), Some(TickEvent::Frame));
        assert_eq!(scheduler.poll(Duration::from_millis(3)), None);

        // At 30 ms the think and frame timers both fall due
        let events: Vec<TickEvent> =
            std::iter::from_fn(|| scheduler.poll(Duration::from_millis(30))).collect();
        let frames = events.iter().filter(|&&e| e == TickEvent::Frame).count();
        assert_eq!(frames, 9);
        let at_30 = &events[events.len() - 2..];
        assert_eq!(at_30, &[TickEvent::BotThink, TickEvent::Frame]);
    }

    #[test]
    fn test_move_input_mapping() {
        let keys = |forward, backward, left, right| MoveInput {
            forward,
            backward,
            left,
            right,
        };
        assert_eq!(keys(false, false, false, false).relative_angle(), None);
        assert_eq!(keys(true, true, false, false).relative_angle(), None);
        assert_eq!(keys(false, false, true, true).relative_angle(), None);
        assert_eq!(keys(true, false, false, false).relative_angle(), Some(0.0));
        assert_eq!(keys(false, true, false, false).relative_angle(), Some(PI));
        assert_eq!(keys(false, false, true, false).relative_angle(), Some(FRAC_PI_2));
        assert_eq!(keys(false, false, false, true).relative_angle(), Some(-FRAC_PI_2));
        assert_eq!(keys(true, false, true, false).relative_angle(), Some(FRAC_PI_4));
        assert_eq!(keys(true, false, false, true).relative_angle(), Some(-FRAC_PI_4));
        assert_eq!(
            keys(false, true, true, false).relative_angle(),
            Some(3.0 * FRAC_PI_4)
        );
        assert_eq!(
            keys(false, true, false, true).relative_angle(),
            Some(-3.0 * FRAC_PI_4)
        );
    }

    #[test]
    fn test_turn_from_mouse() {
        assert_approx_eq!(turn_from_mouse(800.0, 800.0), config::MOUSE_TURN_SPAN);
        assert_approx_eq!(turn_from_mouse(-400.0, 800.0), -config::MOUSE_TURN_SPAN / 2.0);
    }

    #[test]
    fn test_held_keys_move_player_each_frame() {
        init_logs();
        let mut game = Game::new(0, Some(1)).unwrap();
        assert_eq!(game.arena.player.position, Point::new(80.0, 150.0));
        game.set_input(MoveInput {
            forward: true,
            ..MoveInput::default()
        });

        game.advance(Duration::from_millis(30));
        assert_eq!(game.frames(), 10);
        assert_approx_eq!(game.arena.player.position.x, 90.0);
        assert_eq!(game.arena.view_rays().len(), config::LINE_COUNT);
        assert_eq!(game.elapsed(), Duration::from_millis(30));
    }

    #[test]
    fn test_commands_wait_for_next_frame() {
        init_logs();
        let mut game = Game::new(0, Some(1)).unwrap();
        game.submit(Command::Turn {
            actor: ActorId::Player,
            delta: 1.0,
        });
        game.advance(Duration::from_millis(2));
        assert_approx_eq!(game.arena.player.orientation(), 0.0);

        game.advance(Duration::from_millis(1));
        assert_approx_eq!(game.arena.player.orientation(), 1.0);

        // The fan is rebuilt after the frame's commands
        let first = game.arena.view_rays()[0];
        let heading = crate::geometry::angle(&first);
        assert_approx_eq!(heading, 1.0 + config::VIEW_ANGLE / 2.0);
    }

    #[test]
    fn test_bots_think_between_frames() {
        init_logs();
        let arena = Arena::new(
            Vec::new(),
            vec![Point::new(80.0, 150.0), Point::new(420.0, 150.0)],
            1,
        )
        .unwrap();
        let mut game = Game::with_arena(arena, Some(3));
        game.advance(Duration::from_millis(50));

        // Five think ticks: five unit steps while curving toward the player
        let travelled = game.arena.bots[0].position.distance(&Point::new(420.0, 150.0));
        assert!(travelled > 3.0 && travelled <= 5.0, "travelled {}", travelled);
        assert_eq!(game.bots.states[0].since_last_shot, 5);
        assert!(game.arena.bots[0].orientation() > 0.0);
    }
}
