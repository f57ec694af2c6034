use std::f64::consts::{FRAC_PI_2, PI};

use log::{info, warn};

use crate::config::*;
use crate::error::ArenaError;
use crate::figure::Figure;
use crate::geometry::{self, ClosestHit};
use crate::map;
use crate::player::{ActorId, Player};
use crate::types::{Point, Segment};

/// Commands the input layer (or a bot) can issue against the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Step once at `angle` relative to the actor's orientation.
    Move { actor: ActorId, angle: f64 },
    Turn { actor: ActorId, delta: f64 },
    Shoot { actor: ActorId },
}

/// Result of a single shot.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotOutcome {
    /// Where the shot ray stopped.
    pub impact: Point,
    /// Enemies whose hitbox contained the impact point.
    pub hits: Vec<ActorId>,
    /// Subset of `hits` that died and were respawned.
    pub kills: Vec<ActorId>,
}

// The world: static figures, spawn points, and everyone moving among them
#[derive(Debug)]
pub struct Arena {
    figures: Vec<Figure>,
    spawns: Vec<Point>,
    pub(crate) player: Player,
    pub(crate) bots: Vec<Player>,
    view_rays: Vec<Segment>,
    kills: u32,
    deaths: u32,
}

impl Arena {
    /// Builds an arena and places the player, then each bot in turn, on the
    /// spawn point farthest from those already placed.
    pub fn new(
        figures: Vec<Figure>,
        spawns: Vec<Point>,
        bot_count: usize,
    ) -> Result<Self, ArenaError> {
        let first_spawn = *spawns.first().ok_or(ArenaError::NoSpawnPoints)?;
        let mut arena = Arena {
            figures,
            spawns,
            player: Player::new(first_spawn),
            bots: Vec::with_capacity(bot_count),
            view_rays: Vec::new(),
            kills: 0,
            deaths: 0,
        };
        arena.respawn(ActorId::Player);
        for i in 0..bot_count {
            arena.bots.push(Player::new(first_spawn));
            arena.respawn(ActorId::Bot(i));
        }
        info!(
            "Arena created with {} figures, {} spawn points and {} bots.",
            arena.figures.len(),
            arena.spawns.len(),
            arena.bots.len()
        );
        Ok(arena)
    }

    /// The compiled-in 500x500 map.
    pub fn standard(bot_count: usize) -> Result<Self, ArenaError> {
        Self::new(map::standard_figures()?, map::standard_spawns(), bot_count)
    }

    // --- Queries ---

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn spawns(&self) -> &[Point] {
        &self.spawns
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn bots(&self) -> &[Player] {
        &self.bots
    }

    /// Ray fan from the last frame, ordered left edge of the view first.
    pub fn view_rays(&self) -> &[Segment] {
        &self.view_rays
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    pub fn actor(&self, id: ActorId) -> Option<&Player> {
        match id {
            ActorId::Player => Some(&self.player),
            ActorId::Bot(i) => self.bots.get(i),
        }
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Player> {
        match id {
            ActorId::Player => Some(&mut self.player),
            ActorId::Bot(i) => self.bots.get_mut(i),
        }
    }

    /// The player sees every bot; a bot sees the other bots, then the player.
    pub fn enemies(&self, id: ActorId) -> Vec<ActorId> {
        match id {
            ActorId::Player => (0..self.bots.len()).map(ActorId::Bot).collect(),
            ActorId::Bot(me) => (0..self.bots.len())
                .filter(|&i| i != me)
                .map(ActorId::Bot)
                .chain(std::iter::once(ActorId::Player))
                .collect(),
        }
    }

    /// First figure whose surface contains `point`.
    pub fn figure_at(&self, point: Point) -> Option<&Figure> {
        self.figures
            .iter()
            .find(|figure| figure.contains_surface_point(point))
    }

    /// Index of the first bot whose hitbox surface contains `point`.
    pub fn bot_at(&self, point: Point) -> Option<usize> {
        self.bots
            .iter()
            .position(|bot| geometry::point_on_polygon(point, &bot.model()))
    }

    // --- Ray casting ---

    /// Shortens `ray` to its first hit against the figures and the hitboxes
    /// of `origin`'s enemies. A ray that hits nothing comes back unchanged.
    pub fn cast_and_clip(&self, origin: ActorId, ray: Segment) -> Segment {
        let hit = self
            .figures
            .iter()
            .fold(ClosestHit::new(&ray), |hit, figure| figure.clip(&ray, hit));
        let hit = self
            .enemies(origin)
            .into_iter()
            .filter_map(|id| self.actor(id))
            .fold(hit, |hit, enemy| enemy.model().clip(&ray, hit));
        crate::debug_ray!(
            "{} ray clipped at ({:.2}, {:.2}), length {:.2}",
            origin,
            hit.point.x,
            hit.point.y,
            hit.distance
        );
        hit.segment()
    }

    /// Rebuilds the player's view fan: `LINE_COUNT` rays sweeping from
    /// `orientation + VIEW_ANGLE / 2` down to `orientation - VIEW_ANGLE / 2`.
    pub fn update_view_rays(&mut self) {
        let origin = self.player.position;
        let first = self.player.orientation() + VIEW_ANGLE / 2.0;
        let step = if LINE_COUNT > 1 {
            VIEW_ANGLE / (LINE_COUNT - 1) as f64
        } else {
            0.0
        };
        self.view_rays = (0..LINE_COUNT)
            .map(|i| {
                let ray = geometry::ray_from(origin, first - i as f64 * step, LINE_LENGTH);
                self.cast_and_clip(ActorId::Player, ray)
            })
            .collect();
    }

    /// Whether the ray from `observer` to `target` reaches the target's
    /// hitbox before anything else. Not symmetric: each direction is clipped
    /// against the observer's own enemy set.
    pub fn is_visible(&self, observer: ActorId, target: ActorId) -> bool {
        let (Some(from), Some(to)) = (self.actor(observer), self.actor(target)) else {
            return false;
        };
        let clipped = self.cast_and_clip(observer, Segment::new(from.position, to.position));
        geometry::point_on_polygon(clipped.end, &to.model())
    }

    // --- Movement ---

    /// Segments `actor` must keep `PLAYER_WIDTH` away from: polygon edges, a
    /// short chord on each circle facing the actor, and enemy hitbox edges.
    pub fn walls_for(&self, actor: ActorId) -> Vec<Segment> {
        let Some(body) = self.actor(actor) else {
            return Vec::new();
        };
        let mut walls = Vec::new();
        for figure in &self.figures {
            match figure {
                Figure::Polygon(polygon) => walls.extend(polygon.walls()),
                Figure::Circle(circle) => {
                    let mut probe = Segment::new(circle.center, body.position);
                    if probe.length() < circle.radius {
                        probe = geometry::ray_from(
                            circle.center,
                            geometry::angle(&probe),
                            circle.radius + CIRCLE_PROBE_MARGIN,
                        );
                    }
                    let contact = geometry::closest_circle_hit(&probe, circle);
                    let heading = geometry::angle(&probe);
                    let first =
                        geometry::ray_from(contact, heading + FRAC_PI_2, CIRCLE_CHORD_HALF_LENGTH);
                    let second =
                        geometry::ray_from(contact, heading - FRAC_PI_2, CIRCLE_CHORD_HALF_LENGTH);
                    walls.push(Segment::new(first.end, second.end));
                }
            }
        }
        for enemy in self.enemies(actor) {
            if let Some(enemy) = self.actor(enemy) {
                walls.extend(enemy.model().walls());
            }
        }
        walls
    }

    /// Steps `actor` once at `relative_angle` from its orientation.
    ///
    /// Walls closer than `PLAYER_WIDTH` push the tentative position back out
    /// along their normal. If the pushes leave it too close to any wall (for
    /// example in a gap narrower than two widths) the move is dropped.
    /// Returns whether the actor moved.
    pub fn move_actor(&mut self, actor: ActorId, relative_angle: f64) -> bool {
        let Some(body) = self.actor(actor) else {
            warn!("Move requested for unknown actor {}", actor);
            return false;
        };
        let heading = body.orientation() + relative_angle;
        let mut next = geometry::ray_from(body.position, heading, STEP_LENGTH).end;

        let walls = self.walls_for(actor);
        for wall in &walls {
            let approach = geometry::closest_approach(next, wall);
            if approach.length() < PLAYER_WIDTH {
                let outward = geometry::angle(&approach) + PI;
                next = geometry::ray_from(approach.end, outward, PLAYER_WIDTH).end;
            }
        }

        let blocked = walls
            .iter()
            .any(|wall| geometry::closest_approach(next, wall).length() < PLAYER_WIDTH - EPS);
        if blocked {
            crate::debug_move!(
                "{} blocked moving toward ({:.2}, {:.2})",
                actor,
                next.x,
                next.y
            );
            return false;
        }

        if let Some(body) = self.actor_mut(actor) {
            crate::debug_move!(
                "{} moved ({:.2}, {:.2}) -> ({:.2}, {:.2})",
                actor,
                body.position.x,
                body.position.y,
                next.x,
                next.y
            );
            body.position = next;
        }
        true
    }

    pub fn turn(&mut self, actor: ActorId, delta: f64) {
        match self.actor_mut(actor) {
            Some(body) => body.rotate(delta),
            None => warn!("Turn requested for unknown actor {}", actor),
        }
    }

    // --- Combat ---

    /// Fires along `shooter`'s orientation. Every enemy whose hitbox holds the
    /// impact point takes `SHOT_DAMAGE`; the dead are respawned and scored.
    pub fn shoot(&mut self, shooter: ActorId) -> Option<ShotOutcome> {
        let Some(body) = self.actor(shooter) else {
            warn!("Shot requested for unknown actor {}", shooter);
            return None;
        };
        let ray = geometry::ray_from(body.position, body.orientation(), SHOT_RANGE);
        let impact = self.cast_and_clip(shooter, ray).end;
        crate::debug_shot!(
            "{} fired, impact at ({:.2}, {:.2})",
            shooter,
            impact.x,
            impact.y
        );

        let mut outcome = ShotOutcome {
            impact,
            hits: Vec::new(),
            kills: Vec::new(),
        };
        for enemy in self.enemies(shooter) {
            let Some(victim) = self.actor_mut(enemy) else {
                continue;
            };
            if !geometry::point_on_polygon(impact, &victim.model()) {
                continue;
            }
            victim.health -= SHOT_DAMAGE;
            let dead = victim.is_dead();
            crate::debug_shot!(
                "{} hit {}, health remaining: {}",
                shooter,
                enemy,
                victim.health
            );
            outcome.hits.push(enemy);

            if dead {
                if shooter == ActorId::Player {
                    self.kills += 1;
                }
                if enemy == ActorId::Player {
                    self.deaths += 1;
                }
                self.respawn(enemy);
                if let Some(body) = self.actor(enemy) {
                    info!(
                        "{} killed {}, respawned at ({:.0}, {:.0})",
                        shooter, enemy, body.position.x, body.position.y
                    );
                }
                outcome.kills.push(enemy);
            }
        }
        Some(outcome)
    }

    /// Spawn point whose nearest enemy of `actor` is farthest away; the first
    /// such point wins ties.
    pub fn select_spawn(&self, actor: ActorId) -> Point {
        let enemy_positions: Vec<Point> = self
            .enemies(actor)
            .into_iter()
            .filter_map(|id| self.actor(id))
            .map(|enemy| enemy.position)
            .collect();

        let mut best = self.spawns[0];
        let mut best_clearance = f64::NEG_INFINITY;
        for &spawn in &self.spawns {
            let clearance = enemy_positions
                .iter()
                .map(|p| spawn.distance(p))
                .fold(f64::INFINITY, f64::min);
            if clearance > best_clearance {
                best_clearance = clearance;
                best = spawn;
            }
        }
        best
    }

    /// Restores full health and moves `actor` to the safest spawn point.
    pub fn respawn(&mut self, actor: ActorId) {
        let spawn = self.select_spawn(actor);
        if let Some(body) = self.actor_mut(actor) {
            body.position = spawn;
            body.health = INITIAL_HEALTH;
            crate::debug_spawn!("{} spawned at ({:.1}, {:.1})", actor, spawn.x, spawn.y);
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Move { actor, angle } => {
                self.move_actor(actor, angle);
            }
            Command::Turn { actor, delta } => self.turn(actor, delta),
            Command::Shoot { actor } => {
                self.shoot(actor);
            }
        }
    }
}
