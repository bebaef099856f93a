//! Fixed step simulation tick
//!
//! One tick per display refresh. There is no delta time: every constant in
//! [`Tuning`] is per frame, so the game runs slower on a slower display.

use serde::{Deserialize, Serialize};

use super::collision::{Hit, first_hit};
use super::spawn::{recycle, spawn_due, spawn_obstacle};
use super::state::{RunPhase, World};
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flap requested since the previous tick (click/tap/space)
    pub flap: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEvents {
    /// At least one obstacle was cleared
    pub scored: bool,
    /// Obstacles cleared this tick
    pub points: u32,
    /// The run ended this tick
    pub ended: bool,
    /// The hit that ended the run
    pub hit: Option<Hit>,
    /// ID of the obstacle spawned this tick
    pub spawned: Option<u32>,
    /// Obstacles recycled this tick
    pub recycled: usize,
}

/// Begin a run: Running world with a single obstacle at the spawn x
pub fn start_run(seed: u64, tuning: Tuning) -> World {
    let mut world = World::new(seed, tuning);
    world.phase = RunPhase::Running;
    spawn_obstacle(&mut world);
    log::info!("Run started (seed {})", seed);
    world
}

/// Advance the world by one frame in place
///
/// Does nothing unless the world is Running.
pub fn tick(world: &mut World, input: &TickInput) -> TickEvents {
    let mut events = TickEvents::default();

    if world.phase != RunPhase::Running {
        return events;
    }

    assert!(
        world.player.pos.y.is_finite() && world.player.velocity.is_finite(),
        "player state must be finite (y = {}, velocity = {})",
        world.player.pos.y,
        world.player.velocity
    );

    let tuning = world.tuning;
    world.frame += 1;

    // Flap overrides whatever velocity has built up
    if input.flap {
        world.player.velocity = tuning.flap_velocity;
    }

    // Semi-implicit Euler: velocity first, then position
    world.player.velocity += tuning.gravity;
    world.player.pos.y += world.player.velocity;

    for obstacle in &mut world.obstacles {
        obstacle.x -= tuning.scroll_speed;
    }

    // Scoring (one-shot per obstacle)
    let leading_edge = world.player.left();
    for obstacle in world.obstacles.iter_mut().filter(|o| !o.passed) {
        if obstacle.right() < leading_edge {
            obstacle.passed = true;
            world.score += 1;
            events.points += 1;
        }
    }
    events.scored = events.points > 0;

    if let Some(hit) = first_hit(&world.player, &world.obstacles, tuning.world_height) {
        end_run(world, hit);
        events.ended = true;
        events.hit = Some(hit);
    }

    if spawn_due(&world.obstacles, tuning.spawn_threshold) {
        events.spawned = Some(spawn_obstacle(world));
    }

    events.recycled = recycle(&mut world.obstacles);

    events
}

/// Pure form of [`tick`]: returns the next world and leaves `world` untouched
pub fn advance(world: &World, flap_requested: bool) -> (World, TickEvents) {
    let mut next = world.clone();
    let events = tick(&mut next, &TickInput { flap: flap_requested });
    (next, events)
}

fn end_run(world: &mut World, hit: Hit) {
    world.phase = RunPhase::Over;
    world.final_score = Some(world.score);
    log::info!(
        "Run over after {} frames: {:?}, final score {}",
        world.frame,
        hit,
        world.score
    );
}
