//! World state and core simulation types
//!
//! Everything a step reads or writes lives in [`World`]; nothing is shared
//! between successive steps except the value itself.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Waiting for the player to press start
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended by a collision
    Over,
}

/// The player sprite. Only `pos.y` and `velocity` change during a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive = down)
    pub velocity: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.player_start_y),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            velocity: tuning.player_start_velocity,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Vertical opening of an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapGeometry {
    /// Bottom edge of the top gate (the top gate spans 0..top)
    pub top: f32,
    /// Top edge of the bottom gate (the bottom gate spans bottom..floor)
    pub bottom: f32,
    /// Opening the edges were built from; `bottom - top` can be off by an ulp
    size: f32,
}

impl GapGeometry {
    pub fn new(top: f32, gap_size: f32) -> Self {
        Self {
            top,
            bottom: top + gap_size,
            size: gap_size,
        }
    }

    /// The same gap widened by `margin` on both sides
    pub fn widened(&self, margin: f32) -> Self {
        Self {
            top: self.top - margin,
            bottom: self.bottom + margin,
            size: self.size + 2.0 * margin,
        }
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn center(&self) -> f32 {
        (self.top + self.bottom) * 0.5
    }
}

/// A gated pipe pair scrolling right to left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Spawn-ordered, never reused within a run
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Gap as drawn
    pub visual: GapGeometry,
    /// Gap used for collision; equals `visual` with zero margin
    pub hitbox: GapGeometry,
    /// Set once, the frame the trailing edge clears the player
    pub passed: bool,
}

impl Obstacle {
    /// Trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct World {
    /// Constants this world was built with
    pub(super) tuning: Tuning,
    /// Run seed for reproducibility
    seed: u64,
    /// Gap stream for the whole run, seeded once
    pub(super) rng: Pcg32,
    pub phase: RunPhase,
    pub player: Player,
    /// Ordered by spawn; head is leftmost
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Frozen score, set on the transition to Over
    pub final_score: Option<u32>,
    /// Steps taken while running
    pub frame: u64,
    /// Next obstacle ID
    next_id: u32,
}

impl World {
    /// Fresh world in the Idle phase: player at its start position, no obstacles
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RunPhase::Idle,
            player: Player::new(&tuning),
            obstacles: Vec::new(),
            score: 0,
            final_score: None,
            frame: 0,
            next_id: 1,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == RunPhase::Over
    }

    /// Most recently spawned obstacle
    pub fn tail(&self) -> Option<&Obstacle> {
        self.obstacles.last()
    }

    /// Leftmost obstacle the player has not yet cleared
    pub fn next_obstacle(&self) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| !o.passed)
    }

    /// Read-only view for drawing and display
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            final_score: self.final_score,
            frame: self.frame,
            world_size: Vec2::new(self.tuning.world_width, self.tuning.world_height),
            player: self.player,
            obstacles: self.obstacles.clone(),
        }
    }
}

/// Serializable copy of everything a renderer or HUD needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: RunPhase,
    pub score: u32,
    pub final_score: Option<u32>,
    pub frame: u64,
    pub world_size: Vec2,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_is_idle_and_empty() {
        let world = World::new(7, Tuning::default());
        assert_eq!(world.phase, RunPhase::Idle);
        assert!(world.obstacles.is_empty());
        assert_eq!(world.score, 0);
        assert_eq!(world.final_score, None);
        assert_eq!(world.player.pos, Vec2::new(100.0, 200.0));
        assert_eq!(world.player.velocity, -2.0);
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut world = World::new(7, Tuning::default());
        assert_eq!(world.next_obstacle_id(), 1);
        assert_eq!(world.next_obstacle_id(), 2);
    }

    #[test]
    fn test_gap_widening() {
        let visual = GapGeometry::new(100.0, 180.0);
        assert_eq!(visual.bottom, 280.0);
        assert_eq!(visual.size(), 180.0);
        assert_eq!(visual.center(), 190.0);

        let hitbox = visual.widened(5.0);
        assert_eq!(hitbox.top, 95.0);
        assert_eq!(hitbox.bottom, 285.0);
        assert_eq!(hitbox.size(), 190.0);
        assert_eq!(visual.widened(0.0), visual);
    }

    #[test]
    fn test_gap_size_is_exact_for_awkward_tops() {
        // Tops where `(top + 180.0) - top` rounds away from 180 in f32
        for top in [219.999_98_f32, 76.1678, 77.4185, 78.2144] {
            let gap = GapGeometry::new(top, 180.0);
            assert_eq!(gap.size(), 180.0);
            assert_eq!(gap.bottom, top + 180.0);
        }
    }

    #[test]
    fn test_seed_and_tuning_are_readable() {
        let tuning = Tuning {
            gravity: 0.5,
            ..Default::default()
        };
        let world = World::new(31, tuning);
        assert_eq!(world.seed(), 31);
        assert_eq!(world.tuning().gravity, 0.5);
    }

    #[test]
    fn test_snapshot_serializes() {
        let world = World::new(7, Tuning::default());
        let json = serde_json::to_string(&world.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Idle\""));
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, world.snapshot());
    }
}
