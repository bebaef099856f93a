//! Demo-mode flap policy
//!
//! Keeps the player's bottom edge above a line just inside the next gap,
//! flapping only once the previous flap has run out of lift.

use crate::sim::World;

/// Deterministic flap policy for attract mode and headless runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// Distance above the gap's lower edge the player tries to stay over
    pub clearance: f32,
    /// Target line as a fraction of world height when no obstacle is ahead
    pub idle_line: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            clearance: 24.0,
            idle_line: 0.6,
        }
    }
}

impl Autopilot {
    /// The y the player's bottom edge should stay above
    pub fn target_line(&self, world: &World) -> f32 {
        match world.next_obstacle() {
            Some(obstacle) => obstacle.hitbox.bottom - self.clearance,
            None => world.tuning().world_height * self.idle_line,
        }
    }

    /// Whether to flap this frame
    pub fn decide(&self, world: &World) -> bool {
        if !world.is_running() {
            return false;
        }
        let player = &world.player;
        player.velocity >= 0.0 && player.bottom() > self.target_line(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ObstacleGenerator, TickInput, start_run, tick};
    use crate::tuning::Tuning;

    fn world_with_gap(unit: f32) -> World {
        let mut world = start_run(1, Tuning::default());
        world.obstacles.clear();
        let obstacle = ObstacleGenerator::new(world.tuning()).build(10, unit);
        world.obstacles.push(obstacle);
        world
    }

    #[test]
    fn test_targets_next_gap() {
        // Gap 120..300
        let world = world_with_gap(0.5);
        assert_eq!(Autopilot::default().target_line(&world), 276.0);
    }

    #[test]
    fn test_targets_world_line_without_obstacles() {
        let mut world = start_run(1, Tuning::default());
        world.obstacles.clear();
        assert_eq!(Autopilot::default().target_line(&world), 300.0);
    }

    #[test]
    fn test_flaps_only_when_low_and_falling() {
        let pilot = Autopilot::default();
        let mut world = world_with_gap(0.5);

        world.player.pos.y = 250.0;
        world.player.velocity = 1.0;
        assert!(pilot.decide(&world));

        world.player.velocity = -3.0;
        assert!(!pilot.decide(&world));

        world.player.pos.y = 200.0;
        world.player.velocity = 1.0;
        assert!(!pilot.decide(&world));
    }

    #[test]
    fn test_never_flaps_when_not_running() {
        let mut world = world_with_gap(0.5);
        world.player.pos.y = 400.0;
        world.player.velocity = 2.0;
        world.phase = crate::sim::RunPhase::Over;
        assert!(!Autopilot::default().decide(&world));
    }

    #[test]
    fn test_survives_and_scores() {
        let pilot = Autopilot::default();
        for seed in [1u64, 42, 2024] {
            let mut world = start_run(seed, Tuning::default());
            for _ in 0..3000 {
                let input = TickInput {
                    flap: pilot.decide(&world),
                };
                tick(&mut world, &input);
            }
            assert!(world.is_running(), "seed {} crashed: {:?}", seed, world.final_score);
            assert!(world.score >= 10, "seed {} scored {}", seed, world.score);
        }
    }
}
