//! Obstacle stream: generation, spawning and recycling
//!
//! Gap heights come from whatever RNG the caller passes in. A run threads
//! its own seeded stream through every spawn so identical seeds give
//! identical courses.

use rand::Rng;

use super::state::{GapGeometry, Obstacle, World};
use crate::tuning::Tuning;

/// Builds obstacles from one uniform draw each
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleGenerator {
    pub spawn_x: f32,
    pub width: f32,
    pub gap_size: f32,
    pub top_height_min: f32,
    pub top_height_range: f32,
    pub hitbox_margin: f32,
}

impl ObstacleGenerator {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            spawn_x: tuning.spawn_x,
            width: tuning.obstacle_width,
            gap_size: tuning.gap_size,
            top_height_min: tuning.top_height_min,
            top_height_range: tuning.top_height_range,
            hitbox_margin: tuning.hitbox_margin,
        }
    }

    /// Map a draw in [0, 1) onto the top gate height
    pub fn top_height(&self, unit: f32) -> f32 {
        self.top_height_min + unit.clamp(0.0, 1.0) * self.top_height_range
    }

    /// Obstacle at the spawn x for a given draw
    pub fn build(&self, id: u32, unit: f32) -> Obstacle {
        let visual = GapGeometry::new(self.top_height(unit), self.gap_size);
        Obstacle {
            id,
            x: self.spawn_x,
            width: self.width,
            visual,
            hitbox: visual.widened(self.hitbox_margin),
            passed: false,
        }
    }

    /// Draw one value from `rng` and build an obstacle from it
    pub fn generate<R: Rng + ?Sized>(&self, id: u32, rng: &mut R) -> Obstacle {
        let unit: f32 = rng.random();
        self.build(id, unit)
    }
}

/// A new obstacle is due once the tail has scrolled below the threshold.
/// An empty course is always due.
pub fn spawn_due(obstacles: &[Obstacle], threshold: f32) -> bool {
    obstacles.last().is_none_or(|tail| tail.x < threshold)
}

/// Append one generated obstacle at the spawn x, returning its ID
pub fn spawn_obstacle(world: &mut World) -> u32 {
    let generator = ObstacleGenerator::new(&world.tuning);
    let id = world.next_obstacle_id();
    let obstacle = generator.generate(id, &mut world.rng);
    log::debug!(
        "Spawned obstacle {} (gap {:.1}..{:.1})",
        id,
        obstacle.visual.top,
        obstacle.visual.bottom
    );
    world.obstacles.push(obstacle);
    id
}

/// Drop obstacles whose trailing edge has left the screen, returning how many
pub fn recycle(obstacles: &mut Vec<Obstacle>) -> usize {
    let before = obstacles.len();
    obstacles.retain(|o| o.right() >= 0.0);
    let removed = before - obstacles.len();
    if removed > 0 {
        log::debug!("Recycled {} obstacle(s)", removed);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_build_uses_fixed_gap() {
        let generator = ObstacleGenerator::new(&Tuning::default());
        let low = generator.build(1, 0.0);
        assert_eq!(low.visual.top, 20.0);
        assert_eq!(low.visual.bottom, 200.0);
        assert_eq!(low.x, 600.0);
        assert_eq!(low.width, 60.0);
        assert!(!low.passed);

        let mid = generator.build(2, 0.5);
        assert_eq!(mid.visual.top, 120.0);
        assert_eq!(mid.visual.size(), 180.0);
    }

    #[test]
    fn test_zero_margin_hitbox_matches_visual() {
        let generator = ObstacleGenerator::new(&Tuning::default());
        let obstacle = generator.build(1, 0.25);
        assert_eq!(obstacle.hitbox, obstacle.visual);
    }

    #[test]
    fn test_margin_widens_hitbox_only() {
        let tuning = Tuning {
            hitbox_margin: 8.0,
            ..Default::default()
        };
        let obstacle = ObstacleGenerator::new(&tuning).build(1, 0.5);
        assert_eq!(obstacle.visual.top, 120.0);
        assert_eq!(obstacle.hitbox.top, 112.0);
        assert_eq!(obstacle.hitbox.bottom, 308.0);
    }

    #[test]
    fn test_generated_tops_stay_in_range() {
        let generator = ObstacleGenerator::new(&Tuning::default());
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..500 {
            let obstacle = generator.generate(id, &mut rng);
            assert!(obstacle.visual.top >= 20.0);
            assert!(obstacle.visual.top <= 220.0);
            assert_eq!(obstacle.visual.size(), 180.0);
        }
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let generator = ObstacleGenerator::new(&Tuning::default());
        let mut a = Pcg32::seed_from_u64(1234);
        let mut b = Pcg32::seed_from_u64(1234);
        for id in 0..50 {
            let ga = generator.generate(id, &mut a);
            let gb = generator.generate(id, &mut b);
            assert_eq!(ga.visual.top.to_bits(), gb.visual.top.to_bits());
        }
    }

    #[test]
    fn test_spawn_due() {
        let generator = ObstacleGenerator::new(&Tuning::default());
        assert!(spawn_due(&[], 300.0));

        let mut tail = generator.build(1, 0.5);
        tail.x = 310.0;
        assert!(!spawn_due(&[tail], 300.0));
        tail.x = 300.0;
        assert!(!spawn_due(&[tail], 300.0));
        tail.x = 295.0;
        assert!(spawn_due(&[tail], 300.0));
    }

    #[test]
    fn test_spawn_obstacle_appends_at_tail() {
        let mut world = World::new(9, Tuning::default());
        let first = spawn_obstacle(&mut world);
        let second = spawn_obstacle(&mut world);
        assert_eq!(world.obstacles.len(), 2);
        assert!(second > first);
        assert_eq!(world.tail().map(|o| o.id), Some(second));
        assert_eq!(world.tail().map(|o| o.x), Some(600.0));
    }

    #[test]
    fn test_recycle_removes_only_offscreen() {
        let generator = ObstacleGenerator::new(&Tuning::default());
        let mut gone = generator.build(1, 0.5);
        gone.x = -60.5;
        let mut edge = generator.build(2, 0.5);
        edge.x = -60.0;
        let visible = generator.build(3, 0.5);

        let mut obstacles = vec![gone, edge, visible];
        assert_eq!(recycle(&mut obstacles), 1);
        let ids: Vec<u32> = obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
