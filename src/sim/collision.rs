//! Collision detection for the player box
//!
//! An obstacle is two axis-aligned gates sharing one column. The player dies
//! when its box overlaps that column and pokes outside the gap, or when it
//! leaves the world vertically.

use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Player};

/// What the player struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hit {
    /// Top gate of the obstacle with this ID
    UpperGate(u32),
    /// Bottom gate of the obstacle with this ID
    LowerGate(u32),
    /// Flew above y = 0
    Ceiling,
    /// Fell below the world height
    Floor,
}

/// Player and obstacle columns overlap horizontally
#[inline]
pub fn horizontal_overlap(player: &Player, obstacle: &Obstacle) -> bool {
    player.left() < obstacle.right() && player.right() > obstacle.x
}

/// Check the player against one obstacle's hitbox gap
///
/// The upper gate is reported when both edges poke out, matching the order
/// the edges are tested in.
pub fn obstacle_hit(player: &Player, obstacle: &Obstacle) -> Option<Hit> {
    if !horizontal_overlap(player, obstacle) {
        return None;
    }

    if player.top() < obstacle.hitbox.top {
        Some(Hit::UpperGate(obstacle.id))
    } else if player.bottom() > obstacle.hitbox.bottom {
        Some(Hit::LowerGate(obstacle.id))
    } else {
        None
    }
}

/// Check the player against the ceiling and floor
pub fn bounds_hit(player: &Player, world_height: f32) -> Option<Hit> {
    if player.top() < 0.0 {
        Some(Hit::Ceiling)
    } else if player.bottom() > world_height {
        Some(Hit::Floor)
    } else {
        None
    }
}

/// First hit in test order: every obstacle head to tail, then the bounds
///
/// Stops at the first hit. Later hits in the same frame could not change the
/// outcome, since only the first one ends the run.
pub fn first_hit(player: &Player, obstacles: &[Obstacle], world_height: f32) -> Option<Hit> {
    obstacles
        .iter()
        .find_map(|o| obstacle_hit(player, o))
        .or_else(|| bounds_hit(player, world_height))
}
