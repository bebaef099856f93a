//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no delta time
//! - Seeded RNG only, one stream per run
//! - Stable obstacle order (by spawn ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Hit, bounds_hit, first_hit, horizontal_overlap, obstacle_hit};
pub use spawn::{ObstacleGenerator, recycle, spawn_due, spawn_obstacle};
pub use state::{GapGeometry, Obstacle, Player, RunPhase, Snapshot, World};
pub use tick::{TickEvents, TickInput, advance, start_run, tick};
