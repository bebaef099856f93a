//! Flappy Gate - A browser Flappy Bird clone
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, obstacle stream)
//! - `session`: Run driver (Idle/Running/Over, grace delay, high score)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Persisted best score
//! - `autopilot`: Deterministic flap policy for demo/headless runs
//! - `web`: wasm-bindgen handle for the JS host (wasm32 only)

pub mod autopilot;
pub mod highscores;
pub mod session;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use autopilot::Autopilot;
pub use highscores::HighScore;
pub use session::Session;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal display refresh the step constants are tuned for
    pub const FRAME_HZ: u32 = 60;
    /// Grace period between pressing start and the first real step
    pub const GRACE_MS: u32 = 300;
    /// Grace period in frames at the nominal refresh rate
    pub const GRACE_FRAMES: u32 = GRACE_MS * FRAME_HZ / 1000;
}
