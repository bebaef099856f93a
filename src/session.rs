//! Run driver
//!
//! Owns the run state machine around the simulation:
//! `Idle --start--> Running --hit--> Over --restart--> Idle`.
//! The host calls [`Session::frame`] once per display refresh and forwards
//! input through [`Session::request_flap`].

use crate::highscores::HighScore;
use crate::sim::{RunPhase, TickEvents, TickInput, World, start_run, tick};
use crate::tuning::Tuning;

/// Convert a seed handed over as a JS number
///
/// Fractions are truncated. NaN, infinities and negatives have no seed.
pub fn seed_from_f64(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 {
        Some(value as u64)
    } else {
        None
    }
}

/// One player's game: current world, best score and pending input
#[derive(Debug, Clone)]
pub struct Session {
    tuning: Tuning,
    world: World,
    high_score: HighScore,
    /// Flap requested since the last frame (one-shot)
    flap_pending: bool,
    /// Frames left before the first tick of a new run
    grace_remaining: u32,
}

impl Session {
    pub fn new(tuning: Tuning, high_score: HighScore) -> Self {
        Self {
            tuning,
            world: World::new(0, tuning),
            high_score,
            flap_pending: false,
            grace_remaining: 0,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.world.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn score(&self) -> u32 {
        self.world.score
    }

    pub fn final_score(&self) -> Option<u32> {
        self.world.final_score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best
    }

    /// Still waiting out the start delay
    pub fn in_grace(&self) -> bool {
        self.world.is_running() && self.grace_remaining > 0
    }

    /// Begin a new run. Returns false if one is already running.
    pub fn start(&mut self, seed: u64) -> bool {
        if self.world.is_running() {
            log::debug!("Ignoring start: run already in progress");
            return false;
        }
        self.world = start_run(seed, self.tuning);
        self.grace_remaining = self.tuning.grace_frames;
        self.flap_pending = false;
        true
    }

    /// Queue a flap for the next frame. Ignored outside active play.
    pub fn request_flap(&mut self) -> bool {
        if !self.world.is_running() || self.grace_remaining > 0 {
            return false;
        }
        self.flap_pending = true;
        true
    }

    /// Run one display frame
    pub fn frame(&mut self) -> TickEvents {
        if !self.world.is_running() {
            return TickEvents::default();
        }

        if self.grace_remaining > 0 {
            self.grace_remaining -= 1;
            return TickEvents::default();
        }

        let input = TickInput {
            flap: std::mem::take(&mut self.flap_pending),
        };
        let events = tick(&mut self.world, &input);

        if events.ended {
            if let Some(score) = self.world.final_score {
                if self.high_score.submit(score) {
                    self.high_score.save();
                }
            }
        }

        events
    }

    /// Leave the game-over screen. Returns false unless the run is over.
    pub fn restart(&mut self) -> bool {
        if !self.world.is_over() {
            log::debug!("Ignoring restart in phase {:?}", self.world.phase);
            return false;
        }
        self.world = World::new(self.world.seed(), self.tuning);
        self.flap_pending = false;
        self.grace_remaining = 0;
        true
    }
}
