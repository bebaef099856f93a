//! Browser bindings
//!
//! The JS host draws sprites, wires input and shows the overlays; this
//! handle is everything it needs from the simulation.

use wasm_bindgen::prelude::*;

use crate::highscores::HighScore;
use crate::session::{Session, seed_from_f64};
use crate::sim::RunPhase;
use crate::tuning::Tuning;

/// `frame()` flag: an obstacle was cleared
pub const FRAME_SCORED: u8 = 1;
/// `frame()` flag: the run ended
pub const FRAME_ENDED: u8 = 2;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Flappy Gate core loaded");
}

/// Game handle owned by the JS host
#[wasm_bindgen]
pub struct FlappyGame {
    session: Session,
}

#[wasm_bindgen]
impl FlappyGame {
    /// Build from optional tuning JSON; falls back to stored tuning
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> Result<FlappyGame, JsValue> {
        let tuning = match tuning_json {
            Some(json) => {
                Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => Tuning::load(),
        };
        Ok(Self {
            session: Session::new(tuning, HighScore::load()),
        })
    }

    /// Start a run; seeds from the clock when no seed is given
    ///
    /// Returns false for a negative or non-finite seed.
    pub fn start(&mut self, seed: Option<f64>) -> bool {
        let raw = seed.unwrap_or_else(js_sys::Date::now);
        match seed_from_f64(raw) {
            Some(seed) => self.session.start(seed),
            None => {
                log::warn!("Ignoring start with unusable seed {}", raw);
                false
            }
        }
    }

    pub fn flap(&mut self) -> bool {
        self.session.request_flap()
    }

    /// Run one frame, returning `FRAME_SCORED | FRAME_ENDED` bits
    pub fn frame(&mut self) -> u8 {
        let events = self.session.frame();
        let mut flags = 0;
        if events.scored {
            flags |= FRAME_SCORED;
        }
        if events.ended {
            flags |= FRAME_ENDED;
        }
        flags
    }

    pub fn restart(&mut self) -> bool {
        self.session.restart()
    }

    pub fn phase(&self) -> String {
        match self.session.phase() {
            RunPhase::Idle => "idle",
            RunPhase::Running => "running",
            RunPhase::Over => "over",
        }
        .to_string()
    }

    pub fn in_grace(&self) -> bool {
        self.session.in_grace()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    #[wasm_bindgen(js_name = finalScore)]
    pub fn final_score(&self) -> Option<u32> {
        self.session.final_score()
    }

    #[wasm_bindgen(js_name = highScore)]
    pub fn high_score(&self) -> u32 {
        self.session.high_score()
    }

    /// Player, obstacles and score as JSON for the renderer
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.session.world().snapshot()).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = tuningJson)]
    pub fn tuning_json(&self) -> String {
        self.session.tuning().to_json()
    }
}
