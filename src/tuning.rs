//! Game balance constants
//!
//! Every number the simulation uses lives here so a host can swap in a
//! different feel without recompiling. Persisted separately from the high
//! score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::GRACE_FRAMES;

/// Rejected tuning
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0} must be finite")]
    NonFinite(&'static str),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),

    /// The tallest possible top gate plus the gap runs past the floor
    #[error("gap of {gap} below a top gate of up to {max_top} exceeds world height {world_height}")]
    GapDoesNotFit {
        max_top: f32,
        gap: f32,
        world_height: f32,
    },

    /// New obstacles would appear left of the point that triggers them
    #[error("spawn threshold {threshold} must be left of spawn x {spawn_x}")]
    SpawnOrder { threshold: f32, spawn_x: f32 },

    #[error("flap velocity {0} must point upward (negative)")]
    FlapNotUpward(f32),

    /// The player's starting box pokes outside the world
    #[error(
        "player box at ({x}, {y}) sized {width}x{height} does not fit the {world_width}x{world_height} world"
    )]
    PlayerOutsideWorld {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        world_width: f32,
        world_height: f32,
    },
}

/// Tunable game constants (world units per frame where applicable)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Player ===
    /// Fixed horizontal position of the player's leading (left) edge
    pub player_x: f32,
    pub player_start_y: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Velocity at run start (small opening hop)
    pub player_start_velocity: f32,

    // === Physics ===
    /// Added to vertical velocity every frame (positive = down)
    pub gravity: f32,
    /// Velocity a flap sets (negative = up)
    pub flap_velocity: f32,
    /// Leftward obstacle movement per frame
    pub scroll_speed: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    /// Vertical opening between top and bottom gates
    pub gap_size: f32,
    /// Smallest top gate height
    pub top_height_min: f32,
    /// Top gate height is drawn from [min, min + range)
    pub top_height_range: f32,
    /// Where new obstacles appear
    pub spawn_x: f32,
    /// A new obstacle spawns once the tail obstacle drops below this x
    pub spawn_threshold: f32,
    /// How much the collision gap extends past the drawn gap on each side
    pub hitbox_margin: f32,

    // === Driver ===
    /// Frames between start and the first step
    pub grace_frames: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 600.0,
            world_height: 500.0,

            player_x: 100.0,
            player_start_y: 200.0,
            player_width: 40.0,
            player_height: 40.0,
            player_start_velocity: -2.0,

            gravity: 0.25,
            flap_velocity: -6.0,
            scroll_speed: 1.5,

            obstacle_width: 60.0,
            gap_size: 180.0,
            top_height_min: 20.0,
            top_height_range: 200.0,
            spawn_x: 600.0,
            spawn_threshold: 300.0,
            hitbox_margin: 0.0,

            grace_frames: GRACE_FRAMES,
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_gate_tuning";

    /// Parse from JSON; omitted fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> String {
        // Plain floats and integers always serialize
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Check that the constants describe a playable world
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("player_x", self.player_x),
            ("player_start_y", self.player_start_y),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_start_velocity", self.player_start_velocity),
            ("gravity", self.gravity),
            ("flap_velocity", self.flap_velocity),
            ("scroll_speed", self.scroll_speed),
            ("obstacle_width", self.obstacle_width),
            ("gap_size", self.gap_size),
            ("top_height_min", self.top_height_min),
            ("top_height_range", self.top_height_range),
            ("spawn_x", self.spawn_x),
            ("spawn_threshold", self.spawn_threshold),
            ("hitbox_margin", self.hitbox_margin),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TuningError::NonFinite(*name));
        }

        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("scroll_speed", self.scroll_speed),
            ("obstacle_width", self.obstacle_width),
            ("gap_size", self.gap_size),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(TuningError::NotPositive(*name));
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("top_height_min", self.top_height_min),
            ("top_height_range", self.top_height_range),
            ("hitbox_margin", self.hitbox_margin),
        ];
        if let Some((name, _)) = non_negative.iter().find(|(_, v)| *v < 0.0) {
            return Err(TuningError::Negative(*name));
        }

        if self.flap_velocity >= 0.0 {
            return Err(TuningError::FlapNotUpward(self.flap_velocity));
        }

        let fits_across =
            self.player_x >= 0.0 && self.player_x + self.player_width <= self.world_width;
        let fits_down = self.player_start_y >= 0.0
            && self.player_start_y + self.player_height <= self.world_height;
        if !(fits_across && fits_down) {
            return Err(TuningError::PlayerOutsideWorld {
                x: self.player_x,
                y: self.player_start_y,
                width: self.player_width,
                height: self.player_height,
                world_width: self.world_width,
                world_height: self.world_height,
            });
        }

        let max_top = self.top_height_min + self.top_height_range;
        if max_top + self.gap_size > self.world_height {
            return Err(TuningError::GapDoesNotFit {
                max_top,
                gap: self.gap_size,
                world_height: self.world_height,
            });
        }

        if self.spawn_threshold >= self.spawn_x {
            return Err(TuningError::SpawnOrder {
                threshold: self.spawn_threshold,
                spawn_x: self.spawn_x,
            });
        }

        Ok(())
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Save tuning to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.to_json());
            log::info!("Tuning saved");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
