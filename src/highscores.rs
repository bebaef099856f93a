//! Best score tracking
//!
//! Persisted to LocalStorage, one integer.

use serde::{Deserialize, Serialize};

/// Best final score across completed runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScore {
    pub best: u32,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_gate_best";

    pub fn new(best: u32) -> Self {
        Self { best }
    }

    /// Check if a final score would beat the record
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a completed run's final score
    /// Returns true if it set a new record
    pub fn submit(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        log::info!("New high score: {} (was {})", score, self.best);
        self.best = score;
        true
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<HighScore>(&json) {
                    Ok(high) => {
                        log::info!("Loaded high score {}", high.best);
                        return high;
                    }
                    Err(e) => log::warn!("Unreadable high score, starting fresh: {}", e),
                }
            }
        }

        log::info!("No high score found, starting fresh");
        Self::default()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High score saved ({})", self.best);
            }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_sets_record() {
        let mut high = HighScore::default();
        assert!(!high.submit(0));
        assert_eq!(high.best, 0);
    }

    #[test]
    fn test_keeps_maximum() {
        let mut high = HighScore::default();
        assert!(high.submit(4));
        assert!(!high.submit(2));
        assert!(!high.submit(4));
        assert!(high.submit(9));
        assert_eq!(high.best, 9);
    }

    #[test]
    fn test_json_shape() {
        let high = HighScore::new(12);
        let json = serde_json::to_string(&high).unwrap();
        assert_eq!(json, r#"{"best":12}"#);
        assert_eq!(serde_json::from_str::<HighScore>(&json).unwrap(), high);
    }
}
