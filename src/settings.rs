//! Difficulty selection and tunables
//!
//! Everything here has a sensible default; a JSON file can override it.

use serde::{Deserialize, Serialize};

/// Round difficulty; selects the station layout and scales starting fuel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "e" => Some(Difficulty::Easy),
            "medium" | "med" | "m" => Some(Difficulty::Medium),
            "hard" | "h" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// 0 = easy .. 2 = hard; the fuel budget scales by `3 - index`
    pub fn index(&self) -> u32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

/// Gameplay tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Input poll timeout in milliseconds; also sets the nominal tick rate
    pub input_timeout_ms: u64,
    /// Docking-safe envelope: the mover's x velocity must be below this
    pub dock_tol_x: f32,
    /// and the magnitude of its y velocity below this
    pub dock_tol_y: f32,
    /// Starfield density threshold out of 256
    pub star_threshold: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            input_timeout_ms: 33,
            dock_tol_x: 0.01,
            dock_tol_y: 0.03,
            star_threshold: 4,
        }
    }
}

impl Settings {
    /// Nominal simulation ticks per second implied by the poll timeout
    pub fn tick_hz(&self) -> f32 {
        1000.0 / self.input_timeout_ms.max(1) as f32
    }

    /// Load from a JSON file; any failure falls back to defaults.
    pub fn load(path: Option<&str>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| serde_json::from_str(&json).map_err(|e| e.to_string()))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {path}");
                settings
            }
            Err(err) => {
                log::warn!("Failed to load settings from {path}: {err}; using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("MED"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("h"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_tick_hz_from_timeout() {
        let mut settings = Settings::default();
        settings.input_timeout_ms = 100;
        assert!((settings.tick_hz() - 10.0).abs() < f32::EPSILON);

        // Zero timeout must not divide by zero
        settings.input_timeout_ms = 0;
        assert!(settings.tick_hz().is_finite());
    }

    #[test]
    fn test_settings_roundtrip_json() {
        let settings = Settings {
            difficulty: Difficulty::Hard,
            input_timeout_ms: 16,
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.difficulty, Difficulty::Hard);
        assert_eq!(back.input_timeout_ms, 16);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let settings = Settings::load(Some("/nonexistent/deltav.json"));
        assert_eq!(settings.difficulty, Difficulty::Medium);
    }
}
