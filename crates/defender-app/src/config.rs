//! Runner configuration read from the environment.

use std::env;
use std::path::PathBuf;

use defender_core::tuning::Tuning;

// Runtime constants (not gameplay tuning).

pub const DEFAULT_SEED: u64 = 42;
/// One minute at 60 Hz.
pub const DEFAULT_MAX_FRAMES: u64 = 3600;
pub const DEFAULT_HIGHSCORE_PATH: &str = "highscores.json";
pub const DEFAULT_PLAYER_NAME: &str = "AUTO";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub seed: u64,
    /// `None` runs until the game ends.
    pub max_frames: Option<u64>,
    pub highscore_path: PathBuf,
    pub player_name: String,
    /// Use the near-zero lander missile cooldown.
    pub fast_missiles: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_frames: Some(DEFAULT_MAX_FRAMES),
            highscore_path: PathBuf::from(DEFAULT_HIGHSCORE_PATH),
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            fast_missiles: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable lookup. Unset or unparsable values
    /// fall back to the defaults. `DEFENDER_MAX_FRAMES=0` removes the limit.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("DEFENDER_SEED")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(defaults.seed);

        let max_frames = match lookup("DEFENDER_MAX_FRAMES")
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            Some(0) => None,
            Some(n) => Some(n),
            None => defaults.max_frames,
        };

        let highscore_path = lookup("DEFENDER_HIGHSCORE_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.highscore_path);

        let player_name = lookup("DEFENDER_PLAYER_NAME")
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.player_name);

        let fast_missiles = lookup("DEFENDER_FAST_MISSILES")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(defaults.fast_missiles);

        Self {
            seed,
            max_frames,
            highscore_path,
            player_name,
            fast_missiles,
        }
    }

    pub fn tuning(&self) -> Tuning {
        if self.fast_missiles {
            Tuning::simulation()
        } else {
            Tuning::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.tuning(), Tuning::default());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DEFENDER_SEED", "777"),
            ("DEFENDER_MAX_FRAMES", "120"),
            ("DEFENDER_HIGHSCORE_PATH", "/tmp/scores.json"),
            ("DEFENDER_PLAYER_NAME", "ZED"),
            ("DEFENDER_FAST_MISSILES", "true"),
        ]));
        assert_eq!(config.seed, 777);
        assert_eq!(config.max_frames, Some(120));
        assert_eq!(config.highscore_path, PathBuf::from("/tmp/scores.json"));
        assert_eq!(config.player_name, "ZED");
        assert!(config.fast_missiles);
        assert_eq!(config.tuning(), Tuning::simulation());
    }

    #[test]
    fn test_zero_frames_means_unlimited() {
        let config = AppConfig::from_lookup(lookup_from(&[("DEFENDER_MAX_FRAMES", "0")]));
        assert_eq!(config.max_frames, None);
    }

    #[test]
    fn test_garbage_falls_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DEFENDER_SEED", "not-a-number"),
            ("DEFENDER_MAX_FRAMES", "-5"),
            ("DEFENDER_FAST_MISSILES", "maybe"),
        ]));
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.max_frames, Some(DEFAULT_MAX_FRAMES));
        assert!(!config.fast_missiles);
    }
}
