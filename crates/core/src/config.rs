//! Game configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `CRUSH_WIDTH` | 8 | Board width (and height) |
//! | `CRUSH_COLORS` | `ROYGBP` | Palette letters |
//! | `CRUSH_TICK_MS` | 100 | Tick interval |
//! | `CRUSH_SEED` | clock | RNG seed |

use crate::error::ConfigError;
use crate::palette::Palette;
use crate::rng::SimpleRng;
use crate::types::{BOARD_WIDTH, TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub palette: Palette,
    pub tick_ms: u32,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH as usize,
            palette: Palette::classic(),
            tick_ms: TICK_MS,
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Defaults with a fixed seed
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (environment, tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let width = match get("CRUSH_WIDTH") {
            Some(v) => parse_var("CRUSH_WIDTH", &v)?,
            None => BOARD_WIDTH as usize,
        };
        let palette = match get("CRUSH_COLORS") {
            Some(v) => Palette::parse(&v)?,
            None => Palette::classic(),
        };
        let tick_ms = match get("CRUSH_TICK_MS") {
            Some(v) => parse_var("CRUSH_TICK_MS", &v)?,
            None => TICK_MS,
        };
        let seed = match get("CRUSH_SEED") {
            Some(v) => parse_var("CRUSH_SEED", &v)?,
            None => SimpleRng::seed_from_time(),
        };

        let config = Self {
            width,
            palette,
            tick_ms,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < crate::types::MIN_BOARD_WIDTH as usize
            || self.width > crate::types::MAX_BOARD_WIDTH as usize
        {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_config_from_lookup() {
        let config = GameConfig::from_lookup(lookup(&[
            ("CRUSH_WIDTH", "10"),
            ("CRUSH_COLORS", "rgb"),
            ("CRUSH_TICK_MS", "50"),
            ("CRUSH_SEED", "7"),
        ]))
        .unwrap();
        assert_eq!(config.width, 10);
        assert_eq!(config.palette.letters(), "RGB");
        assert_eq!(config.tick_ms, 50);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_config_defaults_when_unset_or_blank() {
        let config = GameConfig::from_lookup(lookup(&[("CRUSH_WIDTH", "  "), ("CRUSH_SEED", "3")])).unwrap();
        assert_eq!(config, GameConfig::with_seed(3));
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert_eq!(
            GameConfig::from_lookup(lookup(&[("CRUSH_WIDTH", "wide"), ("CRUSH_SEED", "1")])),
            Err(ConfigError::InvalidEnv {
                var: "CRUSH_WIDTH",
                value: "wide".to_string()
            })
        );
        assert_eq!(
            GameConfig::from_lookup(lookup(&[("CRUSH_WIDTH", "2"), ("CRUSH_SEED", "1")])),
            Err(ConfigError::InvalidWidth(2))
        );
        assert_eq!(
            GameConfig::from_lookup(lookup(&[("CRUSH_TICK_MS", "0"), ("CRUSH_SEED", "1")])),
            Err(ConfigError::ZeroTick)
        );
    }
}
