//! Game tuning
//!
//! Immutable configuration handed to the driver at construction. Loaded from
//! JSON when a file is provided, otherwise the built-in defaults are used.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TICK_RATE;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Board ===
    /// Board width in device-independent units
    pub board_width: f64,
    /// Board height in device-independent units
    pub board_height: f64,
    /// Simulation ticks per second
    pub tick_rate: f64,

    // === Movement ===
    /// Per-axis snap threshold, also the normal player speed per tick
    pub speed_const: f64,

    // === Death ===
    /// Seconds a killed player stays dead
    pub death_duration: f64,

    // === Explosions ===
    /// Seconds the pointer must be held before the human explosion triggers
    pub charge_time: f64,
    /// Seconds after triggering before an explosion becomes lethal
    pub explosion_arm_delay: f64,
    /// Seconds from trigger until the explosion despawns
    pub explosion_duration: f64,

    // === AI ===
    /// Half-width of the square the AI aims into around the human player
    pub ai_accuracy: f64,
    /// Seconds between AI attacks, also the delay before an attack lands
    pub ai_frequency: f64,

    // === Entity extents ===
    pub player_size: f64,
    pub resource_size: f64,
    pub explosion_size: f64,
    pub fire_size: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 800.0,
            board_height: 600.0,
            tick_rate: TICK_RATE,

            speed_const: 2.0,

            death_duration: 4.0,

            charge_time: 0.5,
            explosion_arm_delay: 0.0,
            explosion_duration: 1.0,

            ai_accuracy: 150.0,
            ai_frequency: 3.0,

            player_size: 50.0,
            resource_size: 30.0,
            explosion_size: 140.0,
            fire_size: 60.0,
        }
    }
}

impl GameConfig {
    /// Length of one simulation tick in seconds
    #[inline]
    pub fn tick_interval(&self) -> f64 {
        1.0 / self.tick_rate
    }

    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("board_width", self.board_width),
            ("board_height", self.board_height),
            ("tick_rate", self.tick_rate),
            ("speed_const", self.speed_const),
            ("death_duration", self.death_duration),
            ("explosion_duration", self.explosion_duration),
            ("ai_frequency", self.ai_frequency),
            ("player_size", self.player_size),
            ("resource_size", self.resource_size),
            ("explosion_size", self.explosion_size),
            ("fire_size", self.fire_size),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                });
            }
        }

        let non_negative = [
            ("charge_time", self.charge_time),
            ("explosion_arm_delay", self.explosion_arm_delay),
            ("ai_accuracy", self.ai_accuracy),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }

        if self.explosion_arm_delay >= self.explosion_duration {
            return Err(ConfigError::Invalid {
                field: "explosion_arm_delay",
                reason: "must be shorter than explosion_duration",
            });
        }

        Ok(())
    }
}
