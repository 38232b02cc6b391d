//! Bombicka - collect bombicka, use bombicka
//!
//! A two-player (human vs AI) chase game. Both players race for a single
//! roaming resource; resources are spent as explosions that kill the other
//! player for a while.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, interactions, AI timing, game state)
//! - `config`: Data-driven game tuning
//! - `driver`: Fixed-timestep loop driver

pub mod config;
pub mod driver;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use driver::Driver;

/// Game loop constants
pub mod consts {
    /// Default simulation rate (ticks per second)
    pub const TICK_RATE: f64 = 70.0;
    /// Fixed simulation timestep at the default rate
    pub const SIM_DT: f64 = 1.0 / TICK_RATE;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will try to catch up on (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;
}
