//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulation clock only, never wall-clock time
//! - Seeded RNG only
//! - Fixed rule order within a tick
//! - No rendering or platform dependencies

pub mod ai;
pub mod geometry;
pub mod movement;
pub mod schedule;
pub mod state;
pub mod tick;

pub use geometry::{Board, Rect};
pub use movement::move_player;
pub use schedule::{Schedule, ScheduledEvent};
pub use state::{
    AiBrain, Explosion, Fire, GameEvent, GameState, Player, PlayerId, PlayerScore, Pointer,
    Resource, Scoreboard, Status,
};
pub use tick::{TickInput, resolve_interactions, tick};
