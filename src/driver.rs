//! Fixed-timestep loop driver
//!
//! Accumulates real frame time and runs whole simulation ticks, the same way
//! a render loop would drive the game.

use crate::config::GameConfig;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::sim::{GameState, TickInput, tick};

/// Owns the game state and its configuration
#[derive(Debug, Clone)]
pub struct Driver {
    config: GameConfig,
    state: GameState,
    accumulator: f64,
    /// Input edges not yet consumed by a tick
    pending: TickInput,
}

impl Driver {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let state = GameState::new(seed, &config);
        log::info!(
            "New game (seed {seed}, {}x{} board, {} Hz)",
            config.board_width,
            config.board_height,
            config.tick_rate
        );
        Self {
            config,
            state,
            accumulator: 0.0,
            pending: TickInput::default(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Advance by a frame of `frame_dt` seconds; returns the ticks run
    ///
    /// Input edges are applied on the first tick. When the frame is too short
    /// to run a tick they are kept for the next frame.
    pub fn advance(&mut self, frame_dt: f64, input: TickInput) -> u32 {
        merge_input(&mut self.pending, input);

        let step = self.config.tick_interval();
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= step && substeps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.pending);
            tick(&mut self.state, &self.config, &input, step);
            self.accumulator -= step;
            substeps += 1;
        }

        // Drop backlog we could not catch up on
        if substeps == MAX_SUBSTEPS && self.accumulator >= step {
            log::warn!(
                "Simulation falling behind, dropping {:.3}s",
                self.accumulator
            );
            self.accumulator = 0.0;
        }

        substeps
    }

    /// Run exactly one tick at the nominal rate
    pub fn step(&mut self, input: TickInput) {
        merge_input(&mut self.pending, input);
        let input = std::mem::take(&mut self.pending);
        tick(&mut self.state, &self.config, &input, self.config.tick_interval());
    }
}

/// Fold newer input edges into not-yet-consumed ones
fn merge_input(pending: &mut TickInput, newer: TickInput) {
    if newer.is_empty() {
        return;
    }
    if newer.pointer_down.is_some() {
        // A fresh press supersedes an earlier release in the same frame
        pending.pointer_down = newer.pointer_down;
        pending.pointer_up = false;
    }
    if newer.pointer_move.is_some() {
        pending.pointer_move = newer.pointer_move;
    }
    if newer.pointer_up {
        pending.pointer_up = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PlayerId;
    use glam::DVec2;

    #[test]
    fn test_advance_runs_whole_ticks() {
        let mut driver = Driver::new(GameConfig::default(), 1);
        let step = driver.config().tick_interval();

        assert_eq!(driver.advance(step * 0.5, TickInput::default()), 0);
        assert_eq!(driver.advance(step * 0.6, TickInput::default()), 1);
        assert_eq!(driver.advance(step * 3.0, TickInput::default()), 3);
        assert_eq!(driver.state().time_ticks, 4);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let config = GameConfig {
            tick_rate: 120.0,
            ..GameConfig::default()
        };
        let mut driver = Driver::new(config, 1);
        // Clamped to MAX_FRAME_DT, still more ticks than one frame may run
        let ticks = driver.advance(10.0, TickInput::default());
        assert_eq!(ticks, MAX_SUBSTEPS);
        assert_eq!(driver.advance(0.0, TickInput::default()), 0);
    }

    #[test]
    fn test_input_survives_short_frames() {
        let mut driver = Driver::new(GameConfig::default(), 1);
        let step = driver.config().tick_interval();
        let target = DVec2::new(50.0, 60.0);

        let ran = driver.advance(
            step * 0.25,
            TickInput {
                pointer_down: Some(target),
                ..Default::default()
            },
        );
        assert_eq!(ran, 0);

        driver.advance(step, TickInput::default());
        assert_eq!(driver.state().player(PlayerId::Human).goal, target);
        assert!(driver.state().pointer.pressed);
    }

    #[test]
    fn test_press_and_release_in_one_frame() {
        let mut driver = Driver::new(GameConfig::default(), 1);
        driver.step(TickInput {
            pointer_down: Some(DVec2::new(10.0, 10.0)),
            pointer_up: true,
            ..Default::default()
        });
        assert!(!driver.state().pointer.pressed);
        assert_eq!(
            driver.state().player(PlayerId::Human).goal,
            DVec2::new(10.0, 10.0)
        );
    }
}
