//! Bombicka entry point
//!
//! Runs a headless session with a scripted stand-in for the human player and
//! reports the final score. Environment:
//! - `BOMBICKA_CONFIG`: path to a JSON tuning file
//! - `BOMBICKA_SEED`: RNG seed (defaults to the current time)
//! - `BOMBICKA_SECONDS`: simulated session length (default 60)

use bombicka::GameConfig;
use bombicka::driver::Driver;
use bombicka::sim::{GameEvent, GameState, PlayerId, TickInput};

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bombicka {} starting...", env!("CARGO_PKG_VERSION"));

    let config = match std::env::var("BOMBICKA_CONFIG") {
        Ok(path) => GameConfig::load(&path).unwrap_or_else(|e| {
            log::warn!("{e}; using default config");
            GameConfig::default()
        }),
        Err(_) => {
            log::info!("Using default config");
            GameConfig::default()
        }
    };

    let seed = env_parse("BOMBICKA_SEED").unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    });
    let seconds: f64 = env_parse("BOMBICKA_SECONDS").unwrap_or(60.0);

    let mut driver = Driver::new(config, seed);
    let ticks = (seconds * driver.config().tick_rate).ceil() as u64;
    let mut bot = ScriptedHuman::default();

    for _ in 0..ticks {
        let input = bot.next_input(driver.state());
        driver.step(input);
    }

    let scoreboard = driver.state().scoreboard();
    match serde_json::to_string_pretty(&scoreboard) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode scoreboard: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let value = std::env::var(key).ok()?;
    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring unparsable {key}={value}");
            None
        }
    }
}

/// Crude pointer script: chase the resource, aim at the AI when armed
#[derive(Debug, Default)]
struct ScriptedHuman {
    holding: bool,
}

impl ScriptedHuman {
    fn next_input(&mut self, state: &GameState) -> TickInput {
        let detonated = state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::ExplosionShown { owner: PlayerId::Human, .. }));
        if detonated {
            self.holding = false;
            return TickInput {
                pointer_up: true,
                ..Default::default()
            };
        }

        let human = state.player(PlayerId::Human);
        let target = if human.resource_count > 0 {
            state.player(PlayerId::Ai).pos
        } else {
            state.resource.pos
        };

        if self.holding {
            TickInput {
                pointer_move: Some(target),
                ..Default::default()
            }
        } else if !human.is_dead {
            self.holding = true;
            TickInput {
                pointer_down: Some(target),
                ..Default::default()
            }
        } else {
            TickInput::default()
        }
    }
}
