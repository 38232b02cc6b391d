//! AI attack timing
//!
//! The AI chases the resource (handled in the tick) and spends its resources
//! on delayed explosions aimed roughly at the human player.

use super::schedule::ScheduledEvent;
use super::state::{GameEvent, GameState, PlayerId};
use crate::config::GameConfig;

/// Queue an attack when the AI has ammo and its cooldown has passed
///
/// Returns true when an attack was queued.
pub fn schedule_attack(state: &mut GameState) -> bool {
    let now = state.time;
    let cooldown = state.ai.attack_cooldown;
    if now - state.ai.last_attack_time <= cooldown {
        return false;
    }
    if !state.player_mut(PlayerId::Ai).spend_resource() {
        return false;
    }

    state.ai.last_attack_time = now;
    let due = state
        .schedule
        .schedule_once(ScheduledEvent::AiAttack, now, cooldown);
    state.events.push(GameEvent::AiAttackQueued { due });
    log::debug!("AI attack queued for t={:.2}", due);
    true
}

/// Land a queued attack, or retry later while the AI is dead
pub fn launch_attack(state: &mut GameState, config: &GameConfig) {
    let now = state.time;
    if state.player(PlayerId::Ai).is_dead {
        let due = state
            .schedule
            .schedule_once(ScheduledEvent::AiAttack, now, state.ai.attack_cooldown);
        log::debug!("AI is dead, attack postponed to t={:.2}", due);
        return;
    }

    let aim_at = state.player(PlayerId::Human).pos;
    let target = state
        .board
        .random_point_near(&mut state.rng, aim_at, state.ai.accuracy);
    state.trigger_explosion(PlayerId::Ai, target, config);
    state.events.push(GameEvent::AiAttackLaunched { target });
}
