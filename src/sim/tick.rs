//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Rule order
//! inside [`resolve_interactions`] matters: a player revived by a resource
//! pickup can be killed again by a still-lethal explosion in the same tick.

use glam::DVec2;

use super::ai;
use super::movement::move_player;
use super::schedule::ScheduledEvent;
use super::state::{GameEvent, GameState, PlayerId, Status};
use crate::config::GameConfig;

/// Pointer edges for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Press at this position
    pub pointer_down: Option<DVec2>,
    /// Pointer moved while held
    pub pointer_move: Option<DVec2>,
    /// Release
    pub pointer_up: bool,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        self.pointer_down.is_none() && self.pointer_move.is_none() && !self.pointer_up
    }
}

/// Advance the game state by one timestep of `dt` seconds
pub fn tick(state: &mut GameState, config: &GameConfig, input: &TickInput, dt: f64) {
    state.events.clear();
    state.time_ticks += 1;
    state.time += dt;

    run_due_callbacks(state, config);
    apply_input(state, input);

    // Velocity is a per-tick displacement at the nominal rate
    let scale = dt / config.tick_interval();
    for id in PlayerId::ALL {
        move_player(state.player_mut(id), config.speed_const, scale);
    }

    resolve_interactions(state, config);
}

/// Fire every scheduled callback that has come due
fn run_due_callbacks(state: &mut GameState, config: &GameConfig) {
    // Callbacks may requeue themselves; those land in the future and stop the loop
    while let Some(event) = state.schedule.pop_due(state.time) {
        match event {
            ScheduledEvent::Revive(id) => state.revive_player(id),
            ScheduledEvent::AiAttack => ai::launch_attack(state, config),
        }
    }
}

/// Apply pointer edges to the human player
fn apply_input(state: &mut GameState, input: &TickInput) {
    if let Some(pos) = input.pointer_down {
        let now = state.time;
        let human = state.player_mut(PlayerId::Human);
        if !human.is_dead {
            human.goal = pos;
            human.status = Status::Idle;
            state.pointer.pressed = true;
            state.pointer.press_time = now;
        }
    }

    if let Some(pos) = input.pointer_move {
        let pressed = state.pointer.pressed;
        let human = state.player_mut(PlayerId::Human);
        if pressed && !human.is_dead {
            human.goal = pos;
        }
    }

    if input.pointer_up {
        state.pointer.pressed = false;
    }
}

/// Collision and interaction rules, run once per tick after movement
pub fn resolve_interactions(state: &mut GameState, config: &GameConfig) {
    reset_mutual_kill(state);
    resolve_bump(state);
    for id in PlayerId::ALL {
        collect_resource(state, id);
    }
    trigger_human_explosion(state, config);
    ai::schedule_attack(state);
    for owner in PlayerId::ALL {
        resolve_explosion(state, owner, config);
    }
}

/// Both dead would stall the round; the human comes back immediately
fn reset_mutual_kill(state: &mut GameState) {
    if state.player(PlayerId::Human).is_dead && state.player(PlayerId::Ai).is_dead {
        state.revive_player(PlayerId::Human);
    }
}

/// Players bumping into each other scatter to random goals; otherwise the AI
/// chases the resource
fn resolve_bump(state: &mut GameState) {
    let human_box = state.player(PlayerId::Human).bounding_box();
    let ai_box = state.player(PlayerId::Ai).bounding_box();

    if human_box.overlaps(&ai_box) {
        for id in PlayerId::ALL {
            let goal = state.random_board_point();
            let player = state.player_mut(id);
            player.goal = goal;
            player.status = Status::Bump;
        }
        state.events.push(GameEvent::Bump);
    } else {
        let target = state.resource.pos;
        let ai = state.player_mut(PlayerId::Ai);
        ai.goal = target;
        ai.status = Status::Idle;
    }
}

/// Picking up the resource scores it, revives the opponent early and moves
/// the resource
fn collect_resource(state: &mut GameState, id: PlayerId) {
    let resource_box = state.resource.bounding_box();
    if !state.player(id).bounding_box().overlaps(&resource_box) {
        return;
    }

    state.player_mut(id).resource_count += 1;
    state.revive_player(id.opponent());
    let relocated_to = state.relocate_resource();
    if id == PlayerId::Ai {
        state.ai.last_attack_time = state.time;
    }

    state.events.push(GameEvent::ResourceCollected {
        player: id,
        relocated_to,
    });
    log::debug!(
        "{:?} collected a resource ({} held)",
        id,
        state.player(id).resource_count
    );
}

/// Holding the pointer past the charge time detonates at the human's goal
fn trigger_human_explosion(state: &mut GameState, config: &GameConfig) {
    let charged = state.time > state.pointer.press_time + config.charge_time;
    if !state.pointer.pressed || !charged {
        return;
    }
    let human = state.player_mut(PlayerId::Human);
    let target = human.goal;
    if !human.spend_resource() {
        return;
    }
    state.trigger_explosion(PlayerId::Human, target, config);
}

/// Kill the opponent inside a lethal explosion, retire expired ones
fn resolve_explosion(state: &mut GameState, owner: PlayerId, config: &GameConfig) {
    let now = state.time;
    let explosion = state.explosion(owner);
    if !explosion.active {
        return;
    }

    if explosion.is_expired_at(now) {
        state.explosion_mut(owner).hide();
        let player = state.player_mut(owner);
        player.speed = config.speed_const;
        player.status = Status::Idle;
        state.events.push(GameEvent::ExplosionHidden { owner });
        return;
    }

    let victim = owner.opponent();
    let hit = explosion.is_lethal_at(now)
        && explosion
            .bounding_box()
            .overlaps(&state.player(victim).bounding_box());
    if hit && !state.player(victim).is_dead {
        state.kill_player(victim, config.death_duration);
        state.player_mut(owner).kill_count += 1;
        state.events.push(GameEvent::PlayerKilled { victim, killer: owner });
        log::info!(
            "{:?} killed {:?} (kills: {})",
            owner,
            victim,
            state.player(owner).kill_count
        );
    }
}
