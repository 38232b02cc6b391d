//! Game state and core simulation types
//!
//! Entities are reused for the whole process lifetime: explosions, fires and
//! the resource are only moved and toggled, and death is a sub-state of a
//! player rather than its removal.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Board, Rect};
use super::schedule::{Schedule, ScheduledEvent};
use crate::config::GameConfig;

/// Which of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    /// Pointer-controlled player (P1)
    Human,
    /// Computer-controlled player (P2)
    Ai,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::Human, PlayerId::Ai];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::Human => 0,
            PlayerId::Ai => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::Human => PlayerId::Ai,
            PlayerId::Ai => PlayerId::Human,
        }
    }
}

/// Cosmetic player status shown next to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Idle,
    /// Players bumped into each other
    Bump,
    /// Running away from an own explosion
    Fleeing,
    Dead,
    Alive,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "",
            Status::Bump => "vrr..",
            Status::Fleeing => "Run away !",
            Status::Dead => "I am dead :(",
            Status::Alive => "I am alive :)",
        }
    }
}

/// Burning marker shown while its player is dead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fire {
    pub active: bool,
    pub pos: DVec2,
    pub size: DVec2,
}

impl Fire {
    pub fn new(size: f64) -> Self {
        Self {
            active: false,
            pos: DVec2::ZERO,
            size: DVec2::splat(size),
        }
    }

    pub fn show(&mut self, pos: DVec2) {
        self.pos = pos;
        self.active = true;
    }

    pub fn hide(&mut self) {
        self.active = false;
    }
}

/// A player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Center position
    pub pos: DVec2,
    /// Point the movement resolver steers toward
    pub goal: DVec2,
    /// Displacement applied on the last tick
    pub vel: DVec2,
    /// Signed speed; negative while fleeing from an own explosion
    pub speed: f64,
    pub size: DVec2,
    /// Collected resources, spent one per explosion
    pub resource_count: u32,
    /// Opponent kills
    pub kill_count: u32,
    pub is_dead: bool,
    pub status: Status,
    pub fire: Fire,
}

impl Player {
    pub fn new(id: PlayerId, pos: DVec2, config: &GameConfig) -> Self {
        Self {
            id,
            pos,
            goal: pos,
            vel: DVec2::ZERO,
            speed: config.speed_const,
            size: DVec2::splat(config.player_size),
            resource_count: 0,
            kill_count: 0,
            is_dead: false,
            status: Status::Idle,
            fire: Fire::new(config.fire_size),
        }
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Spend one resource; false when there is nothing to spend
    pub fn spend_resource(&mut self) -> bool {
        if self.resource_count == 0 {
            return false;
        }
        self.resource_count -= 1;
        true
    }

    /// Freeze in place and light the fire
    fn enter_dead(&mut self) {
        self.goal = self.pos;
        self.vel = DVec2::ZERO;
        self.is_dead = true;
        self.fire.show(self.pos);
        self.status = Status::Dead;
    }

    /// Safe to call on a player that is already alive
    fn leave_dead(&mut self) {
        self.fire.hide();
        self.is_dead = false;
        self.status = Status::Alive;
    }
}

/// The single shared collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub pos: DVec2,
    pub size: DVec2,
}

impl Resource {
    pub fn bounding_box(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }
}

/// An explosion owned by one player that can kill the other
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub owner: PlayerId,
    pub active: bool,
    pub pos: DVec2,
    pub size: DVec2,
    /// Absolute time from which the explosion is lethal
    pub armed_at: f64,
    /// Absolute time the explosion despawns
    pub expires_at: f64,
}

impl Explosion {
    pub fn new(owner: PlayerId, size: f64) -> Self {
        Self {
            owner,
            active: false,
            pos: DVec2::ZERO,
            size: DVec2::splat(size),
            armed_at: 0.0,
            expires_at: 0.0,
        }
    }

    /// Trigger at `pos`; re-triggering an active explosion restarts it
    pub fn show(&mut self, pos: DVec2, now: f64, arm_delay: f64, duration: f64) {
        self.pos = pos;
        self.active = true;
        self.armed_at = now + arm_delay;
        self.expires_at = now + duration;
    }

    pub fn hide(&mut self) {
        self.active = false;
    }

    /// Lethal window is `[armed_at, expires_at)`
    pub fn is_lethal_at(&self, now: f64) -> bool {
        self.active && now >= self.armed_at && now < self.expires_at
    }

    pub fn is_expired_at(&self, now: f64) -> bool {
        now >= self.expires_at
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }
}

/// Attack timing for the AI player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiBrain {
    /// Half-width of the square it aims into around the human player
    pub accuracy: f64,
    /// Seconds between attacks, also the delay before an attack lands
    pub attack_cooldown: f64,
    /// Time of the last attack decision or resource pickup
    pub last_attack_time: f64,
}

/// Pointer press tracking for the human player
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pointer {
    pub pressed: bool,
    /// Time of the last press-down
    pub press_time: f64,
}

/// Things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ResourceCollected { player: PlayerId, relocated_to: DVec2 },
    PlayerKilled { victim: PlayerId, killer: PlayerId },
    PlayerRevived { player: PlayerId },
    FireShown { player: PlayerId, pos: DVec2 },
    FireHidden { player: PlayerId },
    ExplosionShown { owner: PlayerId, pos: DVec2 },
    ExplosionHidden { owner: PlayerId },
    Bump,
    AiAttackQueued { due: f64 },
    AiAttackLaunched { target: DVec2 },
}

/// Per-player score line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub resources: u32,
    pub kills: u32,
}

/// Serializable score summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub human: PlayerScore,
    pub ai: PlayerScore,
    pub elapsed_secs: f64,
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation clock in seconds
    pub time: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub board: Board,
    /// Indexed by [`PlayerId::index`]
    pub players: [Player; 2],
    /// Indexed by owner
    pub explosions: [Explosion; 2],
    pub resource: Resource,
    pub ai: AiBrain,
    pub pointer: Pointer,
    pub schedule: Schedule,
    /// Events recorded during the last tick
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, config: &GameConfig) -> Self {
        let board = Board::new(config.board_width, config.board_height);
        let human_start = DVec2::new(board.width * 0.25, board.height * 0.5);
        let ai_start = DVec2::new(board.width * 0.75, board.height * 0.5);

        Self {
            seed,
            time: 0.0,
            time_ticks: 0,
            board,
            players: [
                Player::new(PlayerId::Human, human_start, config),
                Player::new(PlayerId::Ai, ai_start, config),
            ],
            explosions: [
                Explosion::new(PlayerId::Human, config.explosion_size),
                Explosion::new(PlayerId::Ai, config.explosion_size),
            ],
            resource: Resource {
                pos: board.center(),
                size: DVec2::splat(config.resource_size),
            },
            ai: AiBrain {
                accuracy: config.ai_accuracy,
                attack_cooldown: config.ai_frequency,
                last_attack_time: 0.0,
            },
            pointer: Pointer::default(),
            schedule: Schedule::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    #[inline]
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    #[inline]
    pub fn explosion(&self, owner: PlayerId) -> &Explosion {
        &self.explosions[owner.index()]
    }

    #[inline]
    pub fn explosion_mut(&mut self, owner: PlayerId) -> &mut Explosion {
        &mut self.explosions[owner.index()]
    }

    /// Kill a player and queue its revival
    pub fn kill_player(&mut self, id: PlayerId, death_duration: f64) {
        let now = self.time;
        let player = self.player_mut(id);
        player.enter_dead();
        let pos = player.pos;

        self.schedule
            .schedule_once(ScheduledEvent::Revive(id), now, death_duration);
        self.events.push(GameEvent::FireShown { player: id, pos });
        log::debug!("{:?} died at ({:.0}, {:.0})", id, pos.x, pos.y);
    }

    /// Bring a player back to life; does nothing to a living player
    pub fn revive_player(&mut self, id: PlayerId) {
        let player = self.player_mut(id);
        let was_dead = player.is_dead;
        let fire_was_active = player.fire.active;
        if !was_dead && !fire_was_active {
            return;
        }
        player.leave_dead();

        if fire_was_active {
            self.events.push(GameEvent::FireHidden { player: id });
        }
        if was_dead {
            self.events.push(GameEvent::PlayerRevived { player: id });
            log::debug!("{:?} is alive again", id);
        }
    }

    /// Arm `owner`'s explosion at `pos`
    pub fn trigger_explosion(&mut self, owner: PlayerId, pos: DVec2, config: &GameConfig) {
        let now = self.time;
        self.explosion_mut(owner).show(
            pos,
            now,
            config.explosion_arm_delay,
            config.explosion_duration,
        );
        let player = self.player_mut(owner);
        player.speed = -config.speed_const;
        player.status = Status::Fleeing;

        self.events.push(GameEvent::ExplosionShown { owner, pos });
        log::debug!("{:?} explosion at ({:.0}, {:.0})", owner, pos.x, pos.y);
    }

    /// Move the resource somewhere new on the board
    pub fn relocate_resource(&mut self) -> DVec2 {
        let pos = self.board.random_point(&mut self.rng);
        self.resource.pos = pos;
        pos
    }

    /// Uniform random point on the board
    pub fn random_board_point(&mut self) -> DVec2 {
        self.board.random_point(&mut self.rng)
    }

    pub fn scoreboard(&self) -> Scoreboard {
        let score = |p: &Player| PlayerScore {
            resources: p.resource_count,
            kills: p.kill_count,
        };
        Scoreboard {
            human: score(self.player(PlayerId::Human)),
            ai: score(self.player(PlayerId::Ai)),
            elapsed_secs: self.time,
        }
    }
}
