//! Movement toward a goal point
//!
//! Each axis moves independently at `speed` per tick until it is within
//! `speed_const` of the goal, then snaps onto it. A negative speed moves the
//! player away from its goal instead.

use glam::DVec2;

use super::state::Player;

/// Advance a player by one tick
///
/// `scale` is the tick length relative to the nominal tick (1.0 at the fixed
/// rate). Dead players do not move.
pub fn move_player(player: &mut Player, speed_const: f64, scale: f64) {
    if player.is_dead {
        return;
    }

    let (vx, x) = resolve_axis(player.pos.x, player.goal.x, player.speed, speed_const);
    let (vy, y) = resolve_axis(player.pos.y, player.goal.y, player.speed, speed_const);

    player.vel = DVec2::new(vx, vy);
    player.pos = DVec2::new(x, y) + player.vel * scale;
}

/// Returns (velocity, starting coordinate) for one axis
fn resolve_axis(pos: f64, goal: f64, speed: f64, speed_const: f64) -> (f64, f64) {
    let delta = (goal - pos).trunc();
    if delta.abs() > speed_const {
        let vel = if delta > 0.0 { speed } else { -speed };
        (vel, pos)
    } else {
        (0.0, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::PlayerId;

    fn player_at(pos: DVec2) -> Player {
        Player::new(PlayerId::Human, pos, &GameConfig::default())
    }

    #[test]
    fn test_reaches_goal_and_stops() {
        let mut player = player_at(DVec2::ZERO);
        player.goal = DVec2::new(100.0, 0.0);

        for _ in 0..49 {
            move_player(&mut player, 2.0, 1.0);
        }
        assert_eq!(player.pos.x, 98.0);
        assert_eq!(player.vel.x, 2.0);

        move_player(&mut player, 2.0, 1.0);
        assert_eq!(player.pos.x, 100.0);
        assert_eq!(player.vel.x, 0.0);

        // Stays put once there
        move_player(&mut player, 2.0, 1.0);
        assert_eq!(player.pos, DVec2::new(100.0, 0.0));
    }

    #[test]
    fn test_axes_are_independent() {
        let mut player = player_at(DVec2::new(10.0, 10.0));
        player.goal = DVec2::new(11.5, 50.0);

        move_player(&mut player, 2.0, 1.0);
        assert_eq!(player.pos.x, 11.5);
        assert_eq!(player.vel.x, 0.0);
        assert_eq!(player.pos.y, 12.0);
        assert_eq!(player.vel.y, 2.0);
    }

    #[test]
    fn test_moves_toward_negative_delta() {
        let mut player = player_at(DVec2::new(50.0, 50.0));
        player.goal = DVec2::new(0.0, 0.0);

        move_player(&mut player, 2.0, 1.0);
        assert_eq!(player.pos, DVec2::new(48.0, 48.0));
    }

    #[test]
    fn test_negative_speed_flees() {
        let mut player = player_at(DVec2::new(50.0, 50.0));
        player.goal = DVec2::new(100.0, 50.0);
        player.speed = -2.0;

        move_player(&mut player, 2.0, 1.0);
        assert_eq!(player.pos.x, 48.0);
        assert_eq!(player.vel.x, -2.0);
    }

    #[test]
    fn test_dead_player_does_not_move() {
        let mut player = player_at(DVec2::new(5.0, 5.0));
        player.goal = DVec2::new(100.0, 100.0);
        player.is_dead = true;

        move_player(&mut player, 2.0, 1.0);
        assert_eq!(player.pos, DVec2::new(5.0, 5.0));
    }

    #[test]
    fn test_displacement_scales_with_tick_length() {
        let mut player = player_at(DVec2::ZERO);
        player.goal = DVec2::new(100.0, 0.0);

        move_player(&mut player, 2.0, 0.5);
        assert_eq!(player.pos.x, 1.0);
        assert_eq!(player.vel.x, 2.0);
    }

    #[test]
    fn test_delta_is_truncated_before_threshold() {
        // 2.9 truncates to 2, which is within the threshold
        let mut player = player_at(DVec2::ZERO);
        player.goal = DVec2::new(2.9, -2.9);

        move_player(&mut player, 2.0, 1.0);
        assert_eq!(player.pos, DVec2::new(2.9, -2.9));
        assert_eq!(player.vel, DVec2::ZERO);
    }
}
