//! Attract-mode pilot
//!
//! Produces the input a half-decent player would give: dodge what is close,
//! grab nearby powerups when it is safe, keep the trigger held and let
//! auto-aim pick targets.

use glam::Vec2;

use super::state::GameState;
use super::tick::{Joystick, TickInput};

/// Threats closer than this push the pilot away
const DANGER_RADIUS: f32 = 140.0;
/// Powerups within this distance are worth a detour
const PICKUP_RADIUS: f32 = 300.0;
/// Preferred gap to the arena walls
const WALL_MARGIN: f32 = 80.0;

/// Input for the next tick
pub fn drive(state: &GameState) -> TickInput {
    let player = &state.player;
    let pos = player.pos;

    let mut avoid = Vec2::ZERO;
    let mut threats = 0;
    let bodies = state
        .enemies
        .iter()
        .filter(|e| e.active)
        .map(|e| (e.pos, e.radius))
        .chain(state.bosses.iter().map(|b| (b.pos, b.radius)))
        .chain(
            state
                .bullets
                .iter()
                .filter(|b| b.collides() && !b.is_player_aligned())
                .map(|b| (b.pos, b.radius)),
        );
    for (other, radius) in bodies {
        let away = pos - other;
        let dist = (away.length() - radius).max(1.0);
        if dist < DANGER_RADIUS {
            avoid += away.normalize_or_zero() * (DANGER_RADIUS / dist);
            threats += 1;
        }
    }

    // Walls push back in
    let w = state.width;
    let h = state.height;
    if pos.x < WALL_MARGIN {
        avoid.x += 1.0;
    }
    if pos.x > w - WALL_MARGIN {
        avoid.x -= 1.0;
    }
    if pos.y < WALL_MARGIN {
        avoid.y += 1.0;
    }
    if pos.y > h - WALL_MARGIN {
        avoid.y -= 1.0;
    }

    let pickup = state
        .powerups
        .iter()
        .filter(|p| p.active && p.pos.distance(pos) < PICKUP_RADIUS)
        .min_by(|a, b| a.pos.distance_squared(pos).total_cmp(&b.pos.distance_squared(pos)));

    let desired = match pickup {
        Some(p) if threats == 0 => (p.pos - pos).normalize_or_zero(),
        _ if avoid != Vec2::ZERO => avoid.normalize_or_zero(),
        // Drift back toward the middle
        _ => {
            let center = Vec2::new(w / 2.0, h / 2.0);
            let to_center = center - pos;
            if to_center.length() > 60.0 {
                to_center.normalize_or_zero() * 0.5
            } else {
                Vec2::ZERO
            }
        }
    };

    TickInput {
        // No pointer: auto-aim chooses the nearest target
        pointer: None,
        touch_fire: true,
        move_stick: Joystick::new(desired.x, desired.y),
        dash_request: threats >= 3 && player.dash_cooldown <= 0.0,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bullet::Bullet;
    use crate::sim::pickup::{Powerup, PowerupKind};

    #[test]
    fn test_moves_away_from_bullets() {
        let mut state = GameState::new(800.0, 600.0, 3);
        let pos = state.player.pos;
        state.bullets.push(Bullet::enemy(pos + Vec2::new(30.0, 0.0), std::f32::consts::PI, 5.0));
        let input = drive(&state);
        assert!(input.move_stick.x < 0.0);
        assert!(input.is_firing());
        assert!(input.pointer.is_none());
    }

    #[test]
    fn test_collects_nearby_powerup_when_safe() {
        let mut state = GameState::new(800.0, 600.0, 3);
        let pos = state.player.pos;
        state.powerups.push(Powerup::new(pos + Vec2::new(0.0, 100.0), PowerupKind::Shield));
        let input = drive(&state);
        assert!(input.move_stick.y > 0.9);
    }

    #[test]
    fn test_pilot_survives_a_while() {
        let mut state = GameState::new(1280.0, 720.0, 2024);
        for _ in 0..(60 * 20) {
            let mut input = drive(&state);
            crate::sim::tick(&mut state, &mut input, crate::consts::FIXED_DT);
            if state.is_game_over() {
                break;
            }
        }
        assert!(state.stats.shots_fired > 0);
        assert!(state.play_time > 5.0);
    }
}
