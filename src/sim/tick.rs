//! Variable timestep simulation tick
//!
//! Advances the whole game by one frame and reports what happened as a list
//! of events. The order of the steps matters for tie-breaks.

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;

use super::boss::Boss;
use super::bullet::Bullet;
use super::collision::{Aabb, circles_overlap};
use super::effects::{palette, spawn_explosion, update_particles};
use super::enemy::{EnemyKind, spawn_count, spawn_enemy, spawn_interval};
use super::events::{GameEvent, SoundEvent};
use super::pickup::{PowerupKind, spawn_aid_powerup, spawn_powerup};
use super::state::{GamePhase, GameState};
use super::weapon::{FirePattern, ResourceCost};
use crate::consts::*;
use crate::{angle_between, distance_to_segment, unit_from_angle};

/// Held keys, already mapped from whatever device produced them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Dash,
}

/// Virtual stick; `x`/`y` are normalised
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Joystick {
    pub active: bool,
    pub x: f32,
    pub y: f32,
}

impl Joystick {
    pub fn new(x: f32, y: f32) -> Self {
        Self { active: true, x, y }
    }

    pub fn vector(&self) -> Vec2 {
        let v = Vec2::new(self.x, self.y);
        if v.is_finite() { v } else { Vec2::ZERO }
    }

    /// Active and pushed in some direction
    pub fn is_engaged(&self) -> bool {
        self.active && self.vector() != Vec2::ZERO
    }
}

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub keys: HashSet<Key>,
    /// Cursor in arena coordinates; `None` when there is no pointer at all
    pub pointer: Option<Vec2>,
    pub pointer_down: bool,
    pub move_stick: Joystick,
    pub aim_stick: Joystick,
    /// Touch "hold to fire" button
    pub touch_fire: bool,
    /// One-shot dash request, cleared when a dash starts
    pub dash_request: bool,
}

impl TickInput {
    pub fn is_firing(&self) -> bool {
        self.pointer_down || self.touch_fire || self.keys.contains(&Key::Fire)
    }

    pub fn wants_dash(&self) -> bool {
        self.dash_request || self.keys.contains(&Key::Dash)
    }

    /// Unit (or zero) movement direction. The movement stick overrides keys.
    pub fn movement(&self) -> Vec2 {
        let dir = if self.move_stick.active {
            self.move_stick.vector()
        } else {
            let mut dir = Vec2::ZERO;
            if self.keys.contains(&Key::Up) {
                dir.y -= 1.0;
            }
            if self.keys.contains(&Key::Down) {
                dir.y += 1.0;
            }
            if self.keys.contains(&Key::Left) {
                dir.x -= 1.0;
            }
            if self.keys.contains(&Key::Right) {
                dir.x += 1.0;
            }
            dir
        };
        dir.normalize_or_zero()
    }
}

/// Clamp a frame delta into something safe to integrate
pub fn sanitize_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        return 0.0;
    }
    dt.min(MAX_FRAME_DT)
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &mut TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.is_game_over() {
        return events;
    }

    let dt = sanitize_dt(dt);
    state.play_time += dt;
    state.shake.update(dt);

    // Level transition: cosmetics only
    if state.phase == GamePhase::LevelTransition {
        update_cosmetics(state, dt);
        state.transition_timer -= dt;
        if state.transition_timer <= 0.0 {
            state.transition_timer = 0.0;
            state.phase = GamePhase::Playing;
            log::debug!("Level {} begins", state.level);
        }
        return events;
    }

    state.time += dt;

    // Player
    let firing = input.is_firing();
    let dashed = state.player.update(
        input.movement(),
        input.wants_dash(),
        firing,
        dt,
        state.width,
        state.height,
    );
    if dashed {
        state.stats.dashes_used += 1;
        input.dash_request = false;
    }

    // Firing
    update_crosshair(state, input);
    if firing && state.player.fire_cooldown <= 0.0 {
        fire(state, input, &mut events);
    }

    update_bullets(state, dt);
    spawn_wave(state, dt);
    update_enemies(state, dt, &mut events);

    if !state.boss_active() && state.quota_met() {
        spawn_bosses(state, &mut events);
    }

    let had_bosses = state.boss_active();
    update_bosses(state, dt, &mut events);
    if had_bosses && !state.boss_active() {
        level_up(state, &mut events);
    }

    for powerup in state.powerups.iter_mut() {
        powerup.update(dt);
    }
    state.powerups.retain(|p| p.active);
    update_cosmetics(state, dt);

    resolve_collisions(state, dt, &mut events);

    if state.combo > 0 {
        state.combo_timer -= dt;
        if state.combo_timer <= 0.0 {
            state.combo = 0;
            state.combo_timer = 0.0;
        }
    }

    events
}

fn update_cosmetics(state: &mut GameState, dt: f32) {
    update_particles(&mut state.particles, dt);
    state.background.update(dt, state.time, &mut state.fx_rng);
}

fn update_crosshair(state: &mut GameState, input: &TickInput) {
    let origin = state.player.pos;
    state.crosshair = if input.aim_stick.is_engaged() {
        origin + input.aim_stick.vector() * CROSSHAIR_DISTANCE
    } else if let Some(pointer) = input.pointer {
        pointer
    } else {
        origin + unit_from_angle(state.aim_angle) * CROSSHAIR_DISTANCE
    };
}

/// Heading for the next shot.
///
/// Aim stick first, then the movement stick (straight up when centred), then
/// auto-aim when there is no pointer, and finally the pointer itself.
pub fn aim_angle(state: &GameState, input: &TickInput) -> f32 {
    const UP: f32 = -std::f32::consts::FRAC_PI_2;
    let origin = state.player.pos;

    if input.aim_stick.is_engaged() {
        let v = input.aim_stick.vector();
        return v.y.atan2(v.x);
    }
    if input.move_stick.active {
        let v = input.move_stick.vector();
        return if v == Vec2::ZERO { UP } else { v.y.atan2(v.x) };
    }
    match input.pointer {
        None => match state.nearest_target(origin) {
            Some((_, target)) if target != origin => angle_between(origin, target),
            _ if state.player.vel != Vec2::ZERO => state.player.vel.y.atan2(state.player.vel.x),
            _ => UP,
        },
        Some(pointer) if pointer == origin => state.aim_angle,
        Some(pointer) => angle_between(origin, pointer),
    }
}

fn fire(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let weapon = state.player.weapon;
    let loaded = match weapon.cost() {
        ResourceCost::Free => true,
        ResourceCost::Energy => state.player.laser_energy > 0.0,
        ResourceCost::Ammo => state.player.missiles > 0,
    };
    if !loaded {
        return;
    }

    let angle = aim_angle(state, input);
    let origin = state.player.pos;
    state.aim_angle = angle;
    state.player.fire_cooldown = state.player.fire_interval();
    state.stats.record_shot(weapon);
    events.push(GameEvent::Sound(SoundEvent::Shoot));

    match weapon.pattern() {
        FirePattern::Single => {
            state.bullets.push(Bullet::player(origin, angle, weapon));
        }
        FirePattern::Parallel { offset } => {
            let side = unit_from_angle(angle + std::f32::consts::FRAC_PI_2) * offset;
            state.bullets.push(Bullet::player(origin, angle, weapon));
            state.bullets.push(Bullet::player(origin + side, angle, weapon));
            state.bullets.push(Bullet::player(origin - side, angle, weapon));
        }
        FirePattern::Fan { offsets } => {
            state.bullets.push(Bullet::player(origin, angle, weapon));
            for offset in offsets {
                state.bullets.push(Bullet::player(origin, angle + offset, weapon));
            }
        }
        FirePattern::HitScan => fire_laser(state, origin, angle, events),
        FirePattern::Homing => {
            state.player.missiles -= 1;
            state.bullets.push(Bullet::player(origin, angle, weapon));
        }
        FirePattern::Ring { count } => {
            let step = std::f32::consts::TAU / count as f32;
            for i in 0..count {
                state.bullets.push(Bullet::player(origin, step * i as f32, weapon));
            }
        }
    }
}

/// Instant ray test against every live target along the aim
fn fire_laser(state: &mut GameState, origin: Vec2, angle: f32, events: &mut Vec<GameEvent>) {
    let end = origin + unit_from_angle(angle) * LASER_RANGE;
    let damage = state.player.weapon.damage();
    state.bullets.push(Bullet::laser_beam(origin, angle));

    for i in 0..state.enemies.len() {
        let enemy = &state.enemies[i];
        if enemy.active && distance_to_segment(enemy.pos, origin, end) < enemy.radius + LASER_HIT_SLACK {
            damage_enemy(state, i, damage, events);
        }
    }

    for boss in state.bosses.iter_mut() {
        if !boss.active || boss.is_entering() || boss.health <= 0.0 {
            continue;
        }
        if distance_to_segment(boss.pos, origin, end) < boss.radius + LASER_HIT_SLACK {
            boss.health -= damage;
            state.stats.record_hit(damage);
            events.push(GameEvent::Sound(SoundEvent::Hit));
            spawn_explosion(&mut state.particles, &mut state.fx_rng, boss.pos, palette::SPARK, 12);
        }
    }
}

fn update_bullets(state: &mut GameState, dt: f32) {
    for i in 0..state.bullets.len() {
        if state.bullets[i].active && state.bullets[i].is_homing() {
            if let Some((_, target)) = state.nearest_target(state.bullets[i].pos) {
                state.bullets[i].steer_toward(target);
            }
        }
        state.bullets[i].update(dt, state.width, state.height);
    }
    state.bullets.retain(|b| b.active);
}

fn spawn_wave(state: &mut GameState, dt: f32) {
    state.spawn_timer -= dt;
    if state.spawn_timer > 0.0 || state.boss_active() || state.quota_met() {
        return;
    }
    let count = spawn_count(state.level);
    for _ in 0..count {
        let enemy = spawn_enemy(&mut state.rng, state.width, state.height, state.level);
        state.enemies.push(enemy);
    }
    state.spawn_timer = state.spawn_interval;
}

fn update_enemies(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let target = state.player.pos;
    for enemy in state.enemies.iter_mut().filter(|e| e.active) {
        if let Some(bullet) = enemy.update(dt, target) {
            state.bullets.push(bullet);
            events.push(GameEvent::Sound(SoundEvent::Shoot));
        }
    }
}

fn spawn_bosses(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let count: u32 = if state.level >= 3 { 2 } else { 1 };
    for i in 0..count {
        let mut boss = Boss::spawn(&mut state.rng, state.level, state.width, state.height);
        if count > 1 {
            boss.pos.x = state.width / (count + 1) as f32 * (i + 1) as f32;
        }
        log::info!("{} incoming (level {})", boss.name, state.level);
        state.bosses.push(boss);
    }
    state.enemies.clear();
    state.boss_powerup_timer = state.tuning.boss_powerup_first_delay;
    events.push(GameEvent::Sound(SoundEvent::BossSpawn));
}

fn update_bosses(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let target = state.player.pos;
    for i in 0..state.bosses.len() {
        // Bosses killed during last tick's collisions never act again
        if state.bosses[i].health > 0.0 {
            let shots = state.bosses[i].update(
                dt,
                state.time,
                target,
                state.width,
                state.height,
                &mut state.rng,
            );
            if !shots.is_empty() {
                state.bullets.extend(shots);
                events.push(GameEvent::Sound(SoundEvent::Shoot));
            }
        }

        let boss = &mut state.bosses[i];
        if boss.active && boss.health <= 0.0 {
            boss.active = false;
            let (kind, pos) = (boss.kind, boss.pos);
            log::info!("{} defeated", boss.name);

            state.score += state.tuning.boss_bonus_score;
            state.stats.record_boss_defeat(kind);
            events.push(GameEvent::Sound(SoundEvent::BossDeath));
            events.push(GameEvent::ScoreChanged(state.score));
            spawn_explosion(&mut state.particles, &mut state.fx_rng, pos, palette::BOSS, 40);
            state.shake.trigger(0.5, 20.0);
        }
    }
    state.bosses.retain(|b| b.active);

    if state.boss_active() {
        state.boss_powerup_timer -= dt;
        if state.boss_powerup_timer <= 0.0 {
            state.boss_powerup_timer = state.tuning.boss_powerup_interval;
            let low_health = state.player.health < state.tuning.low_health_threshold;
            let powerup = spawn_aid_powerup(
                &mut state.rng,
                state.width,
                state.height,
                low_health,
                state.tuning.low_health_bias,
            );
            spawn_explosion(&mut state.particles, &mut state.fx_rng, powerup.pos, palette::KAMIKAZE, 10);
            log::debug!("Aid powerup: {}", powerup.kind.as_str());
            state.powerups.push(powerup);
        }
    }
}

fn level_up(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.stats.finish_level();
    state.level += 1;
    state.phase = GamePhase::LevelTransition;
    state.transition_timer = state.tuning.level_transition_duration;
    state.kills_this_level = 0;
    state.kill_quota = state.tuning.kill_quota(state.level);
    state.spawn_interval = spawn_interval(state.level);
    state.player.heal(state.tuning.level_heal(state.level));
    state.background.set_theme(state.level);

    log::info!(
        "Level {} reached (score {}, quota {})",
        state.level,
        state.score,
        state.kill_quota
    );
    events.push(GameEvent::LevelChanged(state.level));
    events.push(GameEvent::HealthChanged(state.player.health));
}

/// Apply player damage to an enemy, killing it when its health runs out
fn damage_enemy(state: &mut GameState, index: usize, damage: f32, events: &mut Vec<GameEvent>) {
    let enemy = &mut state.enemies[index];
    enemy.health -= damage;
    let pos = enemy.pos;
    let dead = enemy.health <= 0.0;

    state.stats.record_hit(damage);
    spawn_explosion(&mut state.particles, &mut state.fx_rng, pos, palette::SPARK, 3);
    events.push(GameEvent::Sound(SoundEvent::Hit));
    if dead {
        kill_enemy(state, index, events);
    }
}

fn kill_enemy(state: &mut GameState, index: usize, events: &mut Vec<GameEvent>) {
    let enemy = &mut state.enemies[index];
    enemy.active = false;
    let (kind, pos, value) = (enemy.kind, enemy.pos, enemy.value);

    state.combo += 1;
    state.combo_timer = state.tuning.combo_timeout;
    state.score += value * state.tuning.combo_multiplier(state.combo) as u64;
    state.kills_this_level += 1;
    state.stats.record_kill(kind, state.combo);

    let color = match kind {
        EnemyKind::Normal => palette::NORMAL_ENEMY,
        EnemyKind::Fast => palette::FAST_ENEMY,
        EnemyKind::Shooter => palette::SHOOTER_ENEMY,
    };
    spawn_explosion(&mut state.particles, &mut state.fx_rng, pos, color, 15);
    state.shake.trigger(0.2, 5.0);
    events.push(GameEvent::Sound(SoundEvent::EnemyDeath));
    events.push(GameEvent::ScoreChanged(state.score));

    if state.rng.random_bool(state.tuning.powerup_drop_chance.clamp(0.0, 1.0)) {
        let powerup = spawn_powerup(&mut state.rng, pos);
        state.powerups.push(powerup);
    }
}

/// Unshielded damage to the player; ends the run when health runs out
fn hurt_player(state: &mut GameState, amount: f32, events: &mut Vec<GameEvent>) {
    let applied = state.player.take_damage(amount);
    if applied <= 0.0 {
        return;
    }
    state.stats.record_damage_taken(applied);
    state.combo = 0;
    state.combo_timer = 0.0;
    events.push(GameEvent::HealthChanged(state.player.health));

    if !state.player.is_alive() && !state.is_game_over() {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {}, level {}, {} kills",
            state.score,
            state.level,
            state.stats.kills
        );
        events.push(GameEvent::GameOver);
    }
}

fn resolve_collisions(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    resolve_bullets(state, events);
    if !state.is_game_over() {
        resolve_enemy_contact(state, events);
    }
    if !state.is_game_over() {
        resolve_boss_contact(state, dt, events);
    }
    if !state.is_game_over() {
        resolve_pickups(state, events);
    }

    state.bullets.retain(|b| b.active);
    state.enemies.retain(|e| e.active);
    state.powerups.retain(|p| p.active);
}

fn resolve_bullets(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for bi in 0..state.bullets.len() {
        if state.is_game_over() {
            return;
        }
        let bullet = &state.bullets[bi];
        if !bullet.collides() {
            continue;
        }
        let (pos, radius, damage) = (bullet.pos, bullet.radius, bullet.damage);

        if !bullet.is_player_aligned() {
            let player = &state.player;
            if circles_overlap(pos, radius, player.pos, player.radius) {
                state.bullets[bi].active = false;
                let at = player.pos;
                spawn_explosion(&mut state.particles, &mut state.fx_rng, at, palette::PLAYER_HIT, 5);
                state.shake.trigger(0.3, 10.0);
                if !state.player.shield_active {
                    hurt_player(state, damage, events);
                }
            }
            continue;
        }

        let hit_enemy = state
            .enemies
            .iter()
            .position(|e| e.active && circles_overlap(pos, radius, e.pos, e.radius));
        if let Some(ei) = hit_enemy {
            state.bullets[bi].active = false;
            damage_enemy(state, ei, damage, events);
            continue;
        }

        let hit_boss = state.bosses.iter_mut().find(|b| {
            b.active
                && b.health > 0.0
                && !b.is_entering()
                && circles_overlap(pos, radius, b.pos, b.radius)
        });
        if let Some(boss) = hit_boss {
            boss.health -= damage;
            state.bullets[bi].active = false;
            state.stats.record_hit(damage);
            spawn_explosion(&mut state.particles, &mut state.fx_rng, pos, palette::SPARK, 3);
            events.push(GameEvent::Sound(SoundEvent::Hit));
        }
    }
}

fn resolve_enemy_contact(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for ei in 0..state.enemies.len() {
        let enemy = &state.enemies[ei];
        if !enemy.active || !circles_overlap(enemy.pos, enemy.radius, state.player.pos, state.player.radius) {
            continue;
        }
        let pos = enemy.pos;
        state.enemies[ei].active = false;
        spawn_explosion(&mut state.particles, &mut state.fx_rng, pos, palette::KAMIKAZE, 10);
        state.shake.trigger(0.4, 15.0);
        if !state.player.shield_active {
            let damage = state.tuning.enemy_contact_damage;
            hurt_player(state, damage, events);
            if state.is_game_over() {
                return;
            }
        }
    }
}

fn resolve_boss_contact(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    for bi in 0..state.bosses.len() {
        let boss = &state.bosses[bi];
        if !boss.active || boss.is_entering() || boss.health <= 0.0 {
            continue;
        }
        let solid = Aabb::square(boss.pos, boss.size);
        let body = Aabb::square(state.player.pos, state.player.radius * 2.0);
        let Some(push) = body.push_out_of(&solid) else {
            continue;
        };

        state.player.pos += push;
        state.player.clamp_to_arena(state.width, state.height);
        state.shake.trigger(0.2, 5.0);
        if !state.player.shield_active {
            let damage = state.tuning.boss_contact_dps * dt;
            hurt_player(state, damage, events);
            if state.is_game_over() {
                return;
            }
        }
    }
}

fn resolve_pickups(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for pi in 0..state.powerups.len() {
        let powerup = &state.powerups[pi];
        if !powerup.active
            || !circles_overlap(powerup.pos, powerup.radius, state.player.pos, state.player.radius)
        {
            continue;
        }
        let kind = powerup.kind;
        state.powerups[pi].active = false;
        state.stats.record_powerup(kind);
        events.push(GameEvent::Sound(SoundEvent::Powerup));

        if let Some(weapon) = kind.weapon() {
            state.player.equip(weapon);
            log::debug!("Picked up {}", weapon.as_str());
            continue;
        }
        match kind {
            PowerupKind::Rapid => state.player.activate_rapid_fire(),
            PowerupKind::Shield => state.player.activate_shield(),
            PowerupKind::Health => {
                state.player.heal(state.tuning.health_pickup_amount);
                events.push(GameEvent::HealthChanged(state.player.health));
            }
            _ => {}
        }
    }
}
