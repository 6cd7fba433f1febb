//! Presentation-facing wrapper around the simulation
//!
//! Owns a `GameState`, runs `tick`, and hands the resulting events to a set of
//! hooks once the tick has finished.

use crate::highscores::RunRecord;
use crate::sim::{GameEvent, GameState, SoundEvent, TickInput, tick};
use crate::tuning::Tuning;

/// Callbacks supplied by the presentation layer. All default to no-ops.
pub trait EngineHooks {
    fn on_game_over(&mut self, _record: &RunRecord) {}
    fn on_score_changed(&mut self, _score: u64) {}
    fn on_level_changed(&mut self, _level: u32) {}
    fn on_health_changed(&mut self, _health: f32) {}
    fn play_sound(&mut self, _sound: SoundEvent) {}
}

/// Hooks that ignore everything
impl EngineHooks for () {}

pub struct Engine<H: EngineHooks> {
    state: GameState,
    hooks: H,
    game_over_sent: bool,
}

impl<H: EngineHooks> Engine<H> {
    pub fn new(width: f32, height: f32, seed: u64, hooks: H) -> Self {
        Self::with_tuning(width, height, seed, Tuning::default(), hooks)
    }

    pub fn with_tuning(width: f32, height: f32, seed: u64, tuning: Tuning, hooks: H) -> Self {
        Self {
            state: GameState::with_tuning(width, height, seed, tuning),
            hooks,
            game_over_sent: false,
        }
    }

    /// Advance one frame and dispatch what happened
    pub fn update(&mut self, dt: f32, input: &mut TickInput) {
        let events = tick(&mut self.state, input, dt);
        for event in events {
            match event {
                GameEvent::Sound(sound) => self.hooks.play_sound(sound),
                GameEvent::ScoreChanged(score) => self.hooks.on_score_changed(score),
                GameEvent::LevelChanged(level) => self.hooks.on_level_changed(level),
                GameEvent::HealthChanged(health) => self.hooks.on_health_changed(health),
                GameEvent::GameOver => {
                    if !self.game_over_sent {
                        self.game_over_sent = true;
                        let record = RunRecord::from_state(&self.state);
                        self.hooks.on_game_over(&record);
                    }
                }
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Snapshot of the run so far
    pub fn record(&self) -> RunRecord {
        RunRecord::from_state(&self.state)
    }

    /// Start a fresh session with a new seed, keeping hooks and tuning
    pub fn restart(&mut self, seed: u64) {
        let tuning = self.state.tuning.clone();
        self.state = GameState::with_tuning(self.state.width, self.state.height, seed, tuning);
        self.game_over_sent = false;
        log::info!("Restarted with seed {seed}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Bullet;

    #[derive(Default)]
    struct Recorder {
        game_overs: u32,
        sounds: Vec<SoundEvent>,
        health: Vec<f32>,
    }

    impl EngineHooks for Recorder {
        fn on_game_over(&mut self, _record: &RunRecord) {
            self.game_overs += 1;
        }
        fn play_sound(&mut self, sound: SoundEvent) {
            self.sounds.push(sound);
        }
        fn on_health_changed(&mut self, health: f32) {
            self.health.push(health);
        }
    }

    #[test]
    fn test_game_over_dispatched_once() {
        let mut engine = Engine::new(800.0, 600.0, 5, Recorder::default());
        engine.state.spawn_timer = 1.0e6;
        engine.state.player.health = 5.0;
        let at = engine.state.player.pos;
        engine.state.bullets.push(Bullet::enemy(at, 0.0, 5.0));

        let mut input = TickInput::default();
        for _ in 0..10 {
            engine.update(1.0 / 60.0, &mut input);
        }
        assert!(engine.is_game_over());
        assert_eq!(engine.hooks().game_overs, 1);
        assert_eq!(engine.hooks().health, vec![0.0]);

        engine.restart(6);
        assert!(!engine.is_game_over());
        assert_eq!(engine.state().player.health, 100.0);
    }

    #[test]
    fn test_unit_hooks() {
        let mut engine = Engine::new(800.0, 600.0, 5, ());
        let mut input = TickInput {
            touch_fire: true,
            ..Default::default()
        };
        engine.update(1.0 / 60.0, &mut input);
        assert_eq!(engine.record().shots_fired, 1);
    }
}
