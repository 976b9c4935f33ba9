use crate::api::types::{GameEvent, SoundEvent};
use crate::input::queue::InputQueue;

/// Configuration for the runner, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units (pointer coordinates use the same units).
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 360.0,
            world_height: 640.0,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

/// The contract every game must fulfill.
pub trait Game {
    /// Return runner configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed tick of `dt` seconds. Consume input, advance timers, emit events.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32);
}

/// Per-frame output of the game, passed to Game::init and Game::update.
pub struct EngineContext {
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    max_sounds: usize,
    max_events: usize,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_limits(&GameConfig::default())
    }

    pub fn with_limits(config: &GameConfig) -> Self {
        Self {
            sounds: Vec::with_capacity(config.max_sounds),
            events: Vec::with_capacity(config.max_events),
            max_sounds: config.max_sounds,
            max_events: config.max_events,
        }
    }

    /// Emit a sound event for the UI. Extra sounds past the frame limit are dropped.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        if self.sounds.len() < self.max_sounds {
            self.sounds.push(event);
        }
    }

    /// Emit a game event for the UI. Extra events past the frame limit are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() < self.max_events {
            self.events.push(event);
        } else {
            log::warn!("event buffer full, dropping kind {}", event.kind);
        }
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_respect_frame_limit() {
        let config = GameConfig {
            max_events: 2,
            max_sounds: 1,
            ..GameConfig::default()
        };
        let mut ctx = EngineContext::with_limits(&config);
        for i in 0..3 {
            ctx.emit_event(GameEvent::new(GameEvent::COINS, i as f32, 0.0));
            ctx.emit_sound(SoundEvent::CORRECT);
        }
        assert_eq!(ctx.events.len(), 2);
        assert_eq!(ctx.sounds.len(), 1);

        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
        assert!(ctx.sounds.is_empty());
    }
}
