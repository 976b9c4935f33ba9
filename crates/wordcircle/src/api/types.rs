use bytemuck::{Pod, Zeroable};

/// A sound event emitted by the game logic.
/// The numeric value maps to a sound in the UI's sound manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

impl SoundEvent {
    pub const SELECT_TILE: SoundEvent = SoundEvent(1);
    pub const CORRECT: SoundEvent = SoundEvent(2);
    pub const INCORRECT: SoundEvent = SoundEvent(3);
    pub const LEVEL_COMPLETE: SoundEvent = SoundEvent(4);
    pub const COINS_SPENT: SoundEvent = SoundEvent(5);
}

/// A game event handed from Rust to the UI through a flat f32 buffer.
/// `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// `a` = coin balance.
    pub const COINS: f32 = 1.0;
    /// `a` = index of the word in grid order, `b` = coins earned.
    pub const WORD_FOUND: f32 = 2.0;
    /// `a` = level index, `b` = elapsed seconds.
    pub const LEVEL_COMPLETE: f32 = 3.0;
    /// `a` = toast code (see `Toast::code`).
    pub const TOAST: f32 = 4.0;
    /// `a` = session generation, `b` = request serial. Read the request JSON next.
    pub const HINT_REQUESTED: f32 = 5.0;
    /// `a` = theme index.
    pub const THEME_UNLOCKED: f32 = 6.0;
    /// `a` = level index.
    pub const LEVEL_STARTED: f32 = 7.0;
    /// `a` = number of selected tiles.
    pub const SELECTION_CHANGED: f32 = 8.0;

    pub fn new(kind: f32, a: f32, b: f32) -> Self {
        Self { kind, a, b, c: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_flatten_to_floats() {
        let events = [
            GameEvent::new(GameEvent::COINS, 130.0, 0.0),
            GameEvent::new(GameEvent::WORD_FOUND, 2.0, 30.0),
        ];
        let floats: &[f32] = bytemuck::cast_slice(&events);
        assert_eq!(floats.len(), 2 * GameEvent::FLOATS);
        assert_eq!(floats[0], GameEvent::COINS);
        assert_eq!(floats[1], 130.0);
        assert_eq!(floats[6], 30.0);
    }
}
