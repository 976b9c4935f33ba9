use serde::Serialize;

use crate::puzzle::error::Rejection;

/// A short message shown to the player, gone after a few seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub code: u32,
    pub text: String,
    #[serde(skip)]
    remaining: f32,
}

impl Toast {
    pub const CORRECT: u32 = 1;
    pub const ALREADY_FOUND: u32 = 2;
    pub const INCORRECT: u32 = 3;
    pub const LEVEL_COMPLETE: u32 = 4;
    pub const NOT_ENOUGH_COINS: u32 = 5;
    pub const HINT_FAILED: u32 = 6;
    pub const HINT_PENDING: u32 = 7;
    pub const NOTHING_TO_UNDO: u32 = 8;
    pub const THEME_LOCKED: u32 = 9;
    pub const THEME_UNLOCKED: u32 = 10;
    pub const ALREADY_COMPLETE: u32 = 11;

    pub fn new(code: u32, text: impl Into<String>, secs: f32) -> Self {
        Self {
            code,
            text: text.into(),
            remaining: secs,
        }
    }

    pub fn correct() -> Self {
        Self::new(Self::CORRECT, "Correct!", 1.0)
    }

    pub fn level_complete() -> Self {
        Self::new(Self::LEVEL_COMPLETE, "Level Complete!", 3.0)
    }

    pub fn hint_failed() -> Self {
        Self::new(Self::HINT_FAILED, "Could not get a hint. Try again.", 2.0)
    }

    pub fn theme_unlocked(name: &str) -> Self {
        Self::new(Self::THEME_UNLOCKED, format!("New theme unlocked: {name}"), 3.0)
    }

    pub fn from_rejection(rejection: &Rejection) -> Self {
        let (code, secs) = match rejection {
            Rejection::AlreadyFound => (Self::ALREADY_FOUND, 1.0),
            Rejection::NotAWord => (Self::INCORRECT, 1.0),
            Rejection::InsufficientCoins { .. } => (Self::NOT_ENOUGH_COINS, 2.0),
            Rejection::LevelComplete => (Self::ALREADY_COMPLETE, 1.5),
            Rejection::HintPending => (Self::HINT_PENDING, 1.5),
            Rejection::NothingToUndo => (Self::NOTHING_TO_UNDO, 1.5),
            Rejection::ThemeLocked(_) => (Self::THEME_LOCKED, 1.5),
        };
        Self::new(code, rejection.to_string(), secs)
    }

    /// Age the toast. Returns false once it has expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_text_becomes_message() {
        let toast = Toast::from_rejection(&Rejection::InsufficientCoins { needed: 50, available: 5 });
        assert_eq!(toast.code, Toast::NOT_ENOUGH_COINS);
        assert_eq!(toast.text, "Not enough coins!");
    }

    #[test]
    fn expires_after_duration() {
        let mut toast = Toast::correct();
        assert!(toast.tick(0.5));
        assert!(!toast.tick(0.5));
    }
}
