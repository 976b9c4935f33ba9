use thiserror::Error;

/// Why a player action was refused. Never fatal and never mutates state;
/// the display text is what the player sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Already found!")]
    AlreadyFound,
    #[error("Incorrect!")]
    NotAWord,
    #[error("Not enough coins!")]
    InsufficientCoins { needed: u32, available: u32 },
    #[error("Level already complete!")]
    LevelComplete,
    #[error("A hint is already on its way.")]
    HintPending,
    #[error("Nothing to undo.")]
    NothingToUndo,
    #[error("That theme is still locked.")]
    ThemeLocked(String),
}
