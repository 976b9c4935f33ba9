pub mod api;
pub mod core;
pub mod game;
pub mod input;
pub mod layout;
pub mod puzzle;
pub mod settings;
pub mod snapshot;
pub mod toast;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{SoundEvent, GameEvent};
pub use core::rng::Rng;
pub use core::time::{FixedTimestep, SecondClock};
pub use input::queue::{InputEvent, InputQueue};
pub use input::gesture::{LetterPicker, PickResult, TileRegions};
pub use layout::{RingLayout, TileRect};
pub use game::{
    WordCircle, WordCircleConfig,
    CUSTOM_HINT, CUSTOM_SKIP, CUSTOM_UNDO, CUSTOM_NEXT_LEVEL, CUSTOM_SELECT_THEME,
};
pub use puzzle::{
    Economy, Rejection,
    Hint, HintError, HintProvider, HintReply, HintRequest, HintTicket, LengthHintProvider,
    Level, LevelBook, LevelError,
    Found, HintOutcome, Session, Status, Undone,
};
pub use settings::{KeyValueStore, MemoryStore, Settings, Theme, Palette, THEMES};
pub use snapshot::{Snapshot, TileView, GridWord};
pub use toast::Toast;
