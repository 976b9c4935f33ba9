// puzzle/mod.rs
//
// Rules of the game: levels, the coin economy, the per-level session state
// machine and the hint contract. Nothing here knows about pointers or the UI.

pub mod economy;
pub mod error;
pub mod hint;
pub mod level;
pub mod session;

pub use economy::Economy;
pub use error::Rejection;
pub use hint::{Hint, HintError, HintProvider, HintReply, HintRequest, HintTicket, LengthHintProvider};
pub use level::{Level, LevelBook, LevelError};
pub use session::{Found, HintOutcome, Session, Status, Undone};
