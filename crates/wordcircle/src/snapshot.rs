use serde::Serialize;

use crate::puzzle::Status;
use crate::settings::Theme;
use crate::toast::Toast;

/// One letter tile as the UI draws it.
#[derive(Debug, Clone, Serialize)]
pub struct TileView {
    pub letter: char,
    pub x: f32,
    pub y: f32,
    pub selected: bool,
    pub hinted: bool,
}

/// One slot of the solution grid. Letters stay hidden until found.
#[derive(Debug, Clone, Serialize)]
pub struct GridWord {
    pub length: usize,
    pub letters: Option<String>,
}

/// Everything the UI needs to draw a frame.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub level_number: usize,
    pub tiles: Vec<TileView>,
    pub grid: Vec<GridWord>,
    pub found_words: Vec<String>,
    pub coins: u32,
    pub elapsed_secs: u32,
    pub status: Status,
    pub hint_cost: u32,
    pub skip_cost: u32,
    pub hint_pending: bool,
    pub hinted_letters: Vec<char>,
    pub clue: Option<String>,
    pub current_guess: String,
    /// Tile indices in selection order.
    pub selected: Vec<usize>,
    pub toast: Option<Toast>,
    pub theme: &'static Theme,
    pub unlocked_themes: Vec<String>,
}
