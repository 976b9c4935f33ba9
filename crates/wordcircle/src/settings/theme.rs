use serde::Serialize;

/// Display colors handed to the UI. The game logic never looks inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub background: &'static str,
    pub grid_background: &'static str,
    pub grid_text: &'static str,
    pub letter_background: &'static str,
    pub letter_text: &'static str,
    pub correct_background: &'static str,
    pub correct_text: &'static str,
    pub line: &'static str,
}

/// A cosmetic theme, unlocked by finishing level `unlock_level` (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub unlock_level: usize,
    pub palette: Palette,
}

/// Always unlocked; the fallback for anything missing in storage.
pub const BASELINE_THEME: &str = "classic";

pub static THEMES: [Theme; 3] = [
    Theme {
        id: "classic",
        name: "Classic Wood",
        unlock_level: 0,
        palette: Palette {
            background: "#b45309",
            grid_background: "#854d0e",
            grid_text: "#fef9c3",
            letter_background: "#fef08a",
            letter_text: "#854d0e",
            correct_background: "#3b82f6",
            correct_text: "#ffffff",
            line: "#fcd34d",
        },
    },
    Theme {
        id: "night",
        name: "Night Sky",
        unlock_level: 3,
        palette: Palette {
            background: "#0f172a",
            grid_background: "#1e293b",
            grid_text: "#f1f5f9",
            letter_background: "#e2e8f0",
            letter_text: "#1e293b",
            correct_background: "#6366f1",
            correct_text: "#ffffff",
            line: "#a5b4fc",
        },
    },
    Theme {
        id: "sunny",
        name: "Sunny Day",
        unlock_level: 5,
        palette: Palette {
            background: "#22d3ee",
            grid_background: "#bae6fd",
            grid_text: "#075985",
            letter_background: "#ffffff",
            letter_text: "#0369a1",
            correct_background: "#f97316",
            correct_text: "#ffffff",
            line: "#fde047",
        },
    },
];

/// Look a theme up by id, with its index in `THEMES`.
pub fn find(id: &str) -> Option<(usize, &'static Theme)> {
    THEMES.iter().enumerate().find(|(_, t)| t.id == id)
}

impl Theme {
    /// Finishing level `level_index` (0-based) earns this theme.
    pub fn earned_by(&self, level_index: usize) -> bool {
        level_index + 1 >= self.unlock_level
    }
}
