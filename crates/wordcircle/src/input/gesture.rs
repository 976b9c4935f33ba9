use glam::Vec2;

/// Answers "is point P inside tile i?" for the recognizer.
/// Geometry belongs to whoever lays the tiles out.
pub trait TileRegions {
    /// Number of tiles.
    fn tile_count(&self) -> usize;
    /// Whether `pos` lies inside tile `index`.
    fn contains(&self, index: usize, pos: Vec2) -> bool;

    /// First tile containing `pos`, if any.
    fn tile_at(&self, pos: Vec2) -> Option<usize> {
        (0..self.tile_count()).find(|&i| self.contains(i, pos))
    }
}

/// Result of processing a pointer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickResult {
    /// Drag started on a tile.
    Started,
    /// One or more tiles joined the selection.
    Extended,
    /// Pointer released; the selected letters in selection order.
    Released(String),
    /// Nothing changed.
    Ignored,
}

/// Turns a pointer drag over the letter ring into an ordered, duplicate-free
/// selection of tile indices.
///
/// A drag starts only on a tile. While dragging, every tile the pointer enters
/// is appended once, in first-touch order; re-entering a tile does nothing.
/// Releasing anywhere emits the word and clears the selection.
#[derive(Debug, Clone, Default)]
pub struct LetterPicker {
    selected: Vec<usize>,
    dragging: bool,
}

impl LetterPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle pointer down.
    pub fn on_pointer_down(&mut self, pos: Vec2, tiles: &impl TileRegions) -> PickResult {
        match tiles.tile_at(pos) {
            Some(index) => {
                self.dragging = true;
                self.selected.clear();
                self.selected.push(index);
                PickResult::Started
            }
            None => PickResult::Ignored,
        }
    }

    /// Handle pointer move.
    pub fn on_pointer_move(&mut self, pos: Vec2, tiles: &impl TileRegions) -> PickResult {
        if !self.dragging {
            return PickResult::Ignored;
        }

        let mut grew = false;
        for index in 0..tiles.tile_count() {
            if !self.selected.contains(&index) && tiles.contains(index, pos) {
                self.selected.push(index);
                grew = true;
            }
        }

        if grew {
            PickResult::Extended
        } else {
            PickResult::Ignored
        }
    }

    /// Handle pointer up. `letters` are the ring letters in tile order.
    pub fn on_pointer_up(&mut self, letters: &[char]) -> PickResult {
        if !self.dragging {
            return PickResult::Ignored;
        }
        let word = self.current_word(letters);
        self.reset();
        PickResult::Released(word)
    }

    /// Drop any in-progress selection (level change, new shuffle).
    pub fn reset(&mut self) {
        self.dragging = false;
        self.selected.clear();
    }

    /// Tile indices selected so far, in selection order.
    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Live guess for display while the drag is still going.
    pub fn current_word(&self, letters: &[char]) -> String {
        self.selected
            .iter()
            .filter_map(|&i| letters.get(i))
            .collect()
    }
}
