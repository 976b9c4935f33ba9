use crate::puzzle::hint::HintReply;

/// Input event types the game understands.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at world coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at world coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to world coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A button press from the UI layer (hint, skip, undo, ...).
    /// `kind` identifies the button; `a` carries an optional argument.
    Custom { kind: u32, a: f32 },
    /// An externally resolved hint request.
    HintReply(HintReply),
}

/// A queue of input events.
/// The bridge pushes events as they arrive; the game reads them each tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
