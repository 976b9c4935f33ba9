use wordcircle::{EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue};

/// Generic game runner that wires up the fixed-step loop.
///
/// The crate root keeps one `GameRunner` in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export generic
/// structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    idle: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
    /// Flat buffer of sound event IDs for the UI to read.
    sound_buffer: Vec<u8>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            timestep: FixedTimestep::new(config.fixed_dt),
            ctx: EngineContext::with_limits(&config),
            sound_buffer: Vec::with_capacity(config.max_sounds),
            game,
            input: InputQueue::new(),
            idle: InputQueue::new(),
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.ctx.clear_frame_data();
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.pack_sounds();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: advance the game by as many fixed steps as `dt` covers.
    /// Queued input is handed to the first step only and kept until a step runs.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        let step_dt = self.timestep.dt();
        for step in 0..steps {
            let input = if step == 0 { &self.input } else { &self.idle };
            self.game.update(&mut self.ctx, input, step_dt);
        }
        if steps > 0 {
            self.input.drain();
        }

        self.pack_sounds();
    }

    fn pack_sounds(&mut self) {
        self.sound_buffer.clear();
        for sound in &self.ctx.sounds {
            self.sound_buffer.push(sound.0 as u8);
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Direct access for state that lives beside the input queue.
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    // ---- Pointer accessors for buffer reads ----

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    pub fn max_sounds(&self) -> u32 {
        self.config.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordcircle::{
        GameEvent, LevelBook, LengthHintProvider, MemoryStore, SoundEvent, WordCircle,
        WordCircleConfig, CUSTOM_SKIP,
    };

    /// Counts how often it sees input and time.
    #[derive(Default)]
    struct Counter {
        updates: u32,
        inputs_seen: usize,
    }

    impl Game for Counter {
        fn init(&mut self, ctx: &mut EngineContext) {
            ctx.emit_sound(SoundEvent::CORRECT);
        }

        fn update(&mut self, _ctx: &mut EngineContext, input: &InputQueue, _dt: f32) {
            self.updates += 1;
            self.inputs_seen += input.len();
        }
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = GameRunner::new(Counter::default());
        runner.tick(1.0);
        assert_eq!(runner.game().updates, 0);
    }

    #[test]
    fn input_reaches_only_the_first_step() {
        let mut runner = GameRunner::new(Counter::default());
        runner.init();
        assert_eq!(runner.sound_events_len(), 1);

        runner.push_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        runner.tick(3.0 / 60.0 + 0.001);
        assert_eq!(runner.game().updates, 3);
        assert_eq!(runner.game().inputs_seen, 1);
        assert_eq!(runner.sound_events_len(), 0);
    }

    #[test]
    fn input_waits_for_a_step() {
        let mut runner = GameRunner::new(Counter::default());
        runner.init();
        runner.push_input(InputEvent::PointerUp { x: 0.0, y: 0.0 });
        runner.tick(0.001);
        assert_eq!(runner.game().inputs_seen, 0);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().inputs_seen, 1);
    }

    #[test]
    fn game_events_are_exposed_as_floats() {
        let game = WordCircle::new(
            LevelBook::bundled(),
            MemoryStore::new(),
            LengthHintProvider::new(3),
            WordCircleConfig::default(),
        );
        let mut runner = GameRunner::new(game);
        runner.init();
        runner.push_input(InputEvent::Custom { kind: CUSTOM_SKIP, a: 0.0 });
        runner.tick(1.0 / 60.0 + 0.001);

        assert!(runner.game_events_len() > 0);
        let first = runner.game_events_ptr();
        // SAFETY: the pointer covers game_events_len() packed GameEvents.
        let kind = unsafe { *first };
        assert!(kind >= GameEvent::COINS && kind <= GameEvent::SELECTION_CHANGED);
        assert_eq!(runner.game().session().found_words().len(), 1);
        assert_eq!(runner.game().session().coins(), 90);
    }
}
