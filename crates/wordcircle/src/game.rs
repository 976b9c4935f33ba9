use std::collections::VecDeque;

use glam::Vec2;

use crate::api::game::{EngineContext, Game, GameConfig};
use crate::api::types::{GameEvent, SoundEvent};
use crate::core::rng::Rng;
use crate::input::gesture::{LetterPicker, PickResult};
use crate::input::queue::{InputEvent, InputQueue};
use crate::layout::RingLayout;
use crate::puzzle::{
    Economy, Found, HintOutcome, HintProvider, HintReply, HintTicket, LevelBook, Rejection,
    Session, Undone,
};
use crate::settings::{KeyValueStore, Settings, THEMES};
use crate::snapshot::{GridWord, Snapshot, TileView};
use crate::toast::Toast;

// Custom event kinds (UI → Rust)
pub const CUSTOM_HINT: u32 = 1;
pub const CUSTOM_SKIP: u32 = 2;
pub const CUSTOM_UNDO: u32 = 3;
pub const CUSTOM_NEXT_LEVEL: u32 = 4;
/// `a` = index into `THEMES`.
pub const CUSTOM_SELECT_THEME: u32 = 5;

/// Shortest gesture that counts as a guess.
const MIN_GUESS_LEN: usize = 2;

/// Word Circle settings beyond the runner's `GameConfig`.
#[derive(Debug, Clone)]
pub struct WordCircleConfig {
    pub ring_center: Vec2,
    pub ring_radius: f32,
    pub tile_size: f32,
    pub seed: u64,
    /// Move on to the next level this many seconds after completing one.
    pub auto_advance_secs: Option<f32>,
    pub economy: Economy,
}

impl Default for WordCircleConfig {
    fn default() -> Self {
        Self {
            ring_center: Vec2::new(180.0, 470.0),
            ring_radius: 90.0,
            tile_size: 64.0,
            seed: 42,
            auto_advance_secs: None,
            economy: Economy::default(),
        }
    }
}

/// The word-circle game: a letter ring, a solution grid and a coin purse.
pub struct WordCircle<P: HintProvider, S: KeyValueStore> {
    config: WordCircleConfig,
    levels: LevelBook,
    settings: Settings<S>,
    hints: P,
    session: Session,
    generation: u64,
    rng: Rng,
    ring: RingLayout,
    picker: LetterPicker,
    toast: Option<Toast>,
    /// Shown one after another once the current toast expires.
    queued_toasts: VecDeque<Toast>,
    advance_timer: Option<f32>,
}

impl<P: HintProvider, S: KeyValueStore> WordCircle<P, S> {
    pub fn new(levels: LevelBook, store: S, hints: P, config: WordCircleConfig) -> Self {
        let settings = Settings::load(store);
        let mut rng = Rng::new(config.seed);
        let generation = 1;
        let session = Session::new(
            levels.get(0).clone(),
            0,
            generation,
            config.economy.starting_coins,
            config.economy.clone(),
            &mut rng,
        );
        let ring = RingLayout::new(
            config.ring_center,
            config.ring_radius,
            config.tile_size,
            session.letters().len(),
        );
        Self {
            config,
            levels,
            settings,
            hints,
            session,
            generation,
            rng,
            ring,
            picker: LetterPicker::new(),
            toast: None,
            queued_toasts: VecDeque::new(),
            advance_timer: None,
        }
    }

    /// Submit a guessed word (already assembled from the ring).
    pub fn submit_word(&mut self, ctx: &mut EngineContext, word: &str) -> Result<Found, Rejection> {
        match self.session.submit(word) {
            Ok(found) => {
                self.on_found(ctx, &found);
                Ok(found)
            }
            Err(rejection) => {
                if rejection == Rejection::NotAWord {
                    ctx.emit_sound(SoundEvent::INCORRECT);
                }
                self.show_rejection(ctx, &rejection);
                Err(rejection)
            }
        }
    }

    /// Pay for a hint and hand the request to the provider.
    pub fn request_hint(&mut self, ctx: &mut EngineContext) -> Result<HintTicket, Rejection> {
        let request = match self.session.begin_hint() {
            Ok(request) => request,
            Err(rejection) => {
                self.show_rejection(ctx, &rejection);
                return Err(rejection);
            }
        };
        let ticket = request.ticket;
        log::info!(
            "hint requested: level {}, ticket {}/{}",
            self.session.level_index() + 1,
            ticket.generation,
            ticket.serial
        );
        self.hints.request(request);
        ctx.emit_sound(SoundEvent::COINS_SPENT);
        ctx.emit_event(GameEvent::new(
            GameEvent::HINT_REQUESTED,
            ticket.generation as f32,
            ticket.serial as f32,
        ));
        self.emit_coins(ctx);
        Ok(ticket)
    }

    /// Apply a provider reply. Replies for an earlier level are ignored.
    pub fn apply_hint_reply(&mut self, ctx: &mut EngineContext, reply: HintReply) -> HintOutcome {
        let outcome = self.session.finish_hint(reply);
        match &outcome {
            HintOutcome::Applied { word, .. } => {
                log::debug!("hint applied for a {}-letter word", word.len());
            }
            HintOutcome::Refunded(err) => {
                log::warn!("hint failed, refunding: {err}");
                self.show(ctx, Toast::hint_failed());
                self.emit_coins(ctx);
            }
            HintOutcome::Stale => {
                log::debug!("dropping stale hint reply");
            }
        }
        outcome
    }

    pub fn skip(&mut self, ctx: &mut EngineContext) -> Result<Found, Rejection> {
        match self.session.skip(&mut self.rng) {
            Ok(found) => {
                ctx.emit_sound(SoundEvent::COINS_SPENT);
                self.on_found(ctx, &found);
                Ok(found)
            }
            Err(rejection) => {
                self.show_rejection(ctx, &rejection);
                Err(rejection)
            }
        }
    }

    pub fn undo(&mut self, ctx: &mut EngineContext) -> Result<Undone, Rejection> {
        match self.session.undo() {
            Ok(undone) => {
                if undone.reopened {
                    self.advance_timer = None;
                }
                self.emit_coins(ctx);
                Ok(undone)
            }
            Err(rejection) => {
                self.show_rejection(ctx, &rejection);
                Err(rejection)
            }
        }
    }

    /// Throw the current session away and start the next level (wrapping).
    pub fn next_level(&mut self, ctx: &mut EngineContext) {
        let index = self.levels.next_index(self.session.level_index());
        self.start_level(ctx, index);
    }

    pub fn select_theme(&mut self, ctx: &mut EngineContext, id: &str) -> Result<(), Rejection> {
        let result = self.settings.select(id);
        if let Err(rejection) = &result {
            self.show_rejection(ctx, rejection);
        }
        result
    }

    fn start_level(&mut self, ctx: &mut EngineContext, index: usize) {
        self.generation += 1;
        self.session = Session::new(
            self.levels.get(index).clone(),
            index,
            self.generation,
            self.session.coins(),
            self.config.economy.clone(),
            &mut self.rng,
        );
        self.ring.relayout(self.session.letters().len());
        self.picker.reset();
        self.advance_timer = None;
        log::info!("level {} started", index + 1);
        ctx.emit_event(GameEvent::new(GameEvent::LEVEL_STARTED, index as f32, 0.0));
        self.emit_coins(ctx);
    }

    fn on_found(&mut self, ctx: &mut EngineContext, found: &Found) {
        let slot = self
            .session
            .level()
            .grid_order()
            .iter()
            .position(|w| *w == found.word)
            .unwrap_or_default();
        ctx.emit_sound(SoundEvent::CORRECT);
        ctx.emit_event(GameEvent::new(
            GameEvent::WORD_FOUND,
            slot as f32,
            found.coins_earned as f32,
        ));
        self.emit_coins(ctx);
        self.show(ctx, Toast::correct());

        if found.completed {
            self.on_complete(ctx);
        }
    }

    fn on_complete(&mut self, ctx: &mut EngineContext) {
        let index = self.session.level_index();
        log::info!(
            "level {} complete in {}s",
            index + 1,
            self.session.elapsed_secs()
        );
        ctx.emit_sound(SoundEvent::LEVEL_COMPLETE);
        ctx.emit_event(GameEvent::new(
            GameEvent::LEVEL_COMPLETE,
            index as f32,
            self.session.elapsed_secs() as f32,
        ));
        self.show(ctx, Toast::level_complete());

        for theme_index in self.settings.unlock_for_level(index) {
            let theme = &THEMES[theme_index];
            log::info!("theme unlocked: {}", theme.id);
            ctx.emit_event(GameEvent::new(GameEvent::THEME_UNLOCKED, theme_index as f32, 0.0));
            self.queued_toasts.push_back(Toast::theme_unlocked(theme.name));
        }
        self.advance_timer = self.config.auto_advance_secs;
    }

    fn show_rejection(&mut self, ctx: &mut EngineContext, rejection: &Rejection) {
        log::debug!("rejected: {rejection:?}");
        self.show(ctx, Toast::from_rejection(rejection));
    }

    /// Replace the current toast and drop anything queued behind it.
    fn show(&mut self, ctx: &mut EngineContext, toast: Toast) {
        self.queued_toasts.clear();
        self.present(ctx, toast);
    }

    fn present(&mut self, ctx: &mut EngineContext, toast: Toast) {
        ctx.emit_event(GameEvent::new(GameEvent::TOAST, toast.code as f32, 0.0));
        self.toast = Some(toast);
    }

    fn emit_coins(&self, ctx: &mut EngineContext) {
        ctx.emit_event(GameEvent::new(GameEvent::COINS, self.session.coins() as f32, 0.0));
    }

    fn emit_selection(&self, ctx: &mut EngineContext) {
        ctx.emit_event(GameEvent::new(
            GameEvent::SELECTION_CHANGED,
            self.picker.selected().len() as f32,
            0.0,
        ));
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => {
                if self.picker.on_pointer_down(Vec2::new(*x, *y), &self.ring) == PickResult::Started {
                    ctx.emit_sound(SoundEvent::SELECT_TILE);
                    self.emit_selection(ctx);
                }
            }
            InputEvent::PointerMove { x, y } => {
                if self.picker.on_pointer_move(Vec2::new(*x, *y), &self.ring) == PickResult::Extended {
                    ctx.emit_sound(SoundEvent::SELECT_TILE);
                    self.emit_selection(ctx);
                }
            }
            InputEvent::PointerUp { .. } => {
                if let PickResult::Released(word) = self.picker.on_pointer_up(self.session.letters()) {
                    self.emit_selection(ctx);
                    if word.chars().count() >= MIN_GUESS_LEN {
                        self.submit_word(ctx, &word).ok();
                    }
                }
            }
            InputEvent::Custom { kind, a } => match *kind {
                CUSTOM_HINT => {
                    self.request_hint(ctx).ok();
                }
                CUSTOM_SKIP => {
                    self.skip(ctx).ok();
                }
                CUSTOM_UNDO => {
                    self.undo(ctx).ok();
                }
                CUSTOM_NEXT_LEVEL => self.next_level(ctx),
                CUSTOM_SELECT_THEME => match THEMES.get(*a as usize) {
                    Some(theme) => {
                        self.select_theme(ctx, theme.id).ok();
                    }
                    None => log::warn!("no theme at index {a}"),
                },
                other => log::warn!("unknown custom event kind {other}"),
            },
            InputEvent::HintReply(reply) => {
                self.apply_hint_reply(ctx, reply.clone());
            }
        }
    }

    /// Serializable view of the whole game for the UI.
    pub fn snapshot(&self) -> Snapshot {
        let letters = self.session.letters();
        let hinted = self.session.hinted_letters();
        let tiles = letters
            .iter()
            .enumerate()
            .map(|(i, &letter)| {
                let center = self.ring.tile_center(i);
                TileView {
                    letter,
                    x: center.x,
                    y: center.y,
                    selected: self.picker.selected().contains(&i),
                    hinted: hinted.contains(&letter),
                }
            })
            .collect();
        let grid = self
            .session
            .level()
            .grid_order()
            .into_iter()
            .map(|w| GridWord {
                length: w.chars().count(),
                letters: self.session.is_found(w).then(|| w.to_string()),
            })
            .collect();

        Snapshot {
            level_number: self.session.level_index() + 1,
            tiles,
            grid,
            found_words: self.session.found_words().iter().map(|w| w.to_string()).collect(),
            coins: self.session.coins(),
            elapsed_secs: self.session.elapsed_secs(),
            status: self.session.status(),
            hint_cost: self.config.economy.hint_cost,
            skip_cost: self.session.skip_cost(),
            hint_pending: self.session.hint_pending(),
            hinted_letters: hinted.to_vec(),
            clue: self.session.clue().map(str::to_string),
            current_guess: self.picker.current_word(letters),
            selected: self.picker.selected().to_vec(),
            toast: self.toast.clone(),
            theme: self.settings.theme(),
            unlocked_themes: self.settings.unlocked().to_vec(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn ring(&self) -> &RingLayout {
        &self.ring
    }

    pub fn settings(&self) -> &Settings<S> {
        &self.settings
    }

    pub fn hints(&self) -> &P {
        &self.hints
    }

    pub fn hints_mut(&mut self) -> &mut P {
        &mut self.hints
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }
}

impl<P: HintProvider, S: KeyValueStore> Game for WordCircle<P, S> {
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        log::info!(
            "WordCircle initialized: {} levels, theme {}",
            self.levels.len(),
            self.settings.selected()
        );
        ctx.emit_event(GameEvent::new(
            GameEvent::LEVEL_STARTED,
            self.session.level_index() as f32,
            0.0,
        ));
        self.emit_coins(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        while let Some(reply) = self.hints.poll() {
            self.apply_hint_reply(ctx, reply);
        }

        for event in input.iter() {
            self.handle_input(ctx, event);
        }

        self.session.tick(dt);

        if let Some(toast) = &mut self.toast {
            if !toast.tick(dt) {
                self.toast = None;
                if let Some(next) = self.queued_toasts.pop_front() {
                    self.present(ctx, next);
                }
            }
        }

        if let Some(remaining) = &mut self.advance_timer {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.next_level(ctx);
            }
        }
    }
}
