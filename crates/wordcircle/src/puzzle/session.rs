use serde::Serialize;

use crate::core::rng::Rng;
use crate::core::time::SecondClock;
use super::economy::Economy;
use super::error::Rejection;
use super::hint::{HintError, HintReply, HintRequest, HintTicket};
use super::level::Level;

/// Session phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    InProgress,
    Complete,
}

/// A word added to the session, successful submit or skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    pub word: String,
    pub coins_earned: u32,
    /// This word finished the level.
    pub completed: bool,
}

/// What an undo took back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undone {
    pub word: String,
    pub coins_taken: u32,
    /// The level went from Complete back to InProgress.
    pub reopened: bool,
}

/// How a hint reply was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    Applied { word: String, clue: String },
    /// The provider failed; the cost went back to the player.
    Refunded(HintError),
    /// The reply belongs to another session or request and was dropped.
    Stale,
}

#[derive(Debug, Clone)]
struct FoundEntry {
    word: String,
    credited: u32,
}

#[derive(Debug, Clone)]
struct HintGlow {
    letters: Vec<char>,
    remaining: f32,
}

/// Play-through state for one attempt at one level.
///
/// Every operation either succeeds or returns a `Rejection` without touching
/// state. Found words stay a duplicate-free subset of the level's solutions
/// and coins never go below zero.
#[derive(Debug, Clone)]
pub struct Session {
    level: Level,
    level_index: usize,
    generation: u64,
    economy: Economy,
    letters: Vec<char>,
    found: Vec<FoundEntry>,
    coins: u32,
    elapsed_secs: u32,
    status: Status,
    skip_cost: u32,
    clock: SecondClock,
    pending_hint: Option<HintTicket>,
    hint_serial: u32,
    glow: Option<HintGlow>,
    clue: Option<String>,
    bonus_credited: u32,
}

impl Session {
    /// Start a level. The ring letters are shuffled with `rng`.
    pub fn new(
        level: Level,
        level_index: usize,
        generation: u64,
        coins: u32,
        economy: Economy,
        rng: &mut Rng,
    ) -> Self {
        let mut letters: Vec<char> = level.letters.chars().collect();
        rng.shuffle(&mut letters);
        let skip_cost = economy.initial_skip_cost;
        Self {
            level,
            level_index,
            generation,
            economy,
            letters,
            found: Vec::new(),
            coins,
            elapsed_secs: 0,
            status: Status::InProgress,
            skip_cost,
            clock: SecondClock::running(),
            pending_hint: None,
            hint_serial: 0,
            glow: None,
            clue: None,
            bonus_credited: 0,
        }
    }

    /// Submit a guessed word.
    pub fn submit(&mut self, word: &str) -> Result<Found, Rejection> {
        let word = word.to_uppercase();
        if self.is_found(&word) {
            return Err(Rejection::AlreadyFound);
        }
        if !self.level.contains(&word) {
            return Err(Rejection::NotAWord);
        }
        let reward = self.economy.word_reward(&word);
        let completed = self.record(word.clone(), reward);
        Ok(Found {
            word,
            coins_earned: reward,
            completed,
        })
    }

    /// Buy a random unfound word. Each skip in a level costs more than the last.
    pub fn skip(&mut self, rng: &mut Rng) -> Result<Found, Rejection> {
        if self.is_complete() {
            return Err(Rejection::LevelComplete);
        }
        self.afford(self.skip_cost)?;

        let unfound = self.unfound_words();
        let Some(word) = rng.choose(&unfound).map(|w| w.to_string()) else {
            return Err(Rejection::LevelComplete);
        };

        self.coins -= self.skip_cost;
        self.skip_cost += self.economy.skip_cost_increment;
        let completed = self.record(word.clone(), 0);
        Ok(Found {
            word,
            coins_earned: 0,
            completed,
        })
    }

    /// Take back the most recent word and the coins it earned.
    pub fn undo(&mut self) -> Result<Undone, Rejection> {
        let entry = self.found.pop().ok_or(Rejection::NothingToUndo)?;
        let mut taken = entry.credited;
        let reopened = self.status == Status::Complete;
        if reopened {
            self.status = Status::InProgress;
            self.clock.resume();
            taken += std::mem::take(&mut self.bonus_credited);
        }
        let taken = taken.min(self.coins);
        self.coins -= taken;
        Ok(Undone {
            word: entry.word,
            coins_taken: taken,
            reopened,
        })
    }

    /// Reserve the hint cost and describe what the provider should work on.
    /// Pair with `finish_hint` once the provider answers.
    pub fn begin_hint(&mut self) -> Result<HintRequest, Rejection> {
        if self.is_complete() {
            return Err(Rejection::LevelComplete);
        }
        if self.pending_hint.is_some() {
            return Err(Rejection::HintPending);
        }
        self.afford(self.economy.hint_cost)?;

        self.coins -= self.economy.hint_cost;
        self.hint_serial += 1;
        let ticket = HintTicket {
            generation: self.generation,
            serial: self.hint_serial,
        };
        self.pending_hint = Some(ticket);
        Ok(HintRequest {
            ticket,
            letters: self.level.letters.clone(),
            found_words: self.found.iter().map(|e| e.word.clone()).collect(),
            all_words: self.level.words.clone(),
        })
    }

    /// Commit or compensate a hint reserved with `begin_hint`.
    pub fn finish_hint(&mut self, reply: HintReply) -> HintOutcome {
        if reply.ticket.generation != self.generation || self.pending_hint != Some(reply.ticket) {
            return HintOutcome::Stale;
        }
        self.pending_hint = None;

        let error = match reply.result {
            Ok(hint) if self.level.contains(&hint.word) && !self.is_found(&hint.word) => {
                let mut letters: Vec<char> = Vec::new();
                for c in hint.word.chars() {
                    if !letters.contains(&c) {
                        letters.push(c);
                    }
                }
                self.glow = Some(HintGlow {
                    letters,
                    remaining: self.economy.hint_glow_secs,
                });
                self.clue = Some(hint.clue.clone());
                return HintOutcome::Applied {
                    word: hint.word,
                    clue: hint.clue,
                };
            }
            Ok(hint) => HintError::UnexpectedWord(hint.word),
            Err(err) => err,
        };

        self.coins += self.economy.hint_cost;
        HintOutcome::Refunded(error)
    }

    /// Advance timers by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let secs = self.clock.advance(dt);
        if self.status == Status::InProgress {
            self.elapsed_secs += secs;
        }
        if let Some(glow) = &mut self.glow {
            glow.remaining -= dt;
            if glow.remaining <= 0.0 {
                self.glow = None;
            }
        }
    }

    /// Flip to Complete if every word is found. Returns true only on the
    /// transition itself, so side effects keyed on it run once.
    pub fn check_completion(&mut self) -> bool {
        if self.status == Status::Complete || self.found.len() < self.level.words.len() {
            return false;
        }
        self.status = Status::Complete;
        self.clock.pause();
        self.bonus_credited = self.economy.level_complete_bonus;
        self.coins += self.bonus_credited;
        true
    }

    fn record(&mut self, word: String, credited: u32) -> bool {
        self.found.push(FoundEntry { word, credited });
        self.coins += credited;
        self.check_completion()
    }

    fn afford(&self, cost: u32) -> Result<(), Rejection> {
        if self.coins < cost {
            Err(Rejection::InsufficientCoins {
                needed: cost,
                available: self.coins,
            })
        } else {
            Ok(())
        }
    }

    fn unfound_words(&self) -> Vec<&str> {
        self.level
            .words
            .iter()
            .filter(|w| !self.is_found(w))
            .map(String::as_str)
            .collect()
    }

    pub fn is_found(&self, word: &str) -> bool {
        self.found.iter().any(|e| e.word == word)
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Shuffled ring letters in tile order.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Found words, oldest first.
    pub fn found_words(&self) -> Vec<&str> {
        self.found.iter().map(|e| e.word.as_str()).collect()
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == Status::Complete
    }

    pub fn skip_cost(&self) -> u32 {
        self.skip_cost
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    /// Letters of the last hinted word while the highlight lasts.
    pub fn hinted_letters(&self) -> &[char] {
        match &self.glow {
            Some(glow) => &glow.letters,
            None => &[],
        }
    }

    pub fn clue(&self) -> Option<&str> {
        self.clue.as_deref()
    }

    pub fn hint_pending(&self) -> bool {
        self.pending_hint.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::hint::Hint;

    fn aet_session(coins: u32) -> Session {
        let mut rng = Rng::new(1);
        Session::new(
            Level::new("AET", &["ATE", "EAT", "TEA"]),
            0,
            1,
            coins,
            Economy::default(),
            &mut rng,
        )
    }

    fn ok_reply(ticket: HintTicket, word: &str) -> HintReply {
        HintReply {
            ticket,
            result: Ok(Hint {
                clue: "Had dinner".into(),
                word: word.into(),
            }),
        }
    }

    #[test]
    fn letters_are_a_permutation() {
        let session = aet_session(100);
        let mut letters = session.letters().to_vec();
        letters.sort_unstable();
        assert_eq!(letters, vec!['A', 'E', 'T']);
    }

    #[test]
    fn full_level_walkthrough() {
        let mut s = aet_session(100);

        let found = s.submit("ATE").unwrap();
        assert_eq!(found.coins_earned, 30);
        assert_eq!(s.coins(), 130);
        assert_eq!(s.found_words(), vec!["ATE"]);

        assert_eq!(s.submit("ATE"), Err(Rejection::AlreadyFound));
        assert_eq!(s.coins(), 130);

        s.submit("TEA").unwrap();
        assert_eq!(s.coins(), 160);
        assert_eq!(s.found_words(), vec!["ATE", "TEA"]);

        s.tick(2.0);
        let found = s.submit("EAT").unwrap();
        assert!(found.completed);
        assert_eq!(s.coins(), 190);
        assert_eq!(s.status(), Status::Complete);

        s.tick(5.0);
        assert_eq!(s.elapsed_secs(), 2);
    }

    #[test]
    fn submit_is_case_insensitive() {
        let mut s = aet_session(0);
        assert_eq!(s.submit("tea").unwrap().word, "TEA");
    }

    #[test]
    fn wrong_word_changes_nothing() {
        let mut s = aet_session(100);
        assert_eq!(s.submit("TAE"), Err(Rejection::NotAWord));
        assert_eq!(s.coins(), 100);
        assert!(s.found_words().is_empty());
    }

    #[test]
    fn undo_reverses_submit_exactly() {
        for word in ["ATE", "EAT", "TEA"] {
            let mut s = aet_session(100);
            s.submit("TEA").ok();
            let coins = s.coins();
            let found = s.found_words().iter().map(|w| w.to_string()).collect::<Vec<_>>();
            if s.submit(word).is_ok() {
                s.undo().unwrap();
            }
            assert_eq!(s.coins(), coins);
            assert_eq!(s.found_words(), found);
        }
    }

    #[test]
    fn undo_on_empty_is_rejected() {
        let mut s = aet_session(100);
        assert_eq!(s.undo(), Err(Rejection::NothingToUndo));
    }

    #[test]
    fn undo_reopens_completed_level_and_resumes_timer() {
        let mut s = aet_session(100);
        for w in ["ATE", "EAT", "TEA"] {
            s.submit(w).unwrap();
        }
        assert!(s.is_complete());
        s.tick(3.0);
        assert_eq!(s.elapsed_secs(), 0);

        let undone = s.undo().unwrap();
        assert!(undone.reopened);
        assert_eq!(undone.word, "TEA");
        assert_eq!(s.status(), Status::InProgress);
        s.tick(1.0);
        assert_eq!(s.elapsed_secs(), 1);
    }

    #[test]
    fn completion_fires_once() {
        let mut s = aet_session(0);
        s.submit("ATE").unwrap();
        s.submit("EAT").unwrap();
        assert!(!s.check_completion());
        assert!(s.submit("TEA").unwrap().completed);
        assert!(!s.check_completion());
        assert!(!s.check_completion());
    }

    #[test]
    fn completion_bonus_is_taken_back_on_undo() {
        let mut rng = Rng::new(1);
        let economy = Economy {
            level_complete_bonus: 50,
            ..Economy::default()
        };
        let mut s = Session::new(Level::new("AET", &["ATE"]), 0, 1, 0, economy, &mut rng);
        s.submit("ATE").unwrap();
        assert_eq!(s.coins(), 80);
        s.undo().unwrap();
        assert_eq!(s.coins(), 0);
    }

    #[test]
    fn skip_cost_escalates() {
        let mut rng = Rng::new(9);
        let mut s = aet_session(100);
        assert_eq!(s.skip_cost(), 10);
        s.skip(&mut rng).unwrap();
        assert_eq!(s.coins(), 90);
        assert_eq!(s.skip_cost(), 15);
        s.skip(&mut rng).unwrap();
        assert_eq!(s.coins(), 75);
        assert_eq!(s.skip_cost(), 20);
        assert_eq!(s.found_words().len(), 2);
    }

    #[test]
    fn skip_refused_when_broke_or_complete() {
        let mut rng = Rng::new(9);
        let mut s = aet_session(5);
        assert_eq!(
            s.skip(&mut rng),
            Err(Rejection::InsufficientCoins { needed: 10, available: 5 })
        );
        assert_eq!(s.skip_cost(), 10);

        let mut s = aet_session(1000);
        for _ in 0..3 {
            s.skip(&mut rng).unwrap();
        }
        assert!(s.is_complete());
        assert_eq!(s.skip(&mut rng), Err(Rejection::LevelComplete));
    }

    #[test]
    fn undo_after_skip_returns_no_coins() {
        let mut rng = Rng::new(9);
        let mut s = aet_session(100);
        s.skip(&mut rng).unwrap();
        let undone = s.undo().unwrap();
        assert_eq!(undone.coins_taken, 0);
        assert_eq!(s.coins(), 90);
        assert_eq!(s.skip_cost(), 15);
    }

    #[test]
    fn hint_rejected_when_broke() {
        let mut s = aet_session(5);
        assert_eq!(
            s.begin_hint(),
            Err(Rejection::InsufficientCoins { needed: 50, available: 5 })
        );
        assert_eq!(s.coins(), 5);
        assert!(!s.hint_pending());
    }

    #[test]
    fn hint_refused_on_completed_level() {
        let mut s = aet_session(100);
        for w in ["ATE", "EAT", "TEA"] {
            s.submit(w).unwrap();
        }
        let coins = s.coins();
        assert_eq!(s.begin_hint(), Err(Rejection::LevelComplete));
        assert_eq!(s.coins(), coins);
        assert!(!s.hint_pending());
    }

    #[test]
    fn hint_debits_then_applies() {
        let mut s = aet_session(100);
        let request = s.begin_hint().unwrap();
        assert_eq!(s.coins(), 50);
        assert_eq!(request.all_words.len(), 3);
        assert_eq!(s.begin_hint(), Err(Rejection::HintPending));

        let outcome = s.finish_hint(ok_reply(request.ticket, "EAT"));
        assert!(matches!(outcome, HintOutcome::Applied { .. }));
        assert_eq!(s.coins(), 50);
        assert_eq!(s.hinted_letters(), &['E', 'A', 'T']);
        assert_eq!(s.clue(), Some("Had dinner"));
        assert!(!s.hint_pending());

        s.tick(5.0);
        assert!(s.hinted_letters().is_empty());
    }

    #[test]
    fn hint_failure_refunds() {
        let mut s = aet_session(100);
        let request = s.begin_hint().unwrap();
        let outcome = s.finish_hint(HintReply {
            ticket: request.ticket,
            result: Err(HintError::Unavailable("timeout".into())),
        });
        assert!(matches!(outcome, HintOutcome::Refunded(_)));
        assert_eq!(s.coins(), 100);
        assert!(!s.hint_pending());
    }

    #[test]
    fn hint_naming_found_word_refunds() {
        let mut s = aet_session(100);
        s.submit("EAT").unwrap();
        let request = s.begin_hint().unwrap();
        let outcome = s.finish_hint(ok_reply(request.ticket, "EAT"));
        assert_eq!(outcome, HintOutcome::Refunded(HintError::UnexpectedWord("EAT".into())));
        assert_eq!(s.coins(), 130);
    }

    #[test]
    fn stale_hint_is_ignored() {
        let mut s = aet_session(100);
        let request = s.begin_hint().unwrap();
        let stale = HintTicket {
            generation: request.ticket.generation + 1,
            serial: request.ticket.serial,
        };
        assert_eq!(s.finish_hint(ok_reply(stale, "EAT")), HintOutcome::Stale);
        assert!(s.hint_pending());
        assert_eq!(s.coins(), 50);
    }

    #[test]
    fn other_actions_allowed_while_hint_pending() {
        let mut rng = Rng::new(4);
        let mut s = aet_session(100);
        s.begin_hint().unwrap();
        s.submit("ATE").unwrap();
        s.skip(&mut rng).unwrap();
        s.undo().unwrap();
        assert!(s.hint_pending());
    }

    #[test]
    fn random_action_sequences_keep_invariants() {
        let mut rng = Rng::new(2024);
        let guesses = ["ATE", "EAT", "TEA", "TAE", "AT", "ate"];
        for seed in 0..50 {
            let mut s = aet_session(60 + seed);
            let mut last_skip_cost = s.skip_cost();
            for _ in 0..40 {
                match rng.next_index(3) {
                    0 => {
                        let guess = *rng.choose(&guesses).unwrap();
                        s.submit(guess).ok();
                    }
                    1 => {
                        s.skip(&mut rng).ok();
                    }
                    _ => {
                        s.undo().ok();
                    }
                }
                let found = s.found_words();
                assert!(found.iter().all(|w| s.level().contains(w)));
                let mut unique = found.clone();
                unique.sort_unstable();
                unique.dedup();
                assert_eq!(unique.len(), found.len());
                assert_eq!(s.is_complete(), found.len() == 3);
                assert!(s.skip_cost() >= last_skip_cost);
                last_skip_cost = s.skip_cost();
            }
        }
    }
}
