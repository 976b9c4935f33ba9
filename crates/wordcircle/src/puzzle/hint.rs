// puzzle/hint.rs
//
// Contract between a session and whatever writes the hint text.
// The session reserves the cost and hands out a HintRequest; the provider
// answers later with a HintReply carrying the same ticket.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::rng::Rng;

/// Identifies one hint request. `generation` names the session that issued it,
/// so replies that outlive their session can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HintTicket {
    pub generation: u64,
    pub serial: u32,
}

/// Everything a provider needs to pick a word and describe it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HintRequest {
    pub ticket: HintTicket,
    pub letters: String,
    pub found_words: Vec<String>,
    pub all_words: Vec<String>,
}

impl HintRequest {
    /// Solutions the player has not found yet, in level order.
    pub fn unfound_words(&self) -> Vec<&str> {
        self.all_words
            .iter()
            .filter(|w| !self.found_words.contains(w))
            .map(String::as_str)
            .collect()
    }
}

/// A clue plus the solution word it describes.
/// The word never appears in the clue text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub clue: String,
    pub word: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HintError {
    #[error("no words left to hint")]
    NoWordsLeft,
    #[error("hint provider unavailable: {0}")]
    Unavailable(String),
    #[error("hint described an unexpected word: {0}")]
    UnexpectedWord(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HintReply {
    pub ticket: HintTicket,
    pub result: Result<Hint, HintError>,
}

/// Something that turns hint requests into replies, possibly much later.
pub trait HintProvider {
    /// Start working on a request. Must not block.
    fn request(&mut self, request: HintRequest);

    /// Collect one finished reply, if any. Providers that answer through
    /// `InputEvent::HintReply` instead can keep the default.
    fn poll(&mut self) -> Option<HintReply> {
        None
    }
}

/// Offline provider: picks an unfound word at random and describes only its
/// length. Replies are available on the next poll.
pub struct LengthHintProvider {
    rng: Rng,
    outbox: VecDeque<HintReply>,
}

impl LengthHintProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed),
            outbox: VecDeque::new(),
        }
    }
}

impl HintProvider for LengthHintProvider {
    fn request(&mut self, request: HintRequest) {
        let unfound = request.unfound_words();
        let result = match self.rng.choose(&unfound) {
            Some(word) => Ok(Hint {
                clue: format!("Look for a {}-letter word.", word.len()),
                word: (*word).to_string(),
            }),
            None => Err(HintError::NoWordsLeft),
        };
        self.outbox.push_back(HintReply {
            ticket: request.ticket,
            result,
        });
    }

    fn poll(&mut self) -> Option<HintReply> {
        self.outbox.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(found: &[&str]) -> HintRequest {
        HintRequest {
            ticket: HintTicket { generation: 1, serial: 1 },
            letters: "AET".into(),
            found_words: found.iter().map(|w| w.to_string()).collect(),
            all_words: vec!["ATE".into(), "EAT".into(), "TEA".into()],
        }
    }

    #[test]
    fn unfound_words_skip_found_ones() {
        let req = request(&["EAT"]);
        assert_eq!(req.unfound_words(), vec!["ATE", "TEA"]);
    }

    #[test]
    fn length_provider_picks_unfound_word() {
        let mut provider = LengthHintProvider::new(5);
        provider.request(request(&["ATE", "TEA"]));
        let reply = provider.poll().unwrap();
        assert_eq!(reply.ticket, HintTicket { generation: 1, serial: 1 });
        let hint = reply.result.unwrap();
        assert_eq!(hint.word, "EAT");
        assert!(!hint.clue.contains("EAT"));
        assert!(hint.clue.contains("3-letter"));
        assert!(provider.poll().is_none());
    }

    #[test]
    fn length_provider_declines_when_all_found() {
        let mut provider = LengthHintProvider::new(5);
        provider.request(request(&["ATE", "EAT", "TEA"]));
        let reply = provider.poll().unwrap();
        assert_eq!(reply.result, Err(HintError::NoWordsLeft));
    }

    #[test]
    fn request_serializes_camel_case() {
        let json = serde_json::to_string(&request(&[])).unwrap();
        assert!(json.contains("\"foundWords\":[]"));
        assert!(json.contains("\"generation\":1"));
    }
}
