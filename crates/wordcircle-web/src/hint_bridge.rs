// hint_bridge.rs
//
// Hints come from a text-generation service the page talks to. Rust parks
// the request here, JS picks it up as JSON after a HINT_REQUESTED event and
// answers through game_hint_resolved / game_hint_failed, echoing the
// request's ticket. The session drops answers whose ticket is not its own.

use serde::Deserialize;
use wordcircle::{Hint, HintError, HintProvider, HintReply, HintRequest, HintTicket};

/// Shape of a service answer, with the ticket copied from the request.
#[derive(Debug, Deserialize)]
struct HintAnswer {
    ticket: HintTicket,
    clue: String,
    word: String,
}

/// Fallback read of an answer that is otherwise unusable.
#[derive(Debug, Deserialize)]
struct TicketOnly {
    ticket: HintTicket,
}

#[derive(Default)]
pub struct JsHintBridge {
    outbox: Option<HintRequest>,
}

impl JsHintBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand the parked request to JS, once.
    pub fn take_request(&mut self) -> Option<HintRequest> {
        self.outbox.take()
    }

    /// Turn a service answer into a reply. An answer that carries its ticket
    /// but is otherwise unreadable fails that ticket, so its cost is refunded.
    /// Answers without a ticket cannot be matched to a request and are dropped.
    pub fn resolve_json(&mut self, json: &str) -> Option<HintReply> {
        match serde_json::from_str::<HintAnswer>(json) {
            Ok(answer) => Some(HintReply {
                ticket: answer.ticket,
                result: Ok(Hint {
                    clue: answer.clue.trim().to_string(),
                    word: answer.word.trim().to_uppercase(),
                }),
            }),
            Err(err) => match serde_json::from_str::<TicketOnly>(json) {
                Ok(TicketOnly { ticket }) => {
                    log::warn!("unreadable hint answer: {err}");
                    Some(HintReply {
                        ticket,
                        result: Err(HintError::Unavailable(format!("unreadable answer: {err}"))),
                    })
                }
                Err(_) => {
                    log::warn!("dropping hint answer without a ticket: {err}");
                    None
                }
            },
        }
    }

    /// Fail the request named by `ticket_json` (the request's `ticket` object).
    pub fn fail_json(&mut self, ticket_json: &str, reason: &str) -> Option<HintReply> {
        match serde_json::from_str::<HintTicket>(ticket_json) {
            Ok(ticket) => Some(HintReply {
                ticket,
                result: Err(HintError::Unavailable(reason.to_string())),
            }),
            Err(err) => {
                log::warn!("dropping hint failure with unreadable ticket: {err}");
                None
            }
        }
    }
}

impl HintProvider for JsHintBridge {
    fn request(&mut self, request: HintRequest) {
        if let Some(prev) = self.outbox.replace(request) {
            log::debug!(
                "superseding unread hint request {}/{}",
                prev.ticket.generation,
                prev.ticket.serial
            );
        }
    }
}
