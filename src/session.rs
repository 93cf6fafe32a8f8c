use crate::comparison::GuessComparison;
use crate::history::HistoryFeed;

pub const DEFAULT_REJECTION_MESSAGE: &str = "Team not recognized.";

/// Identifies one outgoing `/guess` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessTicket {
    pub seq: u64,
    pub guess: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted { solved: bool, attempts: u32 },
    Rejected { message: String },
    /// A newer guess or a reset was applied after this request went out.
    Stale,
}

/// Per-page game state: the history feed plus the bookkeeping that keeps
/// overlapping submissions from applying out of order.
///
/// Every submit and every reset takes a sequence number. A response is only
/// applied when its ticket is newer than anything already applied.
#[derive(Debug, Clone, Default)]
pub struct GuessSession {
    feed: HistoryFeed,
    attempts: u32,
    next_seq: u64,
    applied_seq: u64,
}

impl GuessSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&self) -> &HistoryFeed {
        &self.feed
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Trims the raw input and issues a ticket for it. Blank input issues
    /// nothing and no request should be sent.
    pub fn begin(&mut self, raw_input: &str) -> Option<GuessTicket> {
        let guess = raw_input.trim();
        if guess.is_empty() {
            return None;
        }
        Some(GuessTicket {
            seq: self.take_seq(),
            guess: guess.to_owned(),
        })
    }

    pub fn resolve(&mut self, ticket: &GuessTicket, data: &GuessComparison) -> SubmitOutcome {
        if ticket.seq <= self.applied_seq {
            return SubmitOutcome::Stale;
        }
        self.applied_seq = ticket.seq;

        if data.is_invalid() {
            let message = data
                .message
                .clone()
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_owned());
            return SubmitOutcome::Rejected { message };
        }

        self.feed.append(data);
        self.attempts = self.attempts.saturating_add(1);
        SubmitOutcome::Accepted {
            solved: data.is_correct(),
            attempts: self.attempts,
        }
    }

    /// Clears history and the attempt counter. Requests issued before the
    /// reset resolve as [`SubmitOutcome::Stale`].
    pub fn reset(&mut self) {
        self.applied_seq = self.take_seq();
        self.feed.clear();
        self.attempts = 0;
    }

    fn take_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}
