use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{ActorId, RoomId, RoundId};

/// Number of missed guesses that ends a round as lost.
pub const MAX_MISTAKES: u32 = 6;

/// Marks a reveal slot whose letter has not been guessed yet.
pub const PLACEHOLDER: char = '_';

/// Stands in for a literal `_` inside a phrase so it never reads as an unrevealed slot.
pub const PLACEHOLDER_STAND_IN: char = '\u{FF3F}';

// Combining marks that may trail a letter after NFD decomposition.
const DIACRITIC_RANGES: &[(char, char)] = &[
    ('\u{0300}', '\u{036F}'),
    ('\u{0483}', '\u{0489}'),
    ('\u{0610}', '\u{0615}'),
    ('\u{064B}', '\u{065F}'),
    ('\u{0670}', '\u{0670}'),
    ('\u{06D6}', '\u{06DC}'),
    ('\u{06DF}', '\u{06ED}'),
    ('\u{0E31}', '\u{0E31}'),
    ('\u{0E34}', '\u{0E3A}'),
    ('\u{0E47}', '\u{0E4E}'),
];

fn is_diacritic(c: char) -> bool {
    DIACRITIC_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&c))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundStatus {
    Active,
    Won,   // Phrase fully revealed
    Lost,  // Mistake limit reached
    Ended, // Stopped by an actor before a result
}

impl RoundStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RoundStatus::Active)
    }
}

/// Mistakes made so far, or the sentinel for a solved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MistakeCount {
    Tally(u32),
    Solved,
}

impl MistakeCount {
    /// Numeric tally, `None` once the round is solved.
    pub fn tally(self) -> Option<u32> {
        match self {
            MistakeCount::Tally(count) => Some(count),
            MistakeCount::Solved => None,
        }
    }

    /// Index of the gallows drawing: one stage per mistake, and a final
    /// stage past the limit for a solved round.
    pub fn gallows_stage(self) -> u32 {
        match self {
            MistakeCount::Tally(count) => count.min(MAX_MISTAKES),
            MistakeCount::Solved => MAX_MISTAKES + 1,
        }
    }
}

impl Default for MistakeCount {
    fn default() -> Self {
        MistakeCount::Tally(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GuessKind {
    Letter,
    Phrase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessRecord {
    pub text: String, // Uppercase letter, or the sanitized phrase
    pub kind: GuessKind,
    pub hit: bool,
    pub guesser: ActorId,
    pub guessed_at: String, // ISO 8601 string
}

/// Read-only view of a round handed to presenters.
///
/// The secret phrase is only exposed through `solution` once the round is
/// won or lost, so an active snapshot can be shown to every guesser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundSnapshot {
    pub id: RoundId,
    pub room_id: RoomId,
    pub creator: ActorId,
    pub hint: Option<String>,
    pub revealed: String,
    pub guesses: Vec<GuessRecord>,
    pub mistakes: MistakeCount,
    pub status: RoundStatus,
    pub last_guesser: Option<ActorId>,
    pub solution: Option<String>,
    pub created_at: String, // ISO 8601 string
}

impl RoundSnapshot {
    pub fn letter_guesses(&self) -> impl Iterator<Item = &GuessRecord> {
        self.guesses.iter().filter(|g| g.kind == GuessKind::Letter)
    }

    pub fn last_guess(&self) -> Option<&GuessRecord> {
        self.guesses.last()
    }

    /// The reveal string with combining marks that trail an unrevealed slot
    /// removed, so an accent does not leak which letter is hidden.
    pub fn display_mask(&self) -> String {
        let mut output = String::with_capacity(self.revealed.len());
        let mut after_placeholder = false;

        for c in self.revealed.chars() {
            if is_diacritic(c) {
                if !after_placeholder {
                    output.push(c);
                }
                continue;
            }
            after_placeholder = c == PLACEHOLDER;
            output.push(c);
        }

        output
    }
}

/// Result of an accepted guess, enough for a presenter to redraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessOutcome {
    pub snapshot: RoundSnapshot,
    pub kind: GuessKind,
    pub hit: bool,
    pub status: RoundStatus,
}
