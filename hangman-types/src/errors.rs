use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::RoomId;

/// A recoverable problem with caller input. Returning one of these never
/// changes round or bank state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export)]
pub enum ValidationFailure {
    #[error(
        "Guess a single letter to guess a letter, or a phrase to guess the entire hangman phrase."
    )]
    EmptyGuess,
    #[error("Guesses must be 30 or fewer letters, \"{guess}\" is too long.")]
    GuessTooLong { guess: String },
    #[error("Each word in a guess must be 20 or fewer letters, \"{guess}\" is too long.")]
    GuessWordTooLong { guess: String },
    #[error("Your guess \"{guess}\" has already been guessed.")]
    AlreadyGuessed { guess: String },
    #[error("Your guess \"{guess}\" is not the same length as the hangman phrase.")]
    PhraseLengthMismatch { guess: String },
    #[error("This game of hangman is already over.")]
    RoundOver,
    #[error("You can't guess in your own hangman game.")]
    OwnRound,

    #[error("Enter a valid word.")]
    EmptyPhrase,
    #[error("Phrase must be 30 or fewer characters long.")]
    PhraseTooLong,
    #[error("Each word in the phrase must be 20 or fewer characters long.")]
    PhraseWordTooLong,
    #[error("Word must contain at least one letter.")]
    PhraseWithoutLetters,
    #[error("Hints must be 150 or fewer characters long.")]
    HintTooLong,
    #[error("At least one hint is required.")]
    MissingHints,

    #[error("The room {room_id} has no saved hangman words.")]
    NoSavedPhrases { room_id: RoomId },
    #[error("\"{phrase}\" is not a saved hangman.")]
    PhraseNotFound { phrase: String },

    #[error("There is already a game of hangman in progress in {room_id}.")]
    RoundInProgress { room_id: RoomId },
    #[error("There is no game of hangman running in {room_id}.")]
    NoActiveRound { room_id: RoomId },
    #[error("Hangman is disabled for {room_id}.")]
    HangmanDisabled { room_id: RoomId },
    #[error("Hangman is already disabled for {room_id}.")]
    AlreadyDisabled { room_id: RoomId },
    #[error("Hangman is already enabled for {room_id}.")]
    AlreadyEnabled { room_id: RoomId },
}

impl ValidationFailure {
    /// True for failures caused by something the caller asked for not existing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ValidationFailure::NoSavedPhrases { .. }
                | ValidationFailure::PhraseNotFound { .. }
                | ValidationFailure::NoActiveRound { .. }
        )
    }

    /// True for failures caused by the current room state rather than the input itself.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ValidationFailure::RoundInProgress { .. }
                | ValidationFailure::RoundOver
                | ValidationFailure::HangmanDisabled { .. }
                | ValidationFailure::AlreadyDisabled { .. }
                | ValidationFailure::AlreadyEnabled { .. }
        )
    }
}
