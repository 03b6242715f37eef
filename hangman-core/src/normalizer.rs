use hangman_types::{GuessKind, PLACEHOLDER, PLACEHOLDER_STAND_IN, ValidationFailure};
use unicode_normalization::UnicodeNormalization;

pub const MAX_GUESS_LENGTH: usize = 30;
pub const MAX_PHRASE_LENGTH: usize = 30;
pub const MAX_WORD_LENGTH: usize = 20;
pub const MAX_HINT_LENGTH: usize = 150;

/// A guess after sanitizing, tagged by how it is applied to a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedGuess {
    /// Uppercase ASCII letter
    Letter(char),
    /// Sanitized phrase, letters and spaces only
    Phrase(String),
}

impl NormalizedGuess {
    pub fn kind(&self) -> GuessKind {
        match self {
            NormalizedGuess::Letter(_) => GuessKind::Letter,
            NormalizedGuess::Phrase(_) => GuessKind::Phrase,
        }
    }

    /// Text recorded in the guess log
    pub fn log_text(&self) -> String {
        match self {
            NormalizedGuess::Letter(letter) => letter.to_string(),
            NormalizedGuess::Phrase(phrase) => phrase.clone(),
        }
    }
}

pub struct PhraseNormalizer;

impl PhraseNormalizer {
    /// Keep only ASCII letters and spaces, trimmed.
    pub fn sanitize_guess(raw: &str) -> String {
        let kept: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
            .collect();
        kept.trim().to_string()
    }

    /// Sanitize a raw guess and decide whether it is a letter or phrase guess.
    ///
    /// Length limits and the letter/phrase split apply to the trimmed text,
    /// so `" a"` is a letter guess.
    pub fn classify_guess(raw: &str) -> Result<NormalizedGuess, ValidationFailure> {
        let sanitized = Self::sanitize_guess(raw);
        if sanitized.is_empty() {
            return Err(ValidationFailure::EmptyGuess);
        }

        // Sanitized text is pure ASCII, so byte length is the letter count
        if sanitized.len() > MAX_GUESS_LENGTH {
            return Err(ValidationFailure::GuessTooLong {
                guess: raw.trim().to_string(),
            });
        }
        if sanitized.split(' ').any(|word| word.len() > MAX_WORD_LENGTH) {
            return Err(ValidationFailure::GuessWordTooLong {
                guess: raw.trim().to_string(),
            });
        }

        let mut chars = sanitized.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Ok(NormalizedGuess::Letter(letter.to_ascii_uppercase())),
            _ => Ok(NormalizedGuess::Phrase(sanitized)),
        }
    }

    /// Canonical identifier: accents split off and dropped, lowercased,
    /// everything but ASCII letters and digits removed.
    pub fn to_id(text: &str) -> String {
        text.trim()
            .nfd()
            .flat_map(char::to_lowercase)
            .filter(|c| c.is_ascii_alphanumeric())
            .collect()
    }

    pub fn same_id(a: &str, b: &str) -> bool {
        Self::to_id(a) == Self::to_id(b)
    }

    /// Validate a secret phrase and bring it to the stored form: trimmed,
    /// NFD-decomposed so accented letters are guessable by their base letter,
    /// with literal placeholders swapped for a look-alike.
    pub fn normalize_phrase(raw: &str) -> Result<String, ValidationFailure> {
        let phrase: String = raw
            .trim()
            .nfd()
            .map(|c| if c == PLACEHOLDER { PLACEHOLDER_STAND_IN } else { c })
            .collect();

        if phrase.is_empty() {
            return Err(ValidationFailure::EmptyPhrase);
        }
        if phrase.chars().count() > MAX_PHRASE_LENGTH {
            return Err(ValidationFailure::PhraseTooLong);
        }
        if phrase
            .split(' ')
            .any(|word| word.chars().count() > MAX_WORD_LENGTH)
        {
            return Err(ValidationFailure::PhraseWordTooLong);
        }
        if !phrase.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationFailure::PhraseWithoutLetters);
        }

        Ok(phrase)
    }

    /// Trimmed hint; blank means no hint.
    pub fn normalize_hint(raw: &str) -> Result<Option<String>, ValidationFailure> {
        let hint = raw.trim();
        if hint.is_empty() {
            return Ok(None);
        }
        if hint.chars().count() > MAX_HINT_LENGTH {
            return Err(ValidationFailure::HintTooLong);
        }
        Ok(Some(hint.to_string()))
    }

    /// Starting reveal mask: ASCII letters hidden, everything else shown.
    pub fn initial_mask(secret: &[char]) -> Vec<char> {
        secret
            .iter()
            .map(|&c| if c.is_ascii_alphabetic() { PLACEHOLDER } else { c })
            .collect()
    }
}
