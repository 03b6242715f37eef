use hangman_types::{
    ActorId, GuessKind, GuessOutcome, GuessRecord, MAX_MISTAKES, MistakeCount, PLACEHOLDER,
    RoomId, RoundId, RoundSnapshot, RoundStatus, ValidationFailure,
};
use tracing::debug;
use uuid::Uuid;

use crate::normalizer::{NormalizedGuess, PhraseNormalizer};

/// One game of hangman over a single secret phrase.
#[derive(Debug, Clone)]
pub struct Round {
    id: RoundId,
    room_id: RoomId,
    creator: ActorId,
    secret: Vec<char>, // Hidden from snapshots until the round is decided
    hint: Option<String>,
    revealed: Vec<char>,
    guesses: Vec<GuessRecord>,
    mistakes: MistakeCount,
    status: RoundStatus,
    last_guesser: Option<ActorId>,
    ended_by: Option<ActorId>,
    created_at: String,
}

impl Round {
    /// Start a round, validating the phrase and hint first.
    pub fn new(
        room_id: impl Into<RoomId>,
        creator: impl Into<ActorId>,
        phrase: &str,
        hint: Option<&str>,
    ) -> Result<Self, ValidationFailure> {
        let phrase = PhraseNormalizer::normalize_phrase(phrase)?;
        let hint = match hint {
            Some(hint) => PhraseNormalizer::normalize_hint(hint)?,
            None => None,
        };

        let secret: Vec<char> = phrase.chars().collect();
        let revealed = PhraseNormalizer::initial_mask(&secret);

        Ok(Self {
            id: Uuid::new_v4(),
            room_id: room_id.into(),
            creator: creator.into(),
            secret,
            hint,
            revealed,
            guesses: Vec::new(),
            mistakes: MistakeCount::default(),
            status: RoundStatus::Active,
            last_guesser: None,
            ended_by: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == RoundStatus::Active
    }

    pub fn mistakes(&self) -> MistakeCount {
        self.mistakes
    }

    pub fn revealed(&self) -> String {
        self.revealed.iter().collect()
    }

    pub fn guesses(&self) -> &[GuessRecord] {
        &self.guesses
    }

    pub fn last_guesser(&self) -> Option<&str> {
        self.last_guesser.as_deref()
    }

    pub fn ended_by(&self) -> Option<&str> {
        self.ended_by.as_deref()
    }

    /// Apply one guess. Invalid or repeated guesses are rejected without
    /// touching the round.
    pub fn apply_guess(
        &mut self,
        raw: &str,
        guesser: impl Into<ActorId>,
    ) -> Result<GuessOutcome, ValidationFailure> {
        let guess = PhraseNormalizer::classify_guess(raw)?;
        let log_text = guess.log_text();

        let guess_id = PhraseNormalizer::to_id(&log_text);
        if self
            .guesses
            .iter()
            .any(|g| PhraseNormalizer::to_id(&g.text) == guess_id)
        {
            return Err(ValidationFailure::AlreadyGuessed { guess: log_text });
        }

        if !self.is_active() {
            return Err(ValidationFailure::RoundOver);
        }

        let hit = match &guess {
            NormalizedGuess::Letter(letter) => self.reveal_letter(*letter),
            NormalizedGuess::Phrase(phrase) => self.check_phrase(phrase)?,
        };

        if hit {
            if !self.revealed.contains(&PLACEHOLDER) {
                self.status = RoundStatus::Won;
                self.mistakes = MistakeCount::Solved;
            }
        } else {
            self.record_mistake();
        }

        let guesser = guesser.into();
        debug!(
            "Guess {:?} by {} in {}: hit={}, status={:?}",
            log_text, guesser, self.room_id, hit, self.status
        );

        self.guesses.push(GuessRecord {
            text: log_text,
            kind: guess.kind(),
            hit,
            guesser: guesser.clone(),
            guessed_at: chrono::Utc::now().to_rfc3339(),
        });
        self.last_guesser = Some(guesser);

        Ok(GuessOutcome {
            snapshot: self.snapshot(),
            kind: guess.kind(),
            hit,
            status: self.status,
        })
    }

    /// Stop the round. Rounds that already finished keep their result.
    pub fn end(&mut self, actor: impl Into<ActorId>) -> RoundStatus {
        if self.is_active() {
            self.status = RoundStatus::Ended;
            self.ended_by = Some(actor.into());
        }
        self.status
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let solution = match self.status {
            RoundStatus::Won | RoundStatus::Lost => Some(self.secret.iter().collect()),
            RoundStatus::Active | RoundStatus::Ended => None,
        };

        RoundSnapshot {
            id: self.id,
            room_id: self.room_id.clone(),
            creator: self.creator.clone(),
            hint: self.hint.clone(),
            revealed: self.revealed(),
            guesses: self.guesses.clone(),
            mistakes: self.mistakes,
            status: self.status,
            last_guesser: self.last_guesser.clone(),
            solution,
            created_at: self.created_at.clone(),
        }
    }

    // Reveal every position holding the letter, in its original case.
    fn reveal_letter(&mut self, letter: char) -> bool {
        let mut hit = false;
        for (slot, &original) in self.revealed.iter_mut().zip(&self.secret) {
            if original.to_ascii_uppercase() == letter {
                *slot = original;
                hit = true;
            }
        }
        hit
    }

    // A phrase guess either solves the round, misses, or is rejected when it
    // cannot possibly be the phrase.
    fn check_phrase(&mut self, phrase: &str) -> Result<bool, ValidationFailure> {
        let secret: String = self.secret.iter().collect();
        let secret_id = PhraseNormalizer::to_id(&secret);
        let guess_id = PhraseNormalizer::to_id(phrase);

        if guess_id == secret_id {
            self.revealed.clone_from(&self.secret);
            return Ok(true);
        }
        if guess_id.len() != secret_id.len() {
            return Err(ValidationFailure::PhraseLengthMismatch {
                guess: phrase.to_string(),
            });
        }
        Ok(false)
    }

    fn record_mistake(&mut self) {
        let count = match self.mistakes {
            MistakeCount::Tally(count) => count + 1,
            MistakeCount::Solved => return,
        };
        self.mistakes = MistakeCount::Tally(count);
        if count >= MAX_MISTAKES {
            self.status = RoundStatus::Lost;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_with(phrase: &str) -> Round {
        Round::new("lobby", "host", phrase, None).unwrap()
    }

    #[test]
    fn test_round_creation() {
        let round = Round::new("lobby", "host", "Pik achu!", Some(" electric ")).unwrap();
        assert_eq!(round.status(), RoundStatus::Active);
        assert_eq!(round.mistakes(), MistakeCount::Tally(0));
        assert_eq!(round.revealed(), "___ ____!");
        assert_eq!(round.snapshot().hint.as_deref(), Some("electric"));
        assert!(round.guesses().is_empty());
    }

    #[test]
    fn test_round_creation_rejects_bad_phrase() {
        assert_eq!(
            Round::new("lobby", "host", "!!!", None).unwrap_err(),
            ValidationFailure::PhraseWithoutLetters
        );
        assert_eq!(
            Round::new("lobby", "host", "cat", Some("x".repeat(200).as_str())).unwrap_err(),
            ValidationFailure::HintTooLong
        );
    }

    #[test]
    fn test_letter_hit_reveals_every_position() {
        let mut round = round_with("Pik achu!");
        let outcome = round.apply_guess("a", "alice").unwrap();
        assert!(outcome.hit);
        assert_eq!(outcome.kind, GuessKind::Letter);
        assert_eq!(outcome.snapshot.revealed, "___ a___!");

        let outcome = round.apply_guess("p", "bob").unwrap();
        assert_eq!(outcome.snapshot.revealed, "P__ a___!");
        assert_eq!(round.last_guesser(), Some("bob"));
    }

    #[test]
    fn test_letter_miss_counts_mistake() {
        let mut round = round_with("cat");
        let outcome = round.apply_guess("z", "alice").unwrap();
        assert!(!outcome.hit);
        assert_eq!(round.mistakes(), MistakeCount::Tally(1));
        assert_eq!(round.guesses()[0].text, "Z");
        assert!(!round.guesses()[0].hit);
    }

    #[test]
    fn test_phrase_solves_round() {
        let mut round = round_with("Mr. Mime");
        let outcome = round.apply_guess("mr mime", "alice").unwrap();
        assert!(outcome.hit);
        assert_eq!(outcome.kind, GuessKind::Phrase);
        assert_eq!(outcome.status, RoundStatus::Won);
        assert_eq!(outcome.snapshot.revealed, "Mr. Mime");
        assert_eq!(outcome.snapshot.solution.as_deref(), Some("Mr. Mime"));
        assert_eq!(round.mistakes(), MistakeCount::Solved);
    }

    #[test]
    fn test_accented_letter_revealed_by_base_letter() {
        let mut round = round_with("Pokémon");
        assert_eq!(round.revealed(), "____\u{0301}___");
        round.apply_guess("e", "alice").unwrap();
        assert_eq!(round.revealed(), "___e\u{0301}___");
    }

    #[test]
    fn test_duplicate_letter_rejected_case_insensitively() {
        let mut round = round_with("cat");
        round.apply_guess("c", "alice").unwrap();
        let result = round.apply_guess("C", "bob");
        assert_eq!(
            result.unwrap_err(),
            ValidationFailure::AlreadyGuessed {
                guess: "C".to_string()
            }
        );
        assert_eq!(round.guesses().len(), 1);
    }

    #[test]
    fn test_phrase_length_mismatch_rejected() {
        let mut round = round_with("cat");
        let result = round.apply_guess("elephant", "alice");
        assert!(matches!(
            result,
            Err(ValidationFailure::PhraseLengthMismatch { .. })
        ));
        assert_eq!(round.mistakes(), MistakeCount::Tally(0));
        assert!(round.guesses().is_empty());
    }

    #[test]
    fn test_end_is_idempotent_and_keeps_results() {
        let mut round = round_with("cat");
        assert_eq!(round.end("mod"), RoundStatus::Ended);
        assert_eq!(round.end("other"), RoundStatus::Ended);
        assert_eq!(round.ended_by(), Some("mod"));

        let mut won = round_with("ox");
        won.apply_guess("ox", "alice").unwrap();
        assert_eq!(won.end("mod"), RoundStatus::Won);
        assert_eq!(won.ended_by(), None);
    }

    #[test]
    fn test_guess_after_end_rejected() {
        let mut round = round_with("cat");
        round.end("mod");
        assert_eq!(
            round.apply_guess("c", "alice").unwrap_err(),
            ValidationFailure::RoundOver
        );
        assert!(round.guesses().is_empty());
    }

    #[test]
    fn test_snapshot_hides_secret_while_active() {
        let round = round_with("cat");
        let snapshot = round.snapshot();
        assert_eq!(snapshot.solution, None);
        assert_eq!(snapshot.revealed, "___");
    }

    #[test]
    fn test_placeholder_in_phrase_is_not_a_hidden_slot() {
        let mut round = round_with("a_b");
        round.apply_guess("a", "alice").unwrap();
        let outcome = round.apply_guess("b", "alice").unwrap();
        assert_eq!(outcome.status, RoundStatus::Won);
    }
}
