use hangman_types::{
    AddedHints, GuessOutcome, PhraseBank, RemovedHints, RoomId, RoundSnapshot, RoundStatus,
    ValidationFailure,
};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use tracing::info;

use crate::{Round, RoundEvent, RoundEventBus, RoundEventHandler, WordBank};

/// Hangman for every room: at most one running round per room, the
/// per-room on/off switch, and the shared word bank.
pub struct HangmanManager {
    rounds: HashMap<RoomId, Round>,
    disabled_rooms: HashSet<RoomId>,
    word_bank: WordBank,
    event_bus: RoundEventBus,
}

impl HangmanManager {
    pub fn new(word_bank: WordBank) -> Self {
        Self {
            rounds: HashMap::new(),
            disabled_rooms: HashSet::new(),
            word_bank,
            event_bus: RoundEventBus::new(),
        }
    }

    pub fn add_event_handler(&mut self, handler: Box<dyn RoundEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    pub fn word_bank(&self) -> &WordBank {
        &self.word_bank
    }

    pub fn active_round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_disabled(&self, room_id: &str) -> bool {
        self.disabled_rooms.contains(room_id)
    }

    pub fn snapshot(&self, room_id: &str) -> Option<RoundSnapshot> {
        self.rounds.get(room_id).map(Round::snapshot)
    }

    pub fn create_round(
        &mut self,
        room_id: &str,
        creator: &str,
        phrase: &str,
        hint: Option<&str>,
    ) -> Result<RoundSnapshot, ValidationFailure> {
        self.check_can_start(room_id)?;
        let round = Round::new(room_id, creator, phrase, hint)?;
        Ok(self.start(round, false))
    }

    /// Start a round from a phrase and hint drawn out of the room's bank.
    pub fn create_random_round<R: Rng + ?Sized>(
        &mut self,
        room_id: &str,
        creator: &str,
        rng: &mut R,
    ) -> Result<RoundSnapshot, ValidationFailure> {
        self.check_can_start(room_id)?;
        let drawn = self.word_bank.draw_random(room_id, rng)?;
        let round = Round::new(room_id, creator, &drawn.phrase, Some(&drawn.hint))?;
        Ok(self.start(round, true))
    }

    pub fn guess(
        &mut self,
        room_id: &str,
        actor: &str,
        text: &str,
    ) -> Result<GuessOutcome, ValidationFailure> {
        let round = self
            .rounds
            .get_mut(room_id)
            .ok_or_else(|| ValidationFailure::NoActiveRound {
                room_id: room_id.to_string(),
            })?;

        if round.creator() == actor {
            return Err(ValidationFailure::OwnRound);
        }

        let outcome = round.apply_guess(text, actor)?;
        let round_id = round.id();

        if let Some(record) = outcome.snapshot.last_guess() {
            self.event_bus.publish(RoundEvent::GuessApplied {
                room_id: room_id.to_string(),
                round_id,
                guesser: actor.to_string(),
                guess: record.text.clone(),
                kind: outcome.kind,
                hit: outcome.hit,
            });
        }

        match outcome.status {
            RoundStatus::Won => {
                info!("Hangman round {} in {} won by {}", round_id, room_id, actor);
                self.event_bus.publish(RoundEvent::RoundWon {
                    room_id: room_id.to_string(),
                    round_id,
                    winner: actor.to_string(),
                });
            }
            RoundStatus::Lost => {
                info!("Hangman round {} in {} lost", round_id, room_id);
                self.event_bus.publish(RoundEvent::RoundLost {
                    room_id: room_id.to_string(),
                    round_id,
                });
            }
            RoundStatus::Active | RoundStatus::Ended => {}
        }

        if outcome.status.is_terminal() {
            self.rounds.remove(room_id);
        }

        Ok(outcome)
    }

    /// Stop the room's round before it is decided.
    pub fn end_round(
        &mut self,
        room_id: &str,
        actor: &str,
    ) -> Result<RoundSnapshot, ValidationFailure> {
        let mut round =
            self.rounds
                .remove(room_id)
                .ok_or_else(|| ValidationFailure::NoActiveRound {
                    room_id: room_id.to_string(),
                })?;

        round.end(actor);
        info!("Hangman round {} in {} ended by {}", round.id(), room_id, actor);
        self.event_bus.publish(RoundEvent::RoundEnded {
            room_id: room_id.to_string(),
            round_id: round.id(),
            ended_by: actor.to_string(),
        });

        Ok(round.snapshot())
    }

    /// Stop new rounds from starting in a room. A running round is not affected.
    pub fn disable(&mut self, room_id: &str) -> Result<(), ValidationFailure> {
        if !self.disabled_rooms.insert(room_id.to_string()) {
            return Err(ValidationFailure::AlreadyDisabled {
                room_id: room_id.to_string(),
            });
        }
        info!("Hangman disabled in {}", room_id);
        Ok(())
    }

    pub fn enable(&mut self, room_id: &str) -> Result<(), ValidationFailure> {
        if !self.disabled_rooms.remove(room_id) {
            return Err(ValidationFailure::AlreadyEnabled {
                room_id: room_id.to_string(),
            });
        }
        info!("Hangman enabled in {}", room_id);
        Ok(())
    }

    pub fn terms(&self, room_id: &str) -> Option<&PhraseBank> {
        self.word_bank.terms(room_id)
    }

    pub fn add_hints<I, S>(
        &mut self,
        room_id: &str,
        phrase: &str,
        hints: I,
    ) -> Result<AddedHints, ValidationFailure>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let added = self.word_bank.add_hints(room_id, phrase, hints)?;
        self.event_bus.publish(RoundEvent::BankUpdated {
            room_id: room_id.to_string(),
            phrase: added.phrase.clone(),
        });
        Ok(added)
    }

    pub fn remove_hints<I, S>(
        &mut self,
        room_id: &str,
        phrase: &str,
        hints: I,
    ) -> Result<RemovedHints, ValidationFailure>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let removed = self.word_bank.remove_hints(room_id, phrase, hints)?;
        self.event_bus.publish(RoundEvent::BankUpdated {
            room_id: room_id.to_string(),
            phrase: removed.phrase.clone(),
        });
        Ok(removed)
    }

    fn check_can_start(&self, room_id: &str) -> Result<(), ValidationFailure> {
        if self.is_disabled(room_id) {
            return Err(ValidationFailure::HangmanDisabled {
                room_id: room_id.to_string(),
            });
        }
        if self.rounds.contains_key(room_id) {
            return Err(ValidationFailure::RoundInProgress {
                room_id: room_id.to_string(),
            });
        }
        Ok(())
    }

    fn start(&mut self, round: Round, random: bool) -> RoundSnapshot {
        let snapshot = round.snapshot();
        info!(
            "Hangman round {} started in {} by {}{}",
            snapshot.id,
            snapshot.room_id,
            snapshot.creator,
            if random { " (random)" } else { "" }
        );

        self.event_bus.publish(RoundEvent::RoundStarted {
            room_id: snapshot.room_id.clone(),
            round_id: snapshot.id,
            creator: snapshot.creator.clone(),
            random,
        });
        self.rounds.insert(snapshot.room_id.clone(), round);

        snapshot
    }
}
