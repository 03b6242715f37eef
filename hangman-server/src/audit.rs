use hangman_core::{RoundEvent, RoundEventHandler};
use tracing::info;

/// Writes one log line per round or bank change, for moderators.
pub struct AuditLog;

impl RoundEventHandler for AuditLog {
    fn handle_event(&mut self, event: RoundEvent) {
        match event {
            RoundEvent::RoundStarted {
                room_id,
                creator,
                random,
                ..
            } => {
                let kind = if random { "HANGMAN RANDOM" } else { "HANGMAN" };
                info!(target: "hangman::audit", "[{}] {} by {}", room_id, kind, creator);
            }
            RoundEvent::RoundEnded {
                room_id, ended_by, ..
            } => {
                info!(target: "hangman::audit", "[{}] ENDHANGMAN by {}", room_id, ended_by);
            }
            RoundEvent::BankUpdated { room_id, phrase } => {
                info!(target: "hangman::audit", "[{}] HANGMAN TERMS {:?}", room_id, phrase);
            }
            // Guesses and results are already logged by the manager
            RoundEvent::GuessApplied { .. }
            | RoundEvent::RoundWon { .. }
            | RoundEvent::RoundLost { .. } => {}
        }
    }
}
