use hangman_types::{ActorId, GuessKind, RoomId, RoundId};

#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    RoundStarted {
        room_id: RoomId,
        round_id: RoundId,
        creator: ActorId,
        random: bool,
    },
    GuessApplied {
        room_id: RoomId,
        round_id: RoundId,
        guesser: ActorId,
        guess: String,
        kind: GuessKind,
        hit: bool,
    },
    RoundWon {
        room_id: RoomId,
        round_id: RoundId,
        winner: ActorId,
    },
    RoundLost {
        room_id: RoomId,
        round_id: RoundId,
    },
    RoundEnded {
        room_id: RoomId,
        round_id: RoundId,
        ended_by: ActorId,
    },
    BankUpdated {
        room_id: RoomId,
        phrase: String,
    },
}

impl RoundEvent {
    pub fn room_id(&self) -> &str {
        match self {
            RoundEvent::RoundStarted { room_id, .. } => room_id,
            RoundEvent::GuessApplied { room_id, .. } => room_id,
            RoundEvent::RoundWon { room_id, .. } => room_id,
            RoundEvent::RoundLost { room_id, .. } => room_id,
            RoundEvent::RoundEnded { room_id, .. } => room_id,
            RoundEvent::BankUpdated { room_id, .. } => room_id,
        }
    }
}

/// Event handler trait for processing round events
pub trait RoundEventHandler: Send + Sync {
    fn handle_event(&mut self, event: RoundEvent);
}

/// Simple event bus for distributing round events
pub struct RoundEventBus {
    handlers: Vec<Box<dyn RoundEventHandler>>,
}

impl RoundEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn RoundEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: RoundEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for RoundEventBus {
    fn default() -> Self {
        Self::new()
    }
}
