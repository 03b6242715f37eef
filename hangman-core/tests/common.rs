#![allow(dead_code)]

use hangman_core::{
    HangmanManager, MemoryBankStore, Round, RoundEvent, RoundEventHandler, WordBank,
};
use std::sync::{Arc, Mutex};

/// Creates a round in a fixed test room, created by "host"
pub fn create_round(phrase: &str) -> Round {
    Round::new("lobby", "host", phrase, None).expect("test phrase should be valid")
}

/// Creates a manager backed by an in-memory store, returning the store handle too
pub fn create_test_manager() -> (HangmanManager, MemoryBankStore) {
    let store = MemoryBankStore::new();
    let manager = HangmanManager::new(WordBank::load(Box::new(store.clone())));
    (manager, store)
}

/// Event collector for testing event emissions
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<RoundEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<RoundEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&RoundEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl RoundEventHandler for EventCollector {
    fn handle_event(&mut self, event: RoundEvent) {
        self.events.lock().unwrap().push(event);
    }
}
