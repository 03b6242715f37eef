use anyhow::{Result, anyhow};
use hangman_types::{
    AddedHints, BankData, DrawnPhrase, PhraseBank, RemovedHints, ValidationFailure,
};
use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::normalizer::PhraseNormalizer;

/// Durable home of the word bank. Both operations move the whole structure.
pub trait BankStore: Send + Sync {
    fn load(&self) -> Result<BankData>;
    fn save(&self, data: &BankData) -> Result<()>;
}

/// In-memory store. Clones share the same contents, so a test can keep a
/// handle and inspect what the bank persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryBankStore {
    data: Arc<Mutex<BankData>>,
    saves: Arc<AtomicUsize>,
    failing: bool,
}

impl MemoryBankStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: BankData) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
            ..Self::default()
        }
    }

    /// A store whose loads and saves always fail.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn contents(&self) -> BankData {
        self.data
            .lock()
            .map(|data| data.clone())
            .unwrap_or_default()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl BankStore for MemoryBankStore {
    fn load(&self) -> Result<BankData> {
        if self.failing {
            return Err(anyhow!("memory store is unavailable"));
        }
        let data = self
            .data
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        Ok(data.clone())
    }

    fn save(&self, data: &BankData) -> Result<()> {
        if self.failing {
            return Err(anyhow!("memory store is unavailable"));
        }
        let mut stored = self
            .data
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        *stored = data.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Saved phrases and hints for every room, mirrored to a [`BankStore`].
///
/// Memory is authoritative: a failed load starts an empty bank and a failed
/// save is logged without undoing the change.
pub struct WordBank {
    rooms: BankData,
    store: Box<dyn BankStore>,
}

impl WordBank {
    pub fn load(store: Box<dyn BankStore>) -> Self {
        let rooms = match store.load() {
            Ok(rooms) => {
                info!("Loaded hangman words for {} rooms", rooms.len());
                rooms
                    .into_iter()
                    .map(|(room_id, phrases)| {
                        let phrases = tidy_room(&room_id, phrases);
                        (room_id, phrases)
                    })
                    .collect()
            }
            Err(e) => {
                warn!("Failed to load hangman words, starting with an empty bank: {:#}", e);
                BankData::new()
            }
        };

        Self { rooms, store }
    }

    pub fn rooms(&self) -> &BankData {
        &self.rooms
    }

    pub fn terms(&self, room_id: &str) -> Option<&PhraseBank> {
        self.rooms.get(room_id)
    }

    /// Pick a phrase uniformly, then one of its hints uniformly.
    pub fn draw_random<R: Rng + ?Sized>(
        &mut self,
        room_id: &str,
        rng: &mut R,
    ) -> Result<DrawnPhrase, ValidationFailure> {
        let no_phrases = || ValidationFailure::NoSavedPhrases {
            room_id: room_id.to_string(),
        };

        if !self.rooms.contains_key(room_id) {
            // Give later additions a room entry to land in
            self.rooms.insert(room_id.to_string(), PhraseBank::new());
            self.persist();
            return Err(no_phrases());
        }

        let (phrase, hints) = self.rooms[room_id]
            .iter()
            .filter(|(_, hints)| !hints.is_empty())
            .choose(rng)
            .ok_or_else(no_phrases)?;
        let hint = hints.choose(rng).ok_or_else(no_phrases)?;

        Ok(DrawnPhrase {
            phrase: phrase.clone(),
            hint: hint.clone(),
        })
    }

    /// Add hints under a phrase, reusing an existing entry whose canonical
    /// id matches.
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
        let phrase = PhraseNormalizer::normalize_phrase(phrase)?;

        let mut cleaned = Vec::new();
        for hint in hints {
            if let Some(hint) = PhraseNormalizer::normalize_hint(hint.as_ref())? {
                cleaned.push(hint);
            }
        }
        if cleaned.is_empty() {
            return Err(ValidationFailure::MissingHints);
        }

        let phrases = self.rooms.entry(room_id.to_string()).or_default();
        let existing = find_key(phrases, &phrase);
        let created = existing.is_none();
        let key = existing.unwrap_or(phrase);
        let added = cleaned.len();
        phrases.entry(key.clone()).or_default().extend(cleaned);

        info!("Added {} hints for hangman phrase {:?} in {}", added, key, room_id);
        self.persist();

        Ok(AddedHints {
            phrase: key,
            added,
            created,
        })
    }

    /// Remove the given hints from a phrase, or the whole phrase when no
    /// hints are given. Both phrase and hints match by canonical id.
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
        let phrases = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| ValidationFailure::NoSavedPhrases {
                room_id: room_id.to_string(),
            })?;
        let key = find_key(phrases, phrase).ok_or_else(|| ValidationFailure::PhraseNotFound {
            phrase: phrase.trim().to_string(),
        })?;

        let hint_ids: Vec<String> = hints
            .into_iter()
            .map(|hint| PhraseNormalizer::to_id(hint.as_ref()))
            .collect();

        let entry = phrases.remove(&key).unwrap_or_default();
        let (removed, entry_deleted) = if hint_ids.is_empty() {
            (entry.len(), true)
        } else {
            let before = entry.len();
            let kept: Vec<String> = entry
                .into_iter()
                .filter(|hint| !hint_ids.contains(&PhraseNormalizer::to_id(hint)))
                .collect();
            let removed = before - kept.len();
            if kept.is_empty() {
                (removed, true)
            } else {
                phrases.insert(key.clone(), kept);
                (removed, false)
            }
        };

        if entry_deleted {
            info!("Deleted hangman phrase {:?} in {}", key, room_id);
        } else {
            info!("Removed {} hints for hangman phrase {:?} in {}", removed, key, room_id);
        }
        self.persist();

        Ok(RemovedHints {
            phrase: key,
            removed,
            entry_deleted,
        })
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.rooms) {
            warn!("Failed to save hangman words: {:#}", e);
        }
    }
}

/// Bring a stored room in line with what `add_hints` would have written:
/// phrases and hints re-validated, entries sharing a canonical id merged,
/// and phrases left without hints dropped.
fn tidy_room(room_id: &str, stored: PhraseBank) -> PhraseBank {
    let mut phrases = PhraseBank::new();

    for (phrase, hints) in stored {
        let phrase = match PhraseNormalizer::normalize_phrase(&phrase) {
            Ok(phrase) => phrase,
            Err(e) => {
                warn!("Dropping hangman phrase {:?} in {}: {}", phrase, room_id, e);
                continue;
            }
        };

        let mut cleaned = Vec::new();
        for hint in hints {
            match PhraseNormalizer::normalize_hint(&hint) {
                Ok(Some(hint)) => cleaned.push(hint),
                Ok(None) => {}
                Err(e) => warn!("Dropping hint for {:?} in {}: {}", phrase, room_id, e),
            }
        }
        if cleaned.is_empty() {
            warn!("Dropping hangman phrase {:?} in {}: no hints", phrase, room_id);
            continue;
        }

        let key = find_key(&phrases, &phrase).unwrap_or(phrase);
        phrases.entry(key).or_default().extend(cleaned);
    }

    phrases
}

fn find_key(phrases: &PhraseBank, phrase: &str) -> Option<String> {
    let id = PhraseNormalizer::to_id(phrase);
    phrases
        .keys()
        .find(|key| PhraseNormalizer::to_id(key) == id)
        .cloned()
}
