use hangman_core::HangmanManager;
use hangman_types::{
    AddTermsRequest, AddedHints, CreateRoundRequest, GuessOutcome, GuessRequest,
    HangmanSettingsResponse, RemoveTermsRequest, RemovedHints, RoundSnapshot, TermsResponse,
    ValidationFailure,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Async front for the hangman manager. Every mutation takes the write lock,
/// so guesses for a room are applied one at a time.
pub struct HangmanService {
    manager: Arc<RwLock<HangmanManager>>,
}

impl HangmanService {
    pub fn new(manager: HangmanManager) -> Self {
        Self {
            manager: Arc::new(RwLock::new(manager)),
        }
    }

    /// Run an operation that may save the word bank on the blocking pool,
    /// holding the write lock until the save is done.
    async fn with_bank_write<T, F>(&self, op: F) -> Result<T, ValidationFailure>
    where
        T: Send + 'static,
        F: FnOnce(&mut HangmanManager) -> Result<T, ValidationFailure> + Send + 'static,
    {
        let mut manager = self.manager.clone().write_owned().await;
        match tokio::task::spawn_blocking(move || op(&mut *manager)).await {
            Ok(result) => result,
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }

    pub async fn snapshot(&self, room_id: &str) -> Result<RoundSnapshot, ValidationFailure> {
        self.manager
            .read()
            .await
            .snapshot(room_id)
            .ok_or_else(|| ValidationFailure::NoActiveRound {
                room_id: room_id.to_string(),
            })
    }

    pub async fn create_round(
        &self,
        room_id: &str,
        request: CreateRoundRequest,
    ) -> Result<RoundSnapshot, ValidationFailure> {
        let mut manager = self.manager.write().await;
        manager.create_round(
            room_id,
            &request.creator,
            &request.phrase,
            request.hint.as_deref(),
        )
    }

    pub async fn create_random_round(
        &self,
        room_id: &str,
        creator: &str,
    ) -> Result<RoundSnapshot, ValidationFailure> {
        let room_id = room_id.to_string();
        let creator = creator.to_string();
        self.with_bank_write(move |manager| {
            manager.create_random_round(&room_id, &creator, &mut rand::thread_rng())
        })
        .await
    }

    pub async fn guess(
        &self,
        room_id: &str,
        request: GuessRequest,
    ) -> Result<GuessOutcome, ValidationFailure> {
        let mut manager = self.manager.write().await;
        manager.guess(room_id, &request.actor, &request.guess)
    }

    pub async fn end_round(
        &self,
        room_id: &str,
        actor: &str,
    ) -> Result<RoundSnapshot, ValidationFailure> {
        let mut manager = self.manager.write().await;
        manager.end_round(room_id, actor)
    }

    pub async fn set_enabled(
        &self,
        room_id: &str,
        enabled: bool,
    ) -> Result<HangmanSettingsResponse, ValidationFailure> {
        let mut manager = self.manager.write().await;
        if enabled {
            manager.enable(room_id)?;
        } else {
            manager.disable(room_id)?;
        }
        Ok(HangmanSettingsResponse {
            room_id: room_id.to_string(),
            enabled,
        })
    }

    pub async fn terms(&self, room_id: &str) -> Result<TermsResponse, ValidationFailure> {
        let manager = self.manager.read().await;
        let terms = manager
            .terms(room_id)
            .ok_or_else(|| ValidationFailure::NoSavedPhrases {
                room_id: room_id.to_string(),
            })?;
        Ok(TermsResponse {
            room_id: room_id.to_string(),
            terms: terms.clone(),
        })
    }

    pub async fn add_terms(
        &self,
        room_id: &str,
        request: AddTermsRequest,
    ) -> Result<AddedHints, ValidationFailure> {
        let room_id = room_id.to_string();
        self.with_bank_write(move |manager| {
            manager.add_hints(&room_id, &request.phrase, &request.hints)
        })
        .await
    }

    pub async fn remove_terms(
        &self,
        room_id: &str,
        request: RemoveTermsRequest,
    ) -> Result<RemovedHints, ValidationFailure> {
        let room_id = room_id.to_string();
        self.with_bank_write(move |manager| {
            manager.remove_hints(&room_id, &request.phrase, &request.hints)
        })
        .await
    }
}
