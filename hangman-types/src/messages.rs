use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::{ActorId, RoomId, ValidationFailure};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateRoundRequest {
    pub creator: ActorId,
    pub phrase: String,
    #[serde(default)]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RandomRoundRequest {
    pub creator: ActorId,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessRequest {
    pub actor: ActorId,
    pub guess: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EndRoundRequest {
    pub actor: ActorId,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AddTermsRequest {
    pub phrase: String,
    pub hints: Vec<String>,
}

/// Removes the listed hints, or the whole entry when `hints` is empty.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RemoveTermsRequest {
    pub phrase: String,
    #[serde(default)]
    pub hints: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TermsResponse {
    pub room_id: RoomId,
    pub terms: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HangmanSettingsResponse {
    pub room_id: RoomId,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
    pub failure: Option<ValidationFailure>,
}

impl From<ValidationFailure> for ErrorResponse {
    fn from(failure: ValidationFailure) -> Self {
        ErrorResponse {
            error: failure.to_string(),
            failure: Some(failure),
        }
    }
}
