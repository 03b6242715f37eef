use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::RoomId;

/// Saved phrases for one room, each with the hints a random round may show.
pub type PhraseBank = BTreeMap<String, Vec<String>>;

/// Saved phrases for every room. Serialized as `{room: {phrase: [hints]}}`.
pub type BankData = BTreeMap<RoomId, PhraseBank>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DrawnPhrase {
    pub phrase: String,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AddedHints {
    pub phrase: String, // Key the hints landed under
    pub added: usize,
    pub created: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RemovedHints {
    pub phrase: String,
    pub removed: usize,
    pub entry_deleted: bool,
}
