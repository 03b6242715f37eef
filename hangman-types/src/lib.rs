pub mod bank;
pub mod errors;
pub mod messages;
pub mod round;

// Re-export all types
pub use bank::*;
pub use errors::*;
pub use messages::*;
pub use round::*;

/// Room identifier as supplied by the host (already an id, e.g. `"lobby"`).
pub type RoomId = String;
/// Identifier of the user creating, guessing in, or ending a round.
pub type ActorId = String;
pub type RoundId = uuid::Uuid;
