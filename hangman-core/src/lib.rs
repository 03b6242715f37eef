pub mod normalizer;
pub mod room_games;
pub mod round;
pub mod round_events;
pub mod word_bank;

// Re-export main components
pub use normalizer::*;
pub use room_games::*;
pub use round::*;
pub use round_events::*;
pub use word_bank::*;
