pub mod json_store;

pub use json_store::{DEFAULT_HANGMAN_FILE, JsonFileStore};
