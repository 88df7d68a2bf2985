// Library interface for hangman
// This allows integration tests to access internal modules

pub mod board;
pub mod cli;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod validator;
pub mod wordstore;

// Re-export commonly used items for easier testing
pub use board::{Board, PLACEHOLDER};
pub use error::{GameError, Result};
pub use game_state::{GameInterface, GameSession, MAX_MISSES, Outcome, play_round};
pub use validator::is_valid_word;
pub use wordstore::{DEFAULT_WORDS_FILE, WordStore, add_word};
