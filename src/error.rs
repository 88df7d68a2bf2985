//! Error types surfaced by the word store and the game entry points.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::validator::{MAX_WORD_LENGTH, MIN_WORD_LENGTH};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("cannot access word list {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no words available to guess")]
    NoWordsAvailable,

    #[error("'{0}' is not a valid word (at least {min} letters, letters only)", min = MIN_WORD_LENGTH)]
    InvalidWord(String),

    #[error("'{0}' is longer than {max} characters", max = MAX_WORD_LENGTH)]
    WordTooLong(String),

    #[error("'{0}' is already in the word list")]
    DuplicateWord(String),

    #[error("'{0}' is not a single letter")]
    InvalidGuess(String),
}

impl GameError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Whether the dispatcher can carry on after reporting this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Storage { .. })
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
