//! Masked view of the secret word and the gallows drawing.

use std::fmt;

pub const PLACEHOLDER: char = '_';

/// Gallows drawing for each miss count, 0 through 6.
pub const GALLOWS: [&str; 7] = [
    "  +---+\n  |   |\n      |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n  |   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n /    |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n / \\  |\n      |\n=========",
];

/// Drawing for `misses`, clamped to the final stage.
#[must_use]
pub fn gallows(misses: usize) -> &'static str {
    GALLOWS[misses.min(GALLOWS.len() - 1)]
}

/// One cell per character of the secret. Letters start hidden; anything
/// else is shown from the start since it can never be guessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<char>,
}

impl Board {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let cells = secret
            .chars()
            .map(|c| if c.is_ascii_alphabetic() { PLACEHOLDER } else { c })
            .collect();
        Self { cells }
    }

    /// Uncover every position where `secret` holds `letter`.
    ///
    /// Matching is exact; returns whether anything matched. Revealing a
    /// letter twice leaves the board unchanged.
    pub fn reveal(&mut self, secret: &str, letter: char) -> bool {
        let mut matched = false;
        for (cell, c) in self.cells.iter_mut().zip(secret.chars()) {
            if c == letter {
                *cell = letter;
                matched = true;
            }
        }
        matched
    }

    #[must_use]
    pub fn is_complete(&self, secret: &str) -> bool {
        self.cells.iter().copied().eq(secret.chars())
    }

    #[must_use]
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == PLACEHOLDER).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_masks_letters() {
        let board = Board::new("cat");
        assert_eq!(board.len(), 3);
        assert_eq!(board.cells(), &['_', '_', '_']);
        assert_eq!(board.hidden_count(), 3);
    }

    #[test]
    fn test_new_board_shows_non_letters() {
        let secret = "ice-cream 2";
        let board = Board::new(secret);
        assert_eq!(board.len(), secret.chars().count());
        for (cell, c) in board.cells().iter().zip(secret.chars()) {
            if c.is_ascii_alphabetic() {
                assert_eq!(*cell, PLACEHOLDER);
            } else {
                assert_eq!(*cell, c);
            }
        }
    }

    #[test]
    fn test_reveal_all_positions() {
        let mut board = Board::new("banana");
        assert!(board.reveal("banana", 'a'));
        assert_eq!(board.to_string(), "_ a _ a _ a");
        assert!(!board.reveal("banana", 'z'));
        assert_eq!(board.to_string(), "_ a _ a _ a");
    }

    #[test]
    fn test_reveal_is_case_sensitive() {
        let mut board = Board::new("Go");
        assert!(!board.reveal("Go", 'g'));
        assert!(board.reveal("Go", 'G'));
    }

    #[test]
    fn test_reveal_idempotent() {
        let mut board = Board::new("hello");
        assert!(board.reveal("hello", 'l'));
        let snapshot = board.clone();
        assert!(board.reveal("hello", 'l'));
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_revealing_every_letter_completes() {
        let secret = "mississippi";
        let mut board = Board::new(secret);
        assert!(!board.is_complete(secret));
        for letter in ['m', 'i', 's', 'p'] {
            board.reveal(secret, letter);
        }
        assert!(board.is_complete(secret));
        assert_eq!(board.hidden_count(), 0);
    }

    #[test]
    fn test_non_letter_secret_complete_from_start() {
        let board = Board::new("--");
        assert!(board.is_complete("--"));
    }

    #[test]
    fn test_gallows_stages() {
        assert_eq!(GALLOWS.len(), 7);
        assert!(!gallows(0).contains('O'));
        assert!(gallows(1).contains('O'));
        assert_eq!(gallows(6), gallows(10));
    }
}
