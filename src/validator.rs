pub const MIN_WORD_LENGTH: usize = 2;

/// Longest word the list accepts (40 bytes with the line terminator).
pub const MAX_WORD_LENGTH: usize = 39;

/// A word may be added when it has at least two characters, all of them letters.
#[must_use]
pub fn is_valid_word(word: &str) -> bool {
    word.chars().count() >= MIN_WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

#[must_use]
pub fn exceeds_max_length(word: &str) -> bool {
    word.chars().count() > MAX_WORD_LENGTH
}
