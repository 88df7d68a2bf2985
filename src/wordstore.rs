//! Flat-file word list.
//!
//! One word per line, newline terminated, append only. Every operation opens
//! the file afresh, so edits made by other programs between calls are seen.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use rand::Rng;

use crate::error::{GameError, Result};
use crate::validator::{exceeds_max_length, is_valid_word};
use crate::{debug_log, info_log};

pub const DEFAULT_WORDS_FILE: &str = "WordsToGuess.txt";

#[derive(Debug, Clone)]
pub struct WordStore {
    path: PathBuf,
}

impl WordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every usable entry. A missing file is an empty list.
    fn load_words(&self) -> Result<Vec<String>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug_log!("load_words() - {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(GameError::storage(&self.path, e)),
        };

        let mut reader = BufReader::new(file);
        let mut words = Vec::new();
        let mut buf = Vec::new();
        let mut line_no = 0;
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| GameError::storage(&self.path, e))?;
            if read == 0 {
                break;
            }
            line_no += 1;

            let Ok(line) = std::str::from_utf8(&buf) else {
                log::warn!(
                    "Skipping entry that is not valid UTF-8 on line {} of {}",
                    line_no,
                    self.path.display()
                );
                continue;
            };
            let word = line.trim_end_matches(['\n', '\r']);
            if word.is_empty() {
                continue;
            }
            if exceeds_max_length(word) {
                log::warn!(
                    "Skipping over-long entry on line {} of {}",
                    line_no,
                    self.path.display()
                );
                continue;
            }
            words.push(word.to_string());
        }
        Ok(words)
    }

    pub fn contains(&self, word: &str) -> Result<bool> {
        Ok(self.load_words()?.iter().any(|w| w == word))
    }

    /// Append `word` as a new trailing line.
    ///
    /// Refuses anything the reader would not hand back unchanged: empty
    /// words, line breaks, over-long words and duplicates.
    pub fn append(&self, word: &str) -> Result<()> {
        if word.is_empty() || word.contains(['\n', '\r']) {
            return Err(GameError::InvalidWord(word.to_string()));
        }
        if exceeds_max_length(word) {
            return Err(GameError::WordTooLong(word.to_string()));
        }
        if self.contains(word)? {
            return Err(GameError::DuplicateWord(word.to_string()));
        }

        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| GameError::storage(&self.path, e))?;
        Self::terminate_last_line(&mut file)
            .and_then(|()| writeln!(file, "{word}"))
            .and_then(|()| file.flush())
            .map_err(|e| GameError::storage(&self.path, e))?;

        info_log!("append() - Added '{}' to {}", word, self.path.display());
        Ok(())
    }

    /// Add a newline if an external edit left the last line unterminated.
    fn terminate_last_line(file: &mut File) -> io::Result<()> {
        if file.metadata()?.len() == 0 {
            return Ok(());
        }
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            file.write_all(b"\n")?;
        }
        Ok(())
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.load_words()?.len())
    }

    /// Pick an entry uniformly at random.
    ///
    /// # Errors
    /// `NoWordsAvailable` when the list is empty or absent, `Storage` when it
    /// cannot be read.
    pub fn select_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        let mut words = self.load_words()?;
        if words.is_empty() {
            return Err(GameError::NoWordsAvailable);
        }
        let index = rng.random_range(0..words.len());
        debug_log!("select_random() - Picked index {} of {}", index, words.len());
        Ok(words.swap_remove(index))
    }
}

/// Validate `candidate` and add it to the store.
///
/// Rejections (`WordTooLong`, `InvalidWord`, `DuplicateWord`) leave the store
/// untouched and can be retried with another word.
pub fn add_word(store: &WordStore, candidate: &str) -> Result<()> {
    if exceeds_max_length(candidate) {
        return Err(GameError::WordTooLong(candidate.to_string()));
    }
    if !is_valid_word(candidate) {
        return Err(GameError::InvalidWord(candidate.to_string()));
    }
    store.append(candidate)
}
