use crate::board::Board;
use crate::error::{GameError, Result};
use crate::wordstore::WordStore;
use crate::{debug_log, info_log};
use rand::Rng;

/// Misses allowed before the round is lost.
pub const MAX_MISSES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
    /// Input ended before the round was decided.
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Guessing,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessResult {
    Hit,
    Miss,
    /// The round was already decided; nothing changed.
    RoundOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(char),
    Quit,
}

/// Snapshot handed to the interface before each guess.
#[derive(Debug, Clone, Copy)]
pub struct RoundView<'a> {
    pub board: &'a Board,
    pub misses: usize,
    pub max_misses: usize,
    pub guessed: &'a [char],
}

/// Trait for the surface a round is played on (console or TUI).
pub trait GameInterface {
    fn display_round_start(&mut self, word_length: usize);

    /// Show the gallows and board for the current miss count.
    fn display_progress(&mut self, view: &RoundView<'_>);

    /// Prompt for one letter. `None` means the input was not a single letter
    /// and the prompt should simply be repeated.
    fn read_guess(&mut self) -> Option<UserAction>;

    fn display_outcome(&mut self, outcome: Outcome, word: &str);
}

/// Parse one line of guess input into a lowercase letter.
pub fn parse_guess(input: &str) -> Result<char> {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_lowercase()),
        _ => Err(GameError::InvalidGuess(trimmed.to_string())),
    }
}

/// One round: the secret, its board and the miss counter.
#[derive(Debug, Clone)]
pub struct GameSession {
    word: String,
    secret: String,
    board: Board,
    misses: usize,
    guessed: Vec<char>,
}

impl GameSession {
    /// Start a round for `word`. Guessing is case-insensitive, so the secret
    /// is kept lowercased while `word` is retained for the final reveal.
    #[must_use]
    pub fn new(word: &str) -> Self {
        let secret = word.to_ascii_lowercase();
        let board = Board::new(&secret);
        Self {
            word: word.to_string(),
            secret,
            board,
            misses: 0,
            guessed: Vec::new(),
        }
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn misses(&self) -> usize {
        self.misses
    }

    #[must_use]
    pub fn guessed(&self) -> &[char] {
        &self.guessed
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.board.is_complete(&self.secret) {
            SessionState::Won
        } else if self.misses >= MAX_MISSES {
            SessionState::Lost
        } else {
            SessionState::Guessing
        }
    }

    #[must_use]
    pub fn view(&self) -> RoundView<'_> {
        RoundView {
            board: &self.board,
            misses: self.misses,
            max_misses: MAX_MISSES,
            guessed: &self.guessed,
        }
    }

    /// Resolve one letter against the board.
    pub fn guess(&mut self, letter: char) -> GuessResult {
        if self.state() != SessionState::Guessing {
            return GuessResult::RoundOver;
        }

        let letter = letter.to_ascii_lowercase();
        if !self.guessed.contains(&letter) {
            self.guessed.push(letter);
        }

        if self.board.reveal(&self.secret, letter) {
            debug_log!("guess() - '{}' hit, board now {}", letter, self.board);
            GuessResult::Hit
        } else {
            self.misses += 1;
            debug_log!("guess() - '{}' missed, {} misses", letter, self.misses);
            GuessResult::Miss
        }
    }

    /// Drive the guess loop until the round is won, lost or abandoned.
    ///
    /// The loss check happens at the top of each iteration so the final
    /// gallows stage is shown before the result.
    pub fn play<I: GameInterface + ?Sized>(&mut self, ui: &mut I) -> Outcome {
        ui.display_round_start(self.board.len());

        loop {
            ui.display_progress(&self.view());

            let outcome = match self.state() {
                SessionState::Won => Outcome::Won,
                SessionState::Lost => Outcome::Lost,
                SessionState::Guessing => {
                    let Some(letter) = read_letter(ui) else {
                        info_log!("play() - Input ended, abandoning round");
                        ui.display_outcome(Outcome::Abandoned, &self.word);
                        return Outcome::Abandoned;
                    };
                    self.guess(letter);
                    continue;
                }
            };

            info_log!("play() - Round finished: {:?} after {} misses", outcome, self.misses);
            ui.display_outcome(outcome, &self.word);
            return outcome;
        }
    }
}

/// Keep prompting until a letter arrives; `None` when the player quits.
fn read_letter<I: GameInterface + ?Sized>(ui: &mut I) -> Option<char> {
    loop {
        match ui.read_guess() {
            Some(UserAction::Guess(c)) => return Some(c),
            Some(UserAction::Quit) => return None,
            None => {}
        }
    }
}

/// Pick a word from `store` and play one round on `ui`.
///
/// # Errors
/// `NoWordsAvailable` when the store is empty, `Storage` when it cannot be read.
pub fn play_round<R, I>(store: &WordStore, rng: &mut R, ui: &mut I) -> Result<Outcome>
where
    R: Rng + ?Sized,
    I: GameInterface + ?Sized,
{
    if store.count()? == 0 {
        return Err(GameError::NoWordsAvailable);
    }
    let word = store.select_random(rng)?;
    info_log!("play_round() - Selected a {}-letter word", word.chars().count());

    let mut session = GameSession::new(&word);
    Ok(session.play(ui))
}
