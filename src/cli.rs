use crate::board::gallows;
use crate::error::GameError;
use crate::game_state::{GameInterface, Outcome, RoundView, UserAction, parse_guess, play_round};
use crate::tui::TuiInterface;
use crate::wordstore::{DEFAULT_WORDS_FILE, WordStore, add_word};
use crate::{debug_log, info_log};
use clap::Parser;
use rand::Rng;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Word-guessing game over a plain-text word list
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the newline-delimited word list
    #[arg(short = 'w', long = "words", default_value = DEFAULT_WORDS_FILE)]
    pub words_path: PathBuf,

    /// Play rounds in the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Seed for word selection (defaults to OS entropy)
    #[arg(long)]
    pub seed: Option<u64>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Add,
    Quit,
}

#[must_use]
pub fn parse_command(input: &str) -> Command {
    match input.trim().to_lowercase().as_str() {
        "play" => Command::Play,
        "add" => Command::Add,
        _ => Command::Quit,
    }
}

/// Where play rounds are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frontend {
    Console,
    Tui,
}

const STOP_ADDING: &str = "0";
const UNREADABLE_INPUT: &str = "That input could not be read as text. Please try again.";

enum InputLine {
    Text(String),
    Unreadable,
    End,
}

/// Line-based console implementation of the game surface.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Next input line without its terminator.
    fn read_line(&mut self) -> InputLine {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => InputLine::End,
            Ok(_) => match String::from_utf8(buf) {
                Ok(line) => InputLine::Text(line.trim_end_matches(['\n', '\r']).to_string()),
                Err(_) => {
                    debug_log!("read_line() - Line is not valid UTF-8");
                    InputLine::Unreadable
                }
            },
            Err(e) => {
                log::warn!("Input closed after read error: {e}");
                InputLine::End
            }
        }
    }

    fn say(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.writer, "{text}") {
            debug_log!("say() - Write error: {}", e);
        }
    }

    fn prompt(&mut self, text: &str) {
        if let Err(e) = write!(self.writer, "{text}").and_then(|()| self.writer.flush()) {
            debug_log!("prompt() - Write error: {}", e);
        }
    }

    pub fn read_command(&mut self, first: bool) -> Command {
        if first {
            self.prompt("Do you want to play or add words? ");
        } else {
            self.prompt("Do you want to continue play or add? ");
        }
        loop {
            match self.read_line() {
                InputLine::Text(line) => return parse_command(&line),
                InputLine::End => return Command::Quit,
                InputLine::Unreadable => {
                    self.say(UNREADABLE_INPUT);
                    self.prompt("Do you want to play or add words? ");
                }
            }
        }
    }

    /// Accept words until the player enters `0` or input ends.
    pub fn add_words(&mut self, store: &WordStore) {
        self.prompt("Please enter the word you want to add: ");
        loop {
            let line = match self.read_line() {
                InputLine::Text(line) => line,
                InputLine::End => break,
                InputLine::Unreadable => {
                    self.say(UNREADABLE_INPUT);
                    self.prompt("If you want to continue adding write the words. Otherwise 0: ");
                    continue;
                }
            };
            let candidate = line.trim();
            if candidate == STOP_ADDING {
                break;
            }
            match add_word(store, candidate) {
                Ok(()) => self.say("Word successfully added."),
                Err(e) if e.is_recoverable() => self.say(e),
                Err(e) => {
                    log::error!("Adding words aborted: {e}");
                    self.say(format_args!("Error: {e}"));
                    return;
                }
            }
            self.prompt("If you want to continue adding write the words. Otherwise 0: ");
        }
    }

    pub fn report_play_error(&mut self, error: &GameError) {
        match error {
            GameError::NoWordsAvailable => {
                self.say("There are no words to guess yet. Add some words first.");
            }
            other => {
                log::error!("Round aborted: {other}");
                self.say(format_args!("Error: {other}"));
            }
        }
    }

    pub fn say_goodbye(&mut self) {
        self.say("Looks like you do not want to do any of that. Bye!");
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_round_start(&mut self, word_length: usize) {
        self.say(format_args!(
            "\nGuess the word! It has {word_length} characters."
        ));
    }

    fn display_progress(&mut self, view: &RoundView<'_>) {
        self.say(gallows(view.misses));
        self.say(format_args!("\nWord: {}", view.board));
        self.say(format_args!("Misses: {}/{}", view.misses, view.max_misses));
        if !view.guessed.is_empty() {
            let guessed: Vec<String> = view.guessed.iter().map(char::to_string).collect();
            self.say(format_args!("Guessed: {}", guessed.join(", ")));
        }
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        self.prompt("Guess a letter: ");
        let line = match self.read_line() {
            InputLine::Text(line) => line,
            InputLine::End => return Some(UserAction::Quit),
            // Treated like any other invalid guess
            InputLine::Unreadable => return None,
        };
        match parse_guess(&line) {
            Ok(letter) => Some(UserAction::Guess(letter)),
            Err(e) => {
                debug_log!("read_guess() - {}", e);
                None
            }
        }
    }

    fn display_outcome(&mut self, outcome: Outcome, word: &str) {
        match outcome {
            Outcome::Won => self.say(format_args!("You guessed it! The word was '{word}'.")),
            Outcome::Lost => self.say(format_args!("You lost! The word was '{word}'.")),
            Outcome::Abandoned => self.say(format_args!("Round abandoned. The word was '{word}'.")),
        }
    }
}

/// Play/add command loop. Ends on any other command or at end of input.
pub fn run<R, W, G>(
    console: &mut CliInterface<R, W>,
    store: &WordStore,
    rng: &mut G,
    frontend: Frontend,
) where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let mut first = true;
    loop {
        let command = console.read_command(first);
        first = false;
        info_log!("run() - Command: {:?}", command);

        match command {
            Command::Play => {
                let result = match frontend {
                    Frontend::Console => play_round(store, rng, console),
                    Frontend::Tui => match TuiInterface::new() {
                        // The TUI is dropped, restoring the terminal, before reporting
                        Ok(mut tui) => play_round(store, rng, &mut tui),
                        Err(e) => {
                            console.say(format_args!("Could not start the terminal interface: {e}"));
                            continue;
                        }
                    },
                };
                if let Err(e) = result {
                    console.report_play_error(&e);
                }
            }
            Command::Add => console.add_words(store),
            Command::Quit => {
                console.say_goodbye();
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn console(input: &str) -> CliInterface<Cursor<&str>, Vec<u8>> {
        CliInterface::new(Cursor::new(input), Vec::new())
    }

    fn output(console: &CliInterface<Cursor<&str>, Vec<u8>>) -> String {
        String::from_utf8(console.writer().clone()).unwrap()
    }

    fn temp_store() -> (TempDir, WordStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = WordStore::new(temp_dir.path().join(DEFAULT_WORDS_FILE));
        (temp_dir, store)
    }

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["hangman"]).unwrap();
        assert_eq!(cli.words_path, PathBuf::from(DEFAULT_WORDS_FILE));
        assert!(!cli.tui);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_parse_cli_with_options() {
        let cli =
            Cli::try_parse_from(["hangman", "-w", "/tmp/words.txt", "--tui", "--seed", "9"])
                .unwrap();
        assert_eq!(cli.words_path, PathBuf::from("/tmp/words.txt"));
        assert!(cli.tui);
        assert_eq!(cli.seed, Some(9));
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("play\n"), Command::Play);
        assert_eq!(parse_command("  ADD "), Command::Add);
        assert_eq!(parse_command("quit"), Command::Quit);
        assert_eq!(parse_command(""), Command::Quit);
    }

    #[test]
    fn test_read_command_eof_quits() {
        let mut console = console("");
        assert_eq!(console.read_command(true), Command::Quit);
    }

    #[test]
    fn test_read_guess_valid_letter() {
        let mut console = console("K\n");
        assert_eq!(console.read_guess(), Some(UserAction::Guess('k')));
    }

    #[test]
    fn test_read_guess_invalid_is_silent() {
        let mut console = console("ab\n7\n");
        assert_eq!(console.read_guess(), None);
        assert_eq!(console.read_guess(), None);
        assert_eq!(output(&console), "Guess a letter: Guess a letter: ");
    }

    #[test]
    fn test_read_guess_eof_quits() {
        let mut console = console("");
        assert_eq!(console.read_guess(), Some(UserAction::Quit));
    }

    #[test]
    fn test_add_words_until_zero() {
        let (_dir, store) = temp_store();
        let mut console = console("cat\na1\ncat\nx\ndog\n0\nignored\n");
        console.add_words(&store);

        assert_eq!(store.count().unwrap(), 2);
        let out = output(&console);
        assert_eq!(out.matches("Word successfully added.").count(), 2);
        assert!(out.contains("'a1' is not a valid word"));
        assert!(out.contains("'x' is not a valid word"));
        assert!(out.contains("'cat' is already in the word list"));
    }

    #[test]
    fn test_add_words_survives_unreadable_line() {
        let (_dir, store) = temp_store();
        let input: &[u8] = b"caf\xe9\nowl\n0\n";
        let mut console = CliInterface::new(Cursor::new(input), Vec::new());
        console.add_words(&store);

        let out = String::from_utf8(console.writer().clone()).unwrap();
        assert!(out.contains(UNREADABLE_INPUT));
        assert!(out.contains("Word successfully added."));
        assert!(store.contains("owl").unwrap());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_unreadable_guess_reprompts() {
        let input: &[u8] = b"\xff\nq\n";
        let mut console = CliInterface::new(Cursor::new(input), Vec::new());
        assert_eq!(console.read_guess(), None);
        assert_eq!(console.read_guess(), Some(UserAction::Guess('q')));
    }

    #[test]
    fn test_unreadable_command_reprompts() {
        let input: &[u8] = b"\xff\nadd\n";
        let mut console = CliInterface::new(Cursor::new(input), Vec::new());
        assert_eq!(console.read_command(true), Command::Add);
    }

    #[test]
    fn test_add_words_storage_error_ends_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = WordStore::new(temp_dir.path().join("missing").join("words.txt"));
        let mut console = console("cat\ndog\n0\n");
        console.add_words(&store);
        let out = output(&console);
        assert!(out.contains("Error: cannot access word list"));
        assert!(!out.contains("continue adding"));
    }

    #[test]
    fn test_display_progress_shows_board_and_misses() {
        let mut console = console("");
        let mut session = crate::game_state::GameSession::new("cat");
        session.guess('a');
        session.guess('z');
        console.display_progress(&session.view());
        let out = output(&console);
        assert!(out.contains("Word: _ a _"));
        assert!(out.contains("Misses: 1/6"));
        assert!(out.contains("Guessed: a, z"));
        assert!(out.contains(" O "));
    }

    #[test]
    fn test_run_play_with_empty_store() {
        let (_dir, store) = temp_store();
        let mut console = console("play\nbye\n");
        let mut rng = StdRng::seed_from_u64(1);
        run(&mut console, &store, &mut rng, Frontend::Console);
        let out = output(&console);
        assert!(out.contains("There are no words to guess yet."));
        assert!(out.contains("Bye!"));
    }

    #[test]
    fn test_run_add_then_play() {
        let (_dir, store) = temp_store();
        let mut console = console("add\nowl\n0\nplay\no\nw\nl\nexit\n");
        let mut rng = StdRng::seed_from_u64(1);
        run(&mut console, &store, &mut rng, Frontend::Console);
        let out = output(&console);
        assert!(out.contains("Word successfully added."));
        assert!(out.contains("You guessed it! The word was 'owl'."));
        assert!(out.contains("Do you want to continue play or add? "));
        assert!(out.ends_with("Bye!\n"));
    }
}
