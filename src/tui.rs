//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides a full-screen round view using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: renders the gallows, board and guessed letters, and turns
//!   key presses into `UserAction`s for the game loop
//!
//! # State Machine
//! - `Guessing` → `RoundOver` (waits for any key, then the round returns)

use crate::board::gallows;
use crate::game_state::{GameInterface, Outcome, RoundView, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const GALLOWS_PANEL_WIDTH: u16 = 16;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const BOARD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Guessing,
    RoundOver,
}

/// Map a key press to a game action. Non-letter keys yield `None`.
#[must_use]
pub fn action_for_key(key: KeyEvent) -> Option<UserAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let has_alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => Some(UserAction::Quit),
        KeyCode::Char('c') if has_ctrl => Some(UserAction::Quit),
        KeyCode::Char(c) if c.is_ascii_alphabetic() && !has_ctrl && !has_alt => {
            Some(UserAction::Guess(c.to_ascii_lowercase()))
        }
        _ => None,
    }
}

/// Full-screen round view.
///
/// Owns the terminal in raw mode for the lifetime of one round; dropping it
/// restores the terminal.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: TuiState,
    board: String,
    misses: usize,
    max_misses: usize,
    guessed: Vec<char>,
    message: String,
    outcome: Option<Outcome>,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        // Self never exists on failure, so Drop cannot restore the terminal
        let terminal = open_or_restore(Self::open_terminal, || {
            let mut stdout = io::stdout();
            let _ = execute!(stdout, LeaveAlternateScreen, cursor::Show);
            let _ = disable_raw_mode();
        })?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            state: TuiState::Guessing,
            board: String::new(),
            misses: 0,
            max_misses: 0,
            guessed: Vec::new(),
            message: String::new(),
            outcome: None,
            status: "Ready".to_string(),
        })
    }

    fn open_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Terminal::new(CrosstermBackend::new(stdout))
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let state = self.state;
        let board = &self.board;
        let misses = self.misses;
        let max_misses = self.max_misses;
        let guessed = &self.guessed;
        let message = &self.message;
        let outcome = self.outcome;
        let status = &self.status;

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Title
                    Constraint::Min(9),    // Gallows + word
                    Constraint::Length(3), // Status line
                    Constraint::Length(3), // Instructions
                ])
                .split(f.area());

            let middle = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(GALLOWS_PANEL_WIDTH), Constraint::Min(20)])
                .split(chunks[1]);

            render_title(f, chunks[0]);
            render_gallows(f, middle[0], misses);
            render_word(
                f,
                middle[1],
                board,
                misses,
                max_misses,
                guessed,
                message,
                outcome,
            );
            render_status(f, chunks[2], status);
            render_instructions(f, chunks[3], state);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Wait up to one poll interval for a key press.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

/// Run `open`; if it fails, run `restore` before handing back the error.
fn open_or_restore<T>(
    open: impl FnOnce() -> Result<T, io::Error>,
    restore: impl FnOnce(),
) -> Result<T, io::Error> {
    open().inspect_err(|e| {
        debug_log!("open_or_restore() - Terminal setup failed: {}", e);
        restore();
    })
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("HANGMAN")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_gallows(f: &mut Frame, area: Rect, misses: usize) {
    let lines: Vec<Line> = gallows(misses).lines().map(Line::from).collect();
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

#[allow(clippy::too_many_arguments)]
fn render_word(
    f: &mut Frame,
    area: Rect,
    board: &str,
    misses: usize,
    max_misses: usize,
    guessed: &[char],
    message: &str,
    outcome: Option<Outcome>,
) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {board}"), BOARD_STYLE)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Misses: ", INFO_STYLE),
            Span::raw(format!("{misses}/{max_misses}")),
        ]),
    ];

    if !guessed.is_empty() {
        let letters: Vec<String> = guessed.iter().map(char::to_string).collect();
        lines.push(Line::from(vec![
            Span::styled("Guessed: ", INFO_STYLE),
            Span::raw(letters.join(" ")),
        ]));
    }

    if !message.is_empty() {
        let style = match outcome {
            Some(Outcome::Won) => SUCCESS_STYLE,
            Some(Outcome::Lost | Outcome::Abandoned) => ERROR_STYLE,
            None => HEADER_STYLE,
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(message, style)));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Word").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let paragraph = Paragraph::new(status)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
    let text = match state {
        TuiState::Guessing => "Type a letter to guess | ESC: Give up",
        TuiState::RoundOver => "Press any key to continue",
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

impl GameInterface for TuiInterface {
    fn display_round_start(&mut self, word_length: usize) {
        self.state = TuiState::Guessing;
        self.outcome = None;
        self.message.clear();
        self.status = format!("New round - the word has {word_length} characters");
        self.draw_or_log();
    }

    fn display_progress(&mut self, view: &RoundView<'_>) {
        self.board = view.board.to_string();
        self.misses = view.misses;
        self.max_misses = view.max_misses;
        self.guessed = view.guessed.to_vec();
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        info_log!("read_guess() - Waiting for a letter");
        loop {
            if self.draw().is_err() {
                info_log!("read_guess() - Draw failed, returning Quit");
                return Some(UserAction::Quit);
            }
            match Self::next_key() {
                Ok(Some(key)) => {
                    if let Some(action) = action_for_key(key) {
                        info_log!("read_guess() - Action received: {:?}", action);
                        if let UserAction::Guess(letter) = action {
                            self.status = format!("Guessed '{letter}'");
                        }
                        return Some(action);
                    }
                    debug_log!("read_guess() - Ignoring key: {:?}", key.code);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_guess() - Input error: {}, returning Quit", e);
                    return Some(UserAction::Quit);
                }
            }
        }
    }

    fn display_outcome(&mut self, outcome: Outcome, word: &str) {
        self.state = TuiState::RoundOver;
        self.outcome = Some(outcome);
        self.message = match outcome {
            Outcome::Won => format!("You guessed it! The word was '{word}'."),
            Outcome::Lost => format!("You lost! The word was '{word}'."),
            Outcome::Abandoned => format!("Round abandoned. The word was '{word}'."),
        };
        self.status = "Round over".to_string();

        loop {
            if self.draw().is_err() {
                return;
            }
            match Self::next_key() {
                Ok(Some(_)) | Err(_) => return,
                Ok(None) => {}
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_letter_keys_guess_lowercase() {
        assert_eq!(
            action_for_key(press(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(UserAction::Guess('a'))
        );
        assert_eq!(
            action_for_key(press(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Some(UserAction::Guess('q'))
        );
    }

    #[test]
    fn test_escape_and_ctrl_c_quit() {
        assert_eq!(
            action_for_key(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(UserAction::Quit)
        );
        assert_eq!(
            action_for_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(UserAction::Quit)
        );
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(action_for_key(press(KeyCode::Char('3'), KeyModifiers::NONE)), None);
        assert_eq!(action_for_key(press(KeyCode::Enter, KeyModifiers::NONE)), None);
        assert_eq!(action_for_key(press(KeyCode::Char('x'), KeyModifiers::ALT)), None);
    }

    #[test]
    fn test_failed_setup_restores_terminal() {
        let mut restored = false;
        let result: Result<(), io::Error> = open_or_restore(
            || Err(io::Error::other("no tty")),
            || restored = true,
        );
        assert!(result.is_err());
        assert!(restored);
    }

    #[test]
    fn test_successful_setup_keeps_terminal() {
        let mut restored = false;
        let result = open_or_restore(|| Ok(7), || restored = true);
        assert_eq!(result.unwrap(), 7);
        assert!(!restored);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut key = press(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(action_for_key(key), None);
    }
}
