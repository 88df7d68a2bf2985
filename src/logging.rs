// Logger setup plus conditional logging macros - the macros are only active in debug builds

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use env_logger::{Builder, Env, Target};

const LOG_DIR_NAME: &str = "hangman";
const LOG_FILE_NAME: &str = "hangman.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// The terminal belongs to the TUI, so write to a file in the cache dir.
    CacheFile,
}

#[must_use]
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(LOG_DIR_NAME).join(LOG_FILE_NAME))
}

fn open_log_file() -> Option<(File, PathBuf)> {
    let path = log_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = File::options().create(true).append(true).open(&path).ok()?;
    Some((file, path))
}

/// Install the global logger. Filter comes from `RUST_LOG`, default `warn`.
///
/// Returns the log file path when logging to a file. Calling this twice is
/// harmless; the second call leaves the first logger in place.
pub fn init_logging(target: LogTarget) -> Option<PathBuf> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    let mut log_path = None;
    if target == LogTarget::CacheFile
        && let Some((file, path)) = open_log_file()
    {
        builder.target(Target::Pipe(Box::new(file)));
        log_path = Some(path);
    }

    if builder.try_init().is_err() {
        return None;
    }
    log_path
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}
