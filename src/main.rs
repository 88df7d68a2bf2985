use hangman::cli::{CliInterface, Frontend, parse_cli, run};
use hangman::logging::{LogTarget, init_logging};
use hangman::wordstore::WordStore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;

fn main() {
    let cli = parse_cli();

    let (target, frontend) = if cli.tui {
        (LogTarget::CacheFile, Frontend::Tui)
    } else {
        (LogTarget::Stderr, Frontend::Console)
    };
    if let Some(path) = init_logging(target) {
        log::info!("Logging to {}", path.display());
    }

    let store = WordStore::new(&cli.words_path);
    log::info!("Using word list {}", store.path().display());

    // Seeded once per process; every round draws from the same generator
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let stdin = io::stdin();
    let mut console = CliInterface::new(stdin.lock(), io::stdout());
    run(&mut console, &store, &mut rng, frontend);
}
