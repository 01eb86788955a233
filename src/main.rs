//! Terminal Chemistry Sort runner (default binary).
//!
//! Reads one command per line from stdin and re-renders the session after
//! each one. Finished games are stored in an in-memory progress store and
//! echoed as JSON records.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Result;

use chem_sort::config::Config;
use chem_sort::core::{GameSession, SimpleRng};
use chem_sort::progress::{MemoryStore, ProgressStore};
use chem_sort::term;
use chem_sort::types::GameAction;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::load(&args)?;
    let catalog = config.load_catalog()?;
    let seed = config.seed_or_clock();
    log::info!("starting at level {} with seed {}", config.level, seed);

    let mut session = GameSession::new(&catalog, config.level, SimpleRng::new(seed))?;
    let mut store = MemoryStore::new();
    let user_id = match &config.username {
        Some(name) => {
            let user = store.create_user(name)?;
            log::info!("playing as {} (user {})", user.username, user.id);
            user.id
        }
        None => {
            store.register(config.user_id)?;
            config.user_id
        }
    };

    run(&mut session, &mut store, user_id)
}

fn run(session: &mut GameSession<'_>, store: &mut MemoryStore, user_id: u64) -> Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();

    writeln!(out, "{}", term::HELP)?;
    term::render(&mut out, session)?;

    let mut last_input = Instant::now();
    for line in stdin.lock().lines() {
        let line = line?;

        // Wall time between commands counts as play time while running.
        let now = Instant::now();
        let elapsed = now.duration_since(last_input).as_millis();
        session.tick(u32::try_from(elapsed).unwrap_or(u32::MAX));
        last_input = now;

        if term::is_quit(&line) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let Some(action) = GameAction::parse(&line) else {
            writeln!(out, "unknown command: {}", line.trim())?;
            writeln!(out, "{}", term::HELP)?;
            continue;
        };

        let was_finished = session.phase().is_finished();
        match session.apply_action(action) {
            Ok(outcome) => writeln!(out, "{}", term::describe(&outcome))?,
            Err(err) => writeln!(out, "{}", term::describe_error(&err))?,
        }

        if !was_finished && session.phase().is_finished() {
            let stored = store.save_score(session.record(user_id))?;
            writeln!(out, "{}", serde_json::to_string(&stored.record)?)?;
            if let Some(progress) = store.progress(user_id) {
                term::render_progress(&mut out, &progress)?;
            }
        }

        term::render(&mut out, session)?;
    }

    Ok(())
}
