//! Terminal front end.
//!
//! Line-oriented: the whole session is re-rendered after every command, with
//! element symbols drawn in their catalog colors through crossterm. Output goes
//! to any `Write`, so tests render into a byte buffer.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};

use crate::core::{ActionOutcome, GameSession, Phase, RandomSource, SessionError};
use crate::progress::UserProgress;
use crate::types::Element;

pub const HELP: &str =
    "commands: start | pause | move A B (or A B) | hint | reset | next | quit";

/// `mm:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn is_quit(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "q" | "quit" | "exit")
}

fn element_color(element: &Element) -> Color {
    match element.rgb() {
        Some((r, g, b)) => Color::Rgb { r, g, b },
        None => Color::White,
    }
}

/// Draw the status line and every container
pub fn render<W: Write, R: RandomSource>(out: &mut W, session: &GameSession<'_, R>) -> io::Result<()> {
    let puzzle = session.puzzle();

    queue!(
        out,
        SetAttribute(Attribute::Bold),
        Print(format!(
            "Level {} | Score {} | Moves {}/{} | Time {} | {}\n",
            session.level(),
            session.score(),
            session.moves_used(),
            puzzle.move_budget(),
            format_time(session.time_elapsed_secs()),
            session.phase().as_str()
        )),
        SetAttribute(Attribute::Reset)
    )?;

    for (i, container) in puzzle.containers().iter().enumerate() {
        queue!(out, Print(format!("{:>3} [", i + 1)))?;
        for slot in 0..container.capacity() {
            if slot > 0 {
                queue!(out, Print(" "))?;
            }
            match container.elements().get(slot) {
                Some(element) => queue!(
                    out,
                    SetForegroundColor(element_color(element)),
                    Print(format!("{:<2}", element.symbol)),
                    ResetColor
                )?,
                None => queue!(out, Print(" ."))?,
            }
        }
        queue!(out, Print("]"))?;

        if let Some(target) = puzzle.target(i) {
            let done = if puzzle.is_container_completed(i) { "  done" } else { "" };
            queue!(out, Print(format!("  {} {}{}", target.formula, target.name, done)))?;
        }
        queue!(out, Print("\n"))?;
    }

    match session.phase() {
        Phase::Solved => queue!(out, Print("Level solved! Type `next` to continue.\n"))?,
        Phase::Exhausted => queue!(out, Print("Out of moves. Type `reset` to try again.\n"))?,
        Phase::Idle => queue!(out, Print("Type `start` to begin.\n"))?,
        Phase::Running | Phase::Paused => {}
    }

    out.flush()
}

pub fn describe(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Phase(phase) => format!("game is {}", phase.as_str()),
        ActionOutcome::Moved(moved) if moved.newly_completed.is_empty() => "moved".to_string(),
        ActionOutcome::Moved(moved) => {
            let formulas: Vec<&str> = moved
                .newly_completed
                .iter()
                .map(|c| c.compound.formula.as_str())
                .collect();
            format!("completed {} (+{})", formulas.join(", "), moved.points)
        }
        ActionOutcome::Hint(Some(compound)) => {
            format!("next formula: {} ({})", compound.formula, compound.name)
        }
        ActionOutcome::Hint(None) => "every formula is complete".to_string(),
        ActionOutcome::Reset => "level reset".to_string(),
        ActionOutcome::Advanced(level) => format!("welcome to level {}", level),
    }
}

pub fn describe_error(err: &SessionError) -> String {
    match err {
        SessionError::Move(e) => format!("{} ({})", e, e.code()),
        other => other.to_string(),
    }
}

pub fn render_progress<W: Write>(out: &mut W, progress: &UserProgress) -> io::Result<()> {
    let best = progress
        .best_time
        .map(format_time)
        .unwrap_or_else(|| "--:--".to_string());
    queue!(
        out,
        Print(format!(
            "games {} | total score {} | highest level {} | best time {}\n",
            progress.games_played, progress.total_score, progress.highest_level, best
        ))
    )?;
    out.flush()
}
