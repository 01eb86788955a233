//! Game session module - one player working through levels
//!
//! The session owns the current [`PuzzleState`] together with everything the
//! puzzle itself does not track: phase, score, move counter and play time.
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start/pause--> Running
//! Running --last formula completed--> Solved --advance--> Idle (level + 1)
//! Running --move budget used up-----> Exhausted
//! any phase --reset--> Idle (same level, fresh layout)
//! ```
//!
//! Each formula is worth [`FORMULA_POINTS`] the first time it is completed
//! during a level attempt. Resetting a level takes back the points earned in
//! that attempt.

use std::collections::HashSet;

use thiserror::Error;

use crate::catalog::Catalog;
use crate::generator::{GenerateError, LevelGenerator};
use crate::puzzle::{MoveError, PuzzleState};
use crate::rng::{RandomSource, SimpleRng};
use crate::types::{Compound, GameAction, GameRecord, FORMULA_POINTS};
use crate::validator::{self, Completion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Solved,
    Exhausted,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Solved => "solved",
            Phase::Exhausted => "exhausted",
        }
    }

    /// Solved or Exhausted: only reset (or advance) leaves these
    pub fn is_finished(&self) -> bool {
        matches!(self, Phase::Solved | Phase::Exhausted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("the current level is not solved yet")]
    NotSolved,
}

/// What a successful move changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Formulas completed for the first time in this attempt
    pub newly_completed: Vec<Completion>,
    pub points: u32,
    pub phase: Phase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Phase(Phase),
    Moved(MoveOutcome),
    Hint(Option<Compound>),
    Reset,
    Advanced(u32),
}

#[derive(Debug, Clone)]
pub struct GameSession<'a, R = SimpleRng> {
    generator: LevelGenerator<'a>,
    rng: R,
    puzzle: PuzzleState,
    phase: Phase,
    score: u32,
    /// Score when the current attempt began (restored on reset).
    attempt_base_score: u32,
    moves_used: u32,
    elapsed_ms: u64,
    completions: Vec<Completion>,
    /// Formulas already rewarded in this attempt.
    rewarded: HashSet<String>,
}

impl<'a, R: RandomSource> GameSession<'a, R> {
    /// Start a session at `level`
    pub fn new(catalog: &'a Catalog, level: u32, mut rng: R) -> Result<Self, GenerateError> {
        let generator = LevelGenerator::new(catalog);
        let puzzle = generator.generate(level, &mut rng)?;
        let completions = puzzle.completed();
        Ok(Self {
            generator,
            rng,
            puzzle,
            phase: Phase::Idle,
            score: 0,
            attempt_base_score: 0,
            moves_used: 0,
            elapsed_ms: 0,
            completions,
            rewarded: HashSet::new(),
        })
    }

    pub fn puzzle(&self) -> &PuzzleState {
        &self.puzzle
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.puzzle.level()
    }

    /// Running total over every level played in this session
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Points earned in the current level attempt
    pub fn level_score(&self) -> u32 {
        self.score.saturating_sub(self.attempt_base_score)
    }

    pub fn moves_used(&self) -> u32 {
        self.moves_used
    }

    pub fn moves_left(&self) -> u32 {
        self.puzzle.move_budget().saturating_sub(self.moves_used)
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn time_elapsed_secs(&self) -> u32 {
        u32::try_from(self.elapsed_ms / 1000).unwrap_or(u32::MAX)
    }

    /// Containers currently holding their target compound
    pub fn completions(&self) -> &[Completion] {
        &self.completions
    }

    pub fn completed_formulas(&self) -> Vec<&str> {
        validator::completed_formulas(&self.completions)
    }

    /// Start or resume the clock
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Idle | Phase::Paused => {
                self.set_phase(Phase::Running);
                true
            }
            _ => false,
        }
    }

    /// Running <-> Paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.set_phase(Phase::Paused);
                true
            }
            Phase::Paused => {
                self.set_phase(Phase::Running);
                true
            }
            _ => false,
        }
    }

    /// Advance the play clock (only counts while running)
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.phase == Phase::Running {
            self.elapsed_ms = self.elapsed_ms.saturating_add(u64::from(elapsed_ms));
        }
    }

    /// Move the top element of `from` onto `to` and re-check formulas
    pub fn move_top(&mut self, from: usize, to: usize) -> Result<MoveOutcome, MoveError> {
        if self.phase != Phase::Running {
            return Err(MoveError::NotRunning);
        }
        if self.puzzle.is_container_completed(to) {
            return Err(MoveError::ContainerCompleted);
        }

        self.puzzle.move_top(from, to)?;
        self.moves_used += 1;
        self.completions = self.puzzle.completed();

        let newly_completed: Vec<Completion> = self
            .completions
            .iter()
            .filter(|c| self.rewarded.insert(c.compound.formula.clone()))
            .cloned()
            .collect();
        let points = FORMULA_POINTS * newly_completed.len() as u32;
        self.score = self.score.saturating_add(points);

        if validator::is_solved(&self.completions, self.puzzle.active_compounds().len()) {
            self.set_phase(Phase::Solved);
        } else if self.moves_used >= self.puzzle.move_budget() {
            self.set_phase(Phase::Exhausted);
        }

        Ok(MoveOutcome {
            newly_completed,
            points,
            phase: self.phase,
        })
    }

    /// First active compound (catalog order) not currently completed
    pub fn hint(&self) -> Option<&Compound> {
        let done = self.completed_formulas();
        self.puzzle
            .active_compounds()
            .iter()
            .find(|c| !done.contains(&c.formula.as_str()))
    }

    /// Regenerate the current level and start the attempt over
    pub fn reset(&mut self) -> Result<(), GenerateError> {
        let level = self.puzzle.level();
        self.load_level(level)?;
        self.score = self.attempt_base_score;
        Ok(())
    }

    /// Move on to the next level; only allowed once the current one is solved
    pub fn advance(&mut self) -> Result<u32, SessionError> {
        if self.phase != Phase::Solved {
            return Err(SessionError::NotSolved);
        }
        let next = self.puzzle.level() + 1;
        self.load_level(next)?;
        self.attempt_base_score = self.score;
        Ok(next)
    }

    /// Finished-game record for the progress store
    ///
    /// Every field describes the current level attempt only, so saving one
    /// record per level never counts earlier levels twice.
    pub fn record(&self, user_id: u64) -> GameRecord {
        GameRecord {
            user_id,
            level: self.puzzle.level(),
            score: self.level_score(),
            time_elapsed: self.time_elapsed_secs(),
            moves_used: self.moves_used,
            max_moves: self.puzzle.move_budget(),
            completed_formulas: self
                .completed_formulas()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn apply_action(&mut self, action: GameAction) -> Result<ActionOutcome, SessionError> {
        match action {
            GameAction::Start => {
                self.start();
                Ok(ActionOutcome::Phase(self.phase))
            }
            GameAction::Pause => {
                self.toggle_pause();
                Ok(ActionOutcome::Phase(self.phase))
            }
            GameAction::Move { from, to } => Ok(ActionOutcome::Moved(self.move_top(from, to)?)),
            GameAction::Hint => Ok(ActionOutcome::Hint(self.hint().cloned())),
            GameAction::Reset => {
                self.reset()?;
                Ok(ActionOutcome::Reset)
            }
            GameAction::NextLevel => Ok(ActionOutcome::Advanced(self.advance()?)),
        }
    }

    fn load_level(&mut self, level: u32) -> Result<(), GenerateError> {
        self.puzzle = self.generator.generate(level, &mut self.rng)?;
        self.completions = self.puzzle.completed();
        self.rewarded.clear();
        self.moves_used = 0;
        self.elapsed_ms = 0;
        self.set_phase(Phase::Idle);
        Ok(())
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::info!(
                "level {}: {} -> {}",
                self.puzzle.level(),
                self.phase.as_str(),
                phase.as_str()
            );
            self.phase = phase;
        }
    }
}
