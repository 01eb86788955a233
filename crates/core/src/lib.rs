//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the level generator, the formula validator and the
//! session state machine. It has **no dependencies** on terminal, storage or
//! I/O, making it:
//!
//! - **Deterministic**: the same seed produces the same level layout
//! - **Testable**: catalogs are injected, so tests can use tiny synthetic ones
//! - **Portable**: runs behind any front end (terminal, web, headless)
//!
//! # Module Structure
//!
//! - [`catalog`]: validated element and compound tables, built-in data
//! - [`container`]: bounded element stack (one test tube)
//! - [`generator`]: level generation (capacity, deal, move budget)
//! - [`puzzle`]: a generated level and its move rule
//! - [`rng`]: seedable random source and Fisher-Yates shuffle
//! - [`session`]: phases, scoring, hints and game records
//! - [`validator`]: exact multiset matching of containers against compounds
//!
//! # Example
//!
//! ```
//! use chem_sort_core::{Catalog, GameSession, Phase, SimpleRng};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let mut session = GameSession::new(&catalog, 1, SimpleRng::new(12345)).unwrap();
//!
//! let puzzle = session.puzzle();
//! assert_eq!(puzzle.capacity(), 3);
//! assert_eq!(puzzle.containers().len(), 5);
//! assert_eq!(puzzle.total_elements(), 8);
//!
//! session.start();
//! assert_eq!(session.phase(), Phase::Running);
//! ```

pub mod catalog;
pub mod container;
pub mod generator;
pub mod puzzle;
pub mod rng;
pub mod session;
pub mod validator;

pub use chem_sort_types as types;

// Re-export commonly used types for convenience
pub use catalog::{Catalog, CatalogError};
pub use container::Container;
pub use generator::{capacity_for, move_budget, GenerateError, LevelGenerator};
pub use puzzle::{MoveError, PuzzleState};
pub use rng::{RandomSource, SimpleRng};
pub use session::{ActionOutcome, GameSession, MoveOutcome, Phase, SessionError};
pub use validator::{completed, matches, Completion};
