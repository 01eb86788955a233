//! Chemistry Sort (workspace facade crate).
//!
//! Sort element balls between test tubes until every target tube holds its
//! compound. The game logic lives in dedicated crates under `crates/`; this
//! package re-exports them as `chem_sort::{types,core,progress}` and adds the
//! terminal front end and its configuration.

pub use chem_sort_core as core;
pub use chem_sort_progress as progress;
pub use chem_sort_types as types;

pub mod config;
pub mod term;
