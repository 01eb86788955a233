//! Puzzle module - one generated level
//!
//! A [`PuzzleState`] is produced by the [`LevelGenerator`](crate::LevelGenerator)
//! and then only changed through [`PuzzleState::move_top`], which keeps the
//! top-of-stack and capacity rules. Which moves are *allowed* beyond those two
//! rules (clock running, completed containers locked) is up to the caller.

use thiserror::Error;

use crate::container::Container;
use crate::types::Compound;
use crate::validator::{self, Completion};

/// Reasons a move is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("game is not running")]
    NotRunning,
    #[error("container {0} does not exist")]
    NoSuchContainer(usize),
    #[error("source and destination are the same container")]
    SameContainer,
    #[error("source container is empty")]
    EmptySource,
    #[error("destination container is full")]
    ContainerFull,
    #[error("destination container already holds its compound")]
    ContainerCompleted,
}

impl MoveError {
    /// Stable code for front ends
    pub fn code(self) -> &'static str {
        match self {
            MoveError::NotRunning => "not_running",
            MoveError::NoSuchContainer(_) | MoveError::SameContainer | MoveError::EmptySource => {
                "invalid_move"
            }
            MoveError::ContainerFull => "container_full",
            MoveError::ContainerCompleted => "container_completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleState {
    level: u32,
    capacity: usize,
    move_budget: u32,
    containers: Vec<Container>,
    active_compounds: Vec<Compound>,
    container_targets: Vec<Option<Compound>>,
}

impl PuzzleState {
    pub(crate) fn new(
        level: u32,
        capacity: usize,
        move_budget: u32,
        containers: Vec<Container>,
        active_compounds: Vec<Compound>,
        container_targets: Vec<Option<Compound>>,
    ) -> Self {
        debug_assert_eq!(containers.len(), container_targets.len());
        Self {
            level,
            capacity,
            move_budget,
            containers,
            active_compounds,
            container_targets,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn move_budget(&self) -> u32 {
        self.move_budget
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn container(&self, index: usize) -> Option<&Container> {
        self.containers.get(index)
    }

    pub fn active_compounds(&self) -> &[Compound] {
        &self.active_compounds
    }

    pub fn container_targets(&self) -> &[Option<Compound>] {
        &self.container_targets
    }

    /// Compound container `index` must end up holding, if any
    pub fn target(&self, index: usize) -> Option<&Compound> {
        self.container_targets.get(index).and_then(Option::as_ref)
    }

    pub fn total_elements(&self) -> usize {
        self.containers.iter().map(Container::len).sum()
    }

    /// Containers currently holding their assigned compound
    pub fn completed(&self) -> Vec<Completion> {
        validator::completed(&self.containers, &self.container_targets)
    }

    pub fn is_container_completed(&self, index: usize) -> bool {
        match (self.container(index), self.target(index)) {
            (Some(container), Some(target)) => validator::matches(container.elements(), target),
            _ => false,
        }
    }

    /// Every active compound is held by its assigned container
    pub fn is_solved(&self) -> bool {
        validator::is_solved(&self.completed(), self.active_compounds.len())
    }

    /// Lift the top element of `from` and drop it onto `to`
    pub fn move_top(&mut self, from: usize, to: usize) -> Result<(), MoveError> {
        let count = self.containers.len();
        if from >= count {
            return Err(MoveError::NoSuchContainer(from));
        }
        if to >= count {
            return Err(MoveError::NoSuchContainer(to));
        }
        if from == to {
            return Err(MoveError::SameContainer);
        }
        if self.containers[from].is_empty() {
            return Err(MoveError::EmptySource);
        }
        if self.containers[to].is_full() {
            return Err(MoveError::ContainerFull);
        }

        let element = self.containers[from].pop().ok_or(MoveError::EmptySource)?;
        let pushed = self.containers[to].push(element);
        debug_assert!(pushed.is_ok(), "destination has room");
        Ok(())
    }
}
