//! Level generator - builds a fresh puzzle for a difficulty level
//!
//! Generation steps:
//!
//! 1. Take the catalog compounds unlocked at the level, in catalog order.
//! 2. Capacity is the size of the largest compound, but at least
//!    [`MIN_CAPACITY`].
//! 3. One container per compound plus [`FREE_CONTAINERS`] spare ones.
//!    Container `i` targets compound `i`; the spares have no target.
//! 4. Expand every requirement into element copies, Fisher-Yates shuffle the
//!    pool, and deal it round-robin across all containers.
//! 5. The move budget grows with the element count and the level.
//!
//! With uniform capacity the plain round-robin deal always fits:
//! `total <= compounds * capacity < containers * capacity`. The capacity-aware
//! deal in [`distribute`] covers containers that are already partly filled.

use thiserror::Error;

use crate::catalog::Catalog;
use crate::container::Container;
use crate::puzzle::PuzzleState;
use crate::rng::RandomSource;
use crate::types::{Compound, Element, FREE_CONTAINERS, MIN_CAPACITY, MOVE_BUDGET_FLOOR};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("level must be at least 1")]
    InvalidLevel,
    #[error("no compounds are unlocked at level {0}")]
    NoActiveCompounds(u32),
    #[error("catalog has no element {0}")]
    MissingElement(String),
    #[error("{elements} elements do not fit into the containers")]
    Overflow { elements: usize },
}

/// Generates puzzles from an injected catalog
#[derive(Debug, Clone, Copy)]
pub struct LevelGenerator<'a> {
    catalog: &'a Catalog,
}

impl<'a> LevelGenerator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Generate the puzzle for `level`, drawing the shuffle from `rng`
    pub fn generate<R: RandomSource>(
        &self,
        level: u32,
        rng: &mut R,
    ) -> Result<PuzzleState, GenerateError> {
        if level == 0 {
            return Err(GenerateError::InvalidLevel);
        }

        let active: Vec<Compound> = self.catalog.active_compounds(level).cloned().collect();
        if active.is_empty() {
            return Err(GenerateError::NoActiveCompounds(level));
        }

        let capacity = capacity_for(&active);
        let container_count = active.len() + FREE_CONTAINERS;

        let mut pool = self.element_pool(&active)?;
        let total = pool.len();
        rng.shuffle(&mut pool);

        let mut containers = vec![Container::new(capacity); container_count];
        distribute(pool, &mut containers)?;

        let container_targets = (0..container_count).map(|i| active.get(i).cloned()).collect();
        let budget = move_budget(total, level);

        log::debug!(
            "generated level {}: {} compounds, {} elements, {} containers of {}, budget {}",
            level,
            active.len(),
            total,
            container_count,
            capacity,
            budget
        );

        Ok(PuzzleState::new(
            level,
            capacity,
            budget,
            containers,
            active,
            container_targets,
        ))
    }

    /// Every required element copy, compound by compound
    fn element_pool(&self, compounds: &[Compound]) -> Result<Vec<Element>, GenerateError> {
        let total = compounds.iter().map(Compound::total_count).sum();
        let mut pool = Vec::with_capacity(total);
        for compound in compounds {
            for req in &compound.elements {
                let element = self
                    .catalog
                    .element(&req.symbol)
                    .ok_or_else(|| GenerateError::MissingElement(req.symbol.clone()))?;
                pool.extend(std::iter::repeat(element).take(req.count as usize).cloned());
            }
        }
        Ok(pool)
    }
}

/// Container capacity: the largest compound's size, floored at [`MIN_CAPACITY`]
pub fn capacity_for(compounds: &[Compound]) -> usize {
    compounds
        .iter()
        .map(Compound::total_count)
        .max()
        .unwrap_or(0)
        .max(MIN_CAPACITY)
}

/// `max(ceil(total * 1.1 * (1 + (level - 1) * 0.1)), MOVE_BUDGET_FLOOR)`
///
/// `1.1 * (1 + (level - 1) * 0.1)` is `11 * (9 + level) / 100`, so the budget
/// is computed exactly in integers.
pub fn move_budget(total_elements: usize, level: u32) -> u32 {
    let scaled = (total_elements as u64) * 11 * (9 + u64::from(level));
    let budget = u32::try_from(scaled.div_ceil(100)).unwrap_or(u32::MAX);
    budget.max(MOVE_BUDGET_FLOOR)
}

/// Deal `elements` across `containers`
///
/// Element `i` goes to container `i mod n` when that fits everywhere. If any
/// container would overflow, deal capacity-aware instead: each element goes to
/// the next container (round-robin from the last one used) that still has room.
pub fn distribute(elements: Vec<Element>, containers: &mut [Container]) -> Result<(), GenerateError> {
    let total = elements.len();
    let count = containers.len();
    if total == 0 {
        return Ok(());
    }
    if count == 0 {
        return Err(GenerateError::Overflow { elements: total });
    }

    let plain_fits = containers.iter().enumerate().all(|(i, c)| {
        let dealt = total / count + usize::from(i < total % count);
        c.len() + dealt <= c.capacity()
    });

    if plain_fits {
        for (i, element) in elements.into_iter().enumerate() {
            if containers[i % count].push(element).is_err() {
                return Err(GenerateError::Overflow { elements: total });
            }
        }
        return Ok(());
    }

    log::warn!(
        "round-robin deal of {} elements overflows {} containers, dealing capacity-aware",
        total,
        count
    );

    let mut cursor = 0usize;
    for element in elements {
        let slot = (0..count)
            .map(|k| (cursor + k) % count)
            .find(|&i| !containers[i].is_full())
            .ok_or(GenerateError::Overflow { elements: total })?;
        if containers[slot].push(element).is_err() {
            return Err(GenerateError::Overflow { elements: total });
        }
        cursor = slot + 1;
    }
    Ok(())
}
