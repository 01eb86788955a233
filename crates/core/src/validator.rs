//! Formula validator - exact multiset matching
//!
//! A container holds a compound when the symbols it contains, counted with
//! multiplicity, are exactly the compound's requirements: nothing missing,
//! nothing extra, no count off by one. Order inside the container is
//! irrelevant.

use std::collections::HashMap;

use crate::container::Container;
use crate::types::{Compound, Element};

/// A target-assigned container currently holding its compound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub compound: Compound,
    pub container_index: usize,
}

/// Whether `elements` is exactly the element multiset of `target`
pub fn matches(elements: &[Element], target: &Compound) -> bool {
    if elements.len() != target.total_count() {
        return false;
    }

    let mut actual: HashMap<&str, u32> = HashMap::with_capacity(target.elements.len());
    for element in elements {
        *actual.entry(element.symbol.as_str()).or_insert(0) += 1;
    }

    let mut required: HashMap<&str, u32> = HashMap::with_capacity(target.elements.len());
    for req in &target.elements {
        *required.entry(req.symbol.as_str()).or_insert(0) += req.count;
    }

    actual == required
}

/// Containers whose assigned target is currently matched
///
/// Only containers with a target are considered; a container without one never
/// counts, even if its contents happen to form a compound. Entries come out in
/// container order.
pub fn completed(containers: &[Container], targets: &[Option<Compound>]) -> Vec<Completion> {
    containers
        .iter()
        .zip(targets)
        .enumerate()
        .filter_map(|(container_index, (container, target))| {
            let target = target.as_ref()?;
            matches(container.elements(), target).then(|| Completion {
                compound: target.clone(),
                container_index,
            })
        })
        .collect()
}

/// Distinct completed formulas, in first-seen order
pub fn completed_formulas(completions: &[Completion]) -> Vec<&str> {
    let mut formulas: Vec<&str> = Vec::with_capacity(completions.len());
    for completion in completions {
        let formula = completion.compound.formula.as_str();
        if !formulas.contains(&formula) {
            formulas.push(formula);
        }
    }
    formulas
}

/// The level is solved once every active compound is completed somewhere
pub fn is_solved(completions: &[Completion], active_compounds: usize) -> bool {
    completed_formulas(completions).len() == active_compounds
}
