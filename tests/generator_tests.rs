//! Generator tests - level layout properties over every level and many seeds

use std::collections::HashMap;

use chem_sort::core::{move_budget, Catalog, Container, LevelGenerator, PuzzleState, SimpleRng};
use chem_sort::types::{Compound, CompoundRequirement, Element};

fn multiset_of_containers(containers: &[Container]) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for c in containers {
        for e in c.elements() {
            *counts.entry(e.symbol.clone()).or_insert(0) += 1;
        }
    }
    counts
}

fn multiset_of_compounds(compounds: &[Compound]) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for compound in compounds {
        for req in &compound.elements {
            *counts.entry(req.symbol.clone()).or_insert(0) += req.count;
        }
    }
    counts
}

fn generate_all(catalog: &Catalog) -> Vec<PuzzleState> {
    let generator = LevelGenerator::new(catalog);
    let mut out = Vec::new();
    for level in 1..=12 {
        for seed in [0u64, 1, 7, 12345, 987_654_321] {
            out.push(generator.generate(level, &mut SimpleRng::new(seed)).unwrap());
        }
    }
    out
}

#[test]
fn test_conservation() {
    let catalog = Catalog::builtin().unwrap();
    for puzzle in generate_all(&catalog) {
        assert_eq!(
            multiset_of_containers(puzzle.containers()),
            multiset_of_compounds(puzzle.active_compounds()),
            "level {}",
            puzzle.level()
        );
    }
}

#[test]
fn test_capacity_bound() {
    let catalog = Catalog::builtin().unwrap();
    for puzzle in generate_all(&catalog) {
        let largest = puzzle
            .active_compounds()
            .iter()
            .map(Compound::total_count)
            .max()
            .unwrap();
        assert!(puzzle.capacity() >= 3);
        assert!(puzzle.capacity() >= largest);
        for c in puzzle.containers() {
            assert!(c.len() <= puzzle.capacity(), "level {}", puzzle.level());
            assert_eq!(c.capacity(), puzzle.capacity());
        }
    }
}

#[test]
fn test_container_count_and_targets() {
    let catalog = Catalog::builtin().unwrap();
    for puzzle in generate_all(&catalog) {
        let active = puzzle.active_compounds();
        assert_eq!(puzzle.containers().len(), active.len() + 2);
        assert_eq!(puzzle.container_targets().len(), puzzle.containers().len());

        for (i, target) in puzzle.container_targets().iter().enumerate() {
            if i < active.len() {
                assert_eq!(target.as_ref(), Some(&active[i]));
            } else {
                assert!(target.is_none());
            }
        }
    }
}

#[test]
fn test_active_compounds_follow_level() {
    let catalog = Catalog::builtin().unwrap();
    let generator = LevelGenerator::new(&catalog);

    let l3 = generator.generate(3, &mut SimpleRng::new(1)).unwrap();
    assert_eq!(l3.active_compounds().len(), 8);
    assert!(l3.active_compounds().iter().all(|c| c.level <= 3));

    // Past the last catalog level everything stays active.
    let l15 = generator.generate(15, &mut SimpleRng::new(1)).unwrap();
    assert_eq!(l15.active_compounds().len(), 22);
}

#[test]
fn test_round_robin_keeps_containers_even() {
    let catalog = Catalog::builtin().unwrap();
    for puzzle in generate_all(&catalog) {
        let n = puzzle.containers().len();
        let per = puzzle.total_elements().div_ceil(n);
        let min = puzzle.total_elements() / n;
        for c in puzzle.containers() {
            assert!(c.len() <= per);
            assert!(c.len() >= min);
        }
    }
}

#[test]
fn test_move_budget_floor_level_one() {
    let catalog = Catalog::builtin().unwrap();
    let puzzle = LevelGenerator::new(&catalog)
        .generate(1, &mut SimpleRng::new(5))
        .unwrap();
    let total = puzzle.total_elements();
    assert_eq!(total, 8);

    let expected = ((total as f64 * 1.1).ceil() as u32).max(5);
    assert_eq!(puzzle.move_budget(), expected);
    assert_eq!(puzzle.move_budget(), 9);
}

#[test]
fn test_move_budget_grows_with_level() {
    let catalog = Catalog::builtin().unwrap();
    let generator = LevelGenerator::new(&catalog);
    let mut previous = 0;
    for level in 1..=10 {
        let puzzle = generator.generate(level, &mut SimpleRng::new(3)).unwrap();
        assert_eq!(
            puzzle.move_budget(),
            move_budget(puzzle.total_elements(), level)
        );
        assert!(puzzle.move_budget() > previous);
        previous = puzzle.move_budget();
    }
}

#[test]
fn test_seeds_change_layout() {
    let catalog = Catalog::builtin().unwrap();
    let generator = LevelGenerator::new(&catalog);
    let layouts: Vec<PuzzleState> = (0..10u64)
        .map(|seed| generator.generate(5, &mut SimpleRng::new(seed)).unwrap())
        .collect();
    assert!(layouts.iter().any(|p| p != &layouts[0]));
}

#[test]
fn test_synthetic_catalog() {
    let catalog = Catalog::new(
        vec![
            Element::new("A", "Alpha", 1, "#111111"),
            Element::new("B", "Beta", 2, "#222222"),
        ],
        vec![
            Compound::new("A₅", "Five A", vec![CompoundRequirement::new("A", 5)], 1),
            Compound::new("AB", "Pair", vec![
                CompoundRequirement::new("A", 1),
                CompoundRequirement::new("B", 1),
            ], 1),
        ],
    )
    .unwrap();

    let puzzle = LevelGenerator::new(&catalog)
        .generate(1, &mut SimpleRng::new(11))
        .unwrap();
    assert_eq!(puzzle.capacity(), 5);
    assert_eq!(puzzle.containers().len(), 4);
    assert_eq!(puzzle.total_elements(), 7);
    assert_eq!(puzzle.move_budget(), 8);
}
