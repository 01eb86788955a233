//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data: the catalog, generator, validator, session and
//! progress store all speak in terms of these values.
//!
//! # Tuning Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_CAPACITY` | 3 | Smallest container capacity, even at level 1 |
//! | `FREE_CONTAINERS` | 2 | Containers without a target, used for maneuvering |
//! | `MOVE_BUDGET_FLOOR` | 5 | Smallest move budget for any level |
//! | `FORMULA_POINTS` | 100 | Points for completing a formula the first time in a level |
//! | `DEFAULT_TOP_SCORES` | 10 | Leaderboard length when no limit is given |
//!
//! # Move Budget
//!
//! The move budget scales with the number of elements in the level and with
//! the level itself:
//!
//! ```text
//! budget = max(ceil(total * 1.1 * (1 + (level - 1) * 0.1)), 5)
//! ```
//!
//! It is computed with integer arithmetic (`total * 11 * (9 + level) / 100`,
//! rounded up) so that values such as `50 * 1.1` never pick up floating point
//! error.
//!
//! # Examples
//!
//! ```
//! use chem_sort_types::{Compound, CompoundRequirement, GameAction};
//!
//! let water = Compound::new(
//!     "H₂O",
//!     "Water",
//!     vec![CompoundRequirement::new("H", 2), CompoundRequirement::new("O", 1)],
//!     1,
//! );
//! assert_eq!(water.total_count(), 3);
//! assert!(water.is_active_at(1));
//!
//! // Containers are numbered from 1 on the command line.
//! assert_eq!(GameAction::parse("move 1 3"), Some(GameAction::Move { from: 0, to: 2 }));
//! ```

use serde::{Deserialize, Serialize};

/// Smallest container capacity (3)
pub const MIN_CAPACITY: usize = 3;

/// Containers generated on top of one per active compound (2)
pub const FREE_CONTAINERS: usize = 2;

/// Smallest move budget for any level (5)
pub const MOVE_BUDGET_FLOOR: u32 = 5;

/// Points awarded the first time a formula is completed within a level (100)
pub const FORMULA_POINTS: u32 = 100;

/// Default leaderboard length (10)
pub const DEFAULT_TOP_SCORES: usize = 10;

/// Level a brand new player starts at (1)
pub const FIRST_LEVEL: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuning_defaults() {
        assert_eq!(MIN_CAPACITY, 3);
        assert_eq!(FREE_CONTAINERS, 2);
        assert_eq!(MOVE_BUDGET_FLOOR, 5);
        assert_eq!(FORMULA_POINTS, 100);
        assert_eq!(DEFAULT_TOP_SCORES, 10);
    }

    #[test]
    fn test_compound_total_count() {
        let glucose = Compound::new(
            "C₆H₁₂O₆",
            "Glucose",
            vec![
                CompoundRequirement::new("C", 6),
                CompoundRequirement::new("H", 12),
                CompoundRequirement::new("O", 6),
            ],
            8,
        );
        assert_eq!(glucose.total_count(), 24);
        assert_eq!(glucose.required_count("H"), 12);
        assert_eq!(glucose.required_count("N"), 0);
        assert!(!glucose.is_active_at(7));
        assert!(glucose.is_active_at(8));
        assert!(glucose.is_active_at(9));
    }

    #[test]
    fn test_compound_json_shape() {
        let json = r#"{"formula":"NaCl","name":"Sodium Chloride","elements":[{"symbol":"Na","count":1},{"symbol":"Cl","count":1}],"level":1}"#;
        let salt: Compound = serde_json::from_str(json).unwrap();
        assert_eq!(salt.formula, "NaCl");
        assert_eq!(salt.elements.len(), 2);
        assert_eq!(salt.total_count(), 2);
    }

    #[test]
    fn test_element_json_uses_camel_case() {
        let na = Element::new("Na", "Sodium", 11, "#FFD93D");
        let v = serde_json::to_value(&na).unwrap();
        assert_eq!(v["atomicNumber"], 11);
        assert_eq!(v["symbol"], "Na");
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(GameAction::parse("start"), Some(GameAction::Start));
        assert_eq!(GameAction::parse("  PAUSE "), Some(GameAction::Pause));
        assert_eq!(GameAction::parse("h"), Some(GameAction::Hint));
        assert_eq!(GameAction::parse("reset"), Some(GameAction::Reset));
        assert_eq!(GameAction::parse("next"), Some(GameAction::NextLevel));
        assert_eq!(GameAction::parse("2 5"), Some(GameAction::Move { from: 1, to: 4 }));
        assert_eq!(GameAction::parse("m 1 2"), Some(GameAction::Move { from: 0, to: 1 }));
        // Container numbers start at 1.
        assert_eq!(GameAction::parse("move 0 1"), None);
        assert_eq!(GameAction::parse("move 1"), None);
        assert_eq!(GameAction::parse("move 1 2 3"), None);
        assert_eq!(GameAction::parse("dance"), None);
    }

    #[test]
    fn test_action_as_str() {
        assert_eq!(GameAction::Start.as_str(), "start");
        assert_eq!(GameAction::Move { from: 0, to: 1 }.as_str(), "move");
        assert_eq!(GameAction::NextLevel.as_str(), "next");
    }

    #[test]
    fn test_game_record_json_uses_camel_case() {
        let record = GameRecord {
            user_id: 7,
            level: 2,
            score: 300,
            time_elapsed: 42,
            moves_used: 11,
            max_moves: 20,
            completed_formulas: vec!["H₂O".to_string()],
        };
        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["userId"], 7);
        assert_eq!(v["timeElapsed"], 42);
        assert_eq!(v["movesUsed"], 11);
        assert_eq!(v["maxMoves"], 20);
        assert_eq!(v["completedFormulas"][0], "H₂O");
    }
}

/// A chemical element as it appears in the catalog
///
/// Identity is the `symbol`; two elements with the same symbol are the same
/// element as far as formula matching is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub symbol: String,
    pub name: String,
    pub atomic_number: u8,
    /// Display color as `#RRGGBB`.
    pub color: String,
}

impl Element {
    pub fn new(symbol: &str, name: &str, atomic_number: u8, color: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            atomic_number,
            color: color.to_string(),
        }
    }

    /// Parse the display color into RGB components.
    ///
    /// Returns `None` for anything that is not `#RRGGBB`.
    ///
    /// ```
    /// use chem_sort_types::Element;
    ///
    /// let o = Element::new("O", "Oxygen", 8, "#FF3838");
    /// assert_eq!(o.rgb(), Some((0xFF, 0x38, 0x38)));
    /// ```
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

/// One line of a compound's recipe: `count` copies of the element `symbol`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompoundRequirement {
    pub symbol: String,
    pub count: u32,
}

impl CompoundRequirement {
    pub fn new(symbol: &str, count: u32) -> Self {
        Self {
            symbol: symbol.to_string(),
            count,
        }
    }
}

/// A target compound
///
/// `formula` is the unique id (e.g. `"H₂O"`), `elements` is the required
/// multiset, and `level` is the first difficulty level the compound appears at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Compound {
    pub formula: String,
    pub name: String,
    pub elements: Vec<CompoundRequirement>,
    pub level: u32,
}

impl Compound {
    pub fn new(formula: &str, name: &str, elements: Vec<CompoundRequirement>, level: u32) -> Self {
        Self {
            formula: formula.to_string(),
            name: name.to_string(),
            elements,
            level,
        }
    }

    /// Total number of element instances the compound needs
    pub fn total_count(&self) -> usize {
        self.elements.iter().map(|r| r.count as usize).sum()
    }

    /// Required count for a symbol (0 if the compound does not use it)
    pub fn required_count(&self, symbol: &str) -> u32 {
        self.elements
            .iter()
            .find(|r| r.symbol == symbol)
            .map_or(0, |r| r.count)
    }

    /// Whether the compound is part of a level generated at `level`
    pub fn is_active_at(&self, level: u32) -> bool {
        self.level <= level
    }
}

/// Player actions driving a game session
///
/// `Move` indices are 0-based container positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Start (or resume) the clock
    Start,
    /// Toggle pause state
    Pause,
    /// Lift the top element of `from` and drop it onto `to`
    Move { from: usize, to: usize },
    /// Ask for the next formula to work on
    Hint,
    /// Regenerate the current level
    Reset,
    /// Advance to the next level after solving the current one
    NextLevel,
}

impl GameAction {
    /// Parse a command line typed by the player (case-insensitive)
    ///
    /// Moves are written `move A B`, `m A B` or just `A B`, with containers
    /// numbered from 1.
    pub fn parse(line: &str) -> Option<Self> {
        let lower = line.trim().to_lowercase();
        let mut words = lower.split_whitespace();
        let first = words.next()?;

        let simple = match first {
            "start" | "s" => Some(GameAction::Start),
            "pause" | "p" => Some(GameAction::Pause),
            "hint" | "h" => Some(GameAction::Hint),
            "reset" | "r" => Some(GameAction::Reset),
            "next" | "n" => Some(GameAction::NextLevel),
            _ => None,
        };
        if let Some(action) = simple {
            return if words.next().is_none() {
                Some(action)
            } else {
                None
            };
        }

        let numbers: Vec<&str> = if first == "move" || first == "m" {
            words.collect()
        } else {
            std::iter::once(first).chain(words).collect()
        };
        let [from, to] = numbers.as_slice() else {
            return None;
        };
        let from = from.parse::<usize>().ok()?.checked_sub(1)?;
        let to = to.parse::<usize>().ok()?.checked_sub(1)?;
        Some(GameAction::Move { from, to })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Start => "start",
            GameAction::Pause => "pause",
            GameAction::Move { .. } => "move",
            GameAction::Hint => "hint",
            GameAction::Reset => "reset",
            GameAction::NextLevel => "next",
        }
    }
}

/// A finished-game record handed to the progress store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub user_id: u64,
    pub level: u32,
    pub score: u32,
    /// Seconds of play time.
    pub time_elapsed: u32,
    pub moves_used: u32,
    pub max_moves: u32,
    /// Formula ids completed in this game.
    pub completed_formulas: Vec<String>,
}
