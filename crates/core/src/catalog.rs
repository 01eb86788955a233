//! Catalog module - elements and target compounds
//!
//! A [`Catalog`] is built once, validated, and then only read. Every compound
//! must reference known elements with positive counts; anything else is a
//! configuration error and the catalog is never constructed.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use thiserror::Error;

use crate::types::{Compound, CompoundRequirement, Element};

/// Configuration faults found while building a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("element symbol {0} is defined more than once")]
    DuplicateElement(String),
    #[error("compound {0} is defined more than once")]
    DuplicateFormula(String),
    #[error("compound {formula} references unknown element {symbol}")]
    UnknownSymbol { formula: String, symbol: String },
    #[error("compound {formula} requires zero {symbol}")]
    ZeroCount { formula: String, symbol: String },
    #[error("compound {formula} lists {symbol} more than once")]
    DuplicateRequirement { formula: String, symbol: String },
    #[error("compound {0} has no element requirements")]
    EmptyCompound(String),
    #[error("compound {0} has level 0 (levels start at 1)")]
    InvalidLevel(String),
    #[error("catalog json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validated, immutable element and compound tables
#[derive(Debug, Clone)]
pub struct Catalog {
    elements: Vec<Element>,
    by_symbol: HashMap<String, usize>,
    compounds: Vec<Compound>,
}

#[derive(Deserialize)]
struct CatalogFile {
    elements: Vec<Element>,
    compounds: Vec<Compound>,
}

impl Catalog {
    /// Build a catalog, rejecting any inconsistent entry
    pub fn new(elements: Vec<Element>, compounds: Vec<Compound>) -> Result<Self, CatalogError> {
        let mut by_symbol = HashMap::with_capacity(elements.len());
        for (i, element) in elements.iter().enumerate() {
            if by_symbol.insert(element.symbol.clone(), i).is_some() {
                return Err(CatalogError::DuplicateElement(element.symbol.clone()));
            }
        }

        let mut formulas = HashSet::with_capacity(compounds.len());
        for compound in &compounds {
            if !formulas.insert(compound.formula.as_str()) {
                return Err(CatalogError::DuplicateFormula(compound.formula.clone()));
            }
            validate_compound(compound, &by_symbol)?;
        }

        Ok(Self {
            elements,
            by_symbol,
            compounds,
        })
    }

    /// The catalog shipped with the game: 23 elements, 22 compounds over 10 levels
    pub fn builtin() -> Result<Self, CatalogError> {
        let elements = BUILTIN_ELEMENTS
            .iter()
            .map(|&(symbol, name, z, color)| Element::new(symbol, name, z, color))
            .collect();
        let compounds = BUILTIN_COMPOUNDS
            .iter()
            .map(|&(formula, name, reqs, level)| {
                let reqs = reqs
                    .iter()
                    .map(|&(symbol, count)| CompoundRequirement::new(symbol, count))
                    .collect();
                Compound::new(formula, name, reqs, level)
            })
            .collect();
        Self::new(elements, compounds)
    }

    /// Load `{"elements": [...], "compounds": [...]}`
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.elements, file.compounds)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, symbol: &str) -> Option<&Element> {
        self.by_symbol.get(symbol).map(|&i| &self.elements[i])
    }

    pub fn compounds(&self) -> &[Compound] {
        &self.compounds
    }

    pub fn compound(&self, formula: &str) -> Option<&Compound> {
        self.compounds.iter().find(|c| c.formula == formula)
    }

    /// Compounds unlocked at `level`, in catalog order
    pub fn active_compounds(&self, level: u32) -> impl Iterator<Item = &Compound> + '_ {
        self.compounds.iter().filter(move |c| c.is_active_at(level))
    }

    /// Highest level any compound is introduced at (0 for an empty catalog)
    pub fn max_level(&self) -> u32 {
        self.compounds.iter().map(|c| c.level).max().unwrap_or(0)
    }
}

fn validate_compound(
    compound: &Compound,
    by_symbol: &HashMap<String, usize>,
) -> Result<(), CatalogError> {
    if compound.level == 0 {
        return Err(CatalogError::InvalidLevel(compound.formula.clone()));
    }
    if compound.elements.is_empty() {
        return Err(CatalogError::EmptyCompound(compound.formula.clone()));
    }

    let mut seen = HashSet::with_capacity(compound.elements.len());
    for req in &compound.elements {
        if !by_symbol.contains_key(&req.symbol) {
            return Err(CatalogError::UnknownSymbol {
                formula: compound.formula.clone(),
                symbol: req.symbol.clone(),
            });
        }
        if req.count == 0 {
            return Err(CatalogError::ZeroCount {
                formula: compound.formula.clone(),
                symbol: req.symbol.clone(),
            });
        }
        if !seen.insert(req.symbol.as_str()) {
            return Err(CatalogError::DuplicateRequirement {
                formula: compound.formula.clone(),
                symbol: req.symbol.clone(),
            });
        }
    }
    Ok(())
}

const BUILTIN_ELEMENTS: &[(&str, &str, u8, &str)] = &[
    ("H", "Hydrogen", 1, "#FF6B6B"),
    ("He", "Helium", 2, "#4ECDC4"),
    ("Li", "Lithium", 3, "#45B7D1"),
    ("Be", "Beryllium", 4, "#96CEB4"),
    ("B", "Boron", 5, "#FECA57"),
    ("C", "Carbon", 6, "#3D3D3D"),
    ("N", "Nitrogen", 7, "#5F4FBF"),
    ("O", "Oxygen", 8, "#FF3838"),
    ("F", "Fluorine", 9, "#FF9FF3"),
    ("Ne", "Neon", 10, "#FFB8B8"),
    ("Na", "Sodium", 11, "#FFD93D"),
    ("Mg", "Magnesium", 12, "#A8E6CF"),
    ("Al", "Aluminum", 13, "#C7C7C7"),
    ("Si", "Silicon", 14, "#8B4513"),
    ("P", "Phosphorus", 15, "#FFA500"),
    ("S", "Sulfur", 16, "#FFFF00"),
    ("Cl", "Chlorine", 17, "#90EE90"),
    ("Ar", "Argon", 18, "#E6E6FA"),
    ("K", "Potassium", 19, "#DDA0DD"),
    ("Ca", "Calcium", 20, "#FFF8DC"),
    ("Fe", "Iron", 26, "#B87333"),
    ("Cu", "Copper", 29, "#B87D2C"),
    ("Ba", "Barium", 56, "#00C851"),
];

type BuiltinCompound = (&'static str, &'static str, &'static [(&'static str, u32)], u32);

const BUILTIN_COMPOUNDS: &[BuiltinCompound] = &[
    // Level 1
    ("H₂O", "Water", &[("H", 2), ("O", 1)], 1),
    ("CO₂", "Carbon Dioxide", &[("C", 1), ("O", 2)], 1),
    ("NaCl", "Sodium Chloride", &[("Na", 1), ("Cl", 1)], 1),
    // Level 2
    ("NH₃", "Ammonia", &[("N", 1), ("H", 3)], 2),
    ("CH₄", "Methane", &[("C", 1), ("H", 4)], 2),
    ("HCl", "Hydrogen Chloride", &[("H", 1), ("Cl", 1)], 2),
    // Level 3
    ("CaCO₃", "Calcium Carbonate", &[("Ca", 1), ("C", 1), ("O", 3)], 3),
    ("NaOH", "Sodium Hydroxide", &[("Na", 1), ("O", 1), ("H", 1)], 3),
    // Level 4
    ("MgO", "Magnesium Oxide", &[("Mg", 1), ("O", 1)], 4),
    ("Al₂O₃", "Aluminum Oxide", &[("Al", 2), ("O", 3)], 4),
    // Level 5
    ("H₂SO₄", "Sulfuric Acid", &[("H", 2), ("S", 1), ("O", 4)], 5),
    ("KNO₃", "Potassium Nitrate", &[("K", 1), ("N", 1), ("O", 3)], 5),
    // Level 6
    ("C₂H₆", "Ethane", &[("C", 2), ("H", 6)], 6),
    ("Ca(OH)₂", "Calcium Hydroxide", &[("Ca", 1), ("O", 2), ("H", 2)], 6),
    // Level 7
    ("Fe₂O₃", "Iron(III) Oxide", &[("Fe", 2), ("O", 3)], 7),
    ("CuSO₄", "Copper Sulfate", &[("Cu", 1), ("S", 1), ("O", 4)], 7),
    // Level 8
    ("C₆H₁₂O₆", "Glucose", &[("C", 6), ("H", 12), ("O", 6)], 8),
    ("Mg(NO₃)₂", "Magnesium Nitrate", &[("Mg", 1), ("N", 2), ("O", 6)], 8),
    // Level 9
    ("C₂H₅OH", "Ethanol", &[("C", 2), ("H", 6), ("O", 1)], 9),
    ("Ba(ClO₃)₂", "Barium Chlorate", &[("Ba", 1), ("Cl", 2), ("O", 6)], 9),
    // Level 10
    ("C₃H₈", "Propane", &[("C", 3), ("H", 8)], 10),
    ("Al₂(SO₄)₃", "Aluminum Sulfate", &[("Al", 2), ("S", 3), ("O", 12)], 10),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn h_o() -> Vec<Element> {
        vec![
            Element::new("H", "Hydrogen", 1, "#FF6B6B"),
            Element::new("O", "Oxygen", 8, "#FF3838"),
        ]
    }

    fn water() -> Compound {
        Compound::new(
            "H₂O",
            "Water",
            vec![CompoundRequirement::new("H", 2), CompoundRequirement::new("O", 1)],
            1,
        )
    }

    #[test]
    fn test_builtin_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.elements().len(), 23);
        assert_eq!(catalog.compounds().len(), 22);
        assert_eq!(catalog.max_level(), 10);
    }

    #[test]
    fn test_builtin_level_counts() {
        let catalog = Catalog::builtin().unwrap();
        let expected = [3, 6, 8, 10, 12, 14, 16, 18, 20, 22];
        for (i, &n) in expected.iter().enumerate() {
            let level = i as u32 + 1;
            assert_eq!(catalog.active_compounds(level).count(), n, "level {}", level);
        }
    }

    #[test]
    fn test_element_lookup() {
        let catalog = Catalog::builtin().unwrap();
        let ba = catalog.element("Ba").unwrap();
        assert_eq!(ba.atomic_number, 56);
        assert_eq!(ba.name, "Barium");
        assert!(catalog.element("Xx").is_none());
        // Symbols are case-sensitive.
        assert!(catalog.element("CL").is_none());
    }

    #[test]
    fn test_compound_lookup() {
        let catalog = Catalog::builtin().unwrap();
        let salt = catalog.compound("NaCl").unwrap();
        assert_eq!(salt.name, "Sodium Chloride");
        assert!(catalog.compound("XeF₄").is_none());
    }

    #[test]
    fn test_active_compounds_preserve_order() {
        let catalog = Catalog::builtin().unwrap();
        let formulas: Vec<&str> = catalog
            .active_compounds(2)
            .map(|c| c.formula.as_str())
            .collect();
        assert_eq!(formulas, vec!["H₂O", "CO₂", "NaCl", "NH₃", "CH₄", "HCl"]);
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let bad = Compound::new("NaCl", "Salt", vec![CompoundRequirement::new("Na", 1)], 1);
        let err = Catalog::new(h_o(), vec![bad]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownSymbol { ref symbol, .. } if symbol == "Na"
        ));
    }

    #[test]
    fn test_zero_count_rejected() {
        let bad = Compound::new(
            "HO",
            "Broken",
            vec![CompoundRequirement::new("H", 0), CompoundRequirement::new("O", 1)],
            1,
        );
        let err = Catalog::new(h_o(), vec![bad]).unwrap_err();
        assert!(matches!(err, CatalogError::ZeroCount { .. }));
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut elements = h_o();
        elements.push(Element::new("H", "Again", 1, "#000000"));
        assert!(matches!(
            Catalog::new(elements, vec![]).unwrap_err(),
            CatalogError::DuplicateElement(_)
        ));

        assert!(matches!(
            Catalog::new(h_o(), vec![water(), water()]).unwrap_err(),
            CatalogError::DuplicateFormula(_)
        ));

        let doubled = Compound::new(
            "HH",
            "Doubled",
            vec![CompoundRequirement::new("H", 1), CompoundRequirement::new("H", 1)],
            1,
        );
        assert!(matches!(
            Catalog::new(h_o(), vec![doubled]).unwrap_err(),
            CatalogError::DuplicateRequirement { .. }
        ));
    }

    #[test]
    fn test_level_zero_and_empty_rejected() {
        let mut early = water();
        early.level = 0;
        assert!(matches!(
            Catalog::new(h_o(), vec![early]).unwrap_err(),
            CatalogError::InvalidLevel(_)
        ));

        let empty = Compound::new("∅", "Nothing", vec![], 1);
        assert!(matches!(
            Catalog::new(h_o(), vec![empty]).unwrap_err(),
            CatalogError::EmptyCompound(_)
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r##"{
            "elements": [
                {"symbol": "H", "name": "Hydrogen", "atomicNumber": 1, "color": "#FF6B6B"},
                {"symbol": "O", "name": "Oxygen", "atomicNumber": 8, "color": "#FF3838"}
            ],
            "compounds": [
                {"formula": "H₂O", "name": "Water", "level": 1,
                 "elements": [{"symbol": "H", "count": 2}, {"symbol": "O", "count": 1}]}
            ]
        }"##;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.compounds(), &[water()]);
        assert_eq!(catalog.element("O").unwrap().atomic_number, 8);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            Catalog::from_json("{\"elements\": []").unwrap_err(),
            CatalogError::Json(_)
        ));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new(vec![], vec![]).unwrap();
        assert_eq!(catalog.max_level(), 0);
        assert_eq!(catalog.active_compounds(5).count(), 0);
    }
}
