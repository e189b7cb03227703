use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Maximum number of characters in an atom type symbol.
pub const MAX_SYMBOL_LEN: usize = 4;

#[derive(Debug, Error, PartialEq)]
pub enum TypeTableError {
    #[error("Atom type symbol '{0}' is empty or longer than {MAX_SYMBOL_LEN} characters")]
    InvalidSymbol(String),
    #[error("Atom type '{symbol}' has an out-of-range {field}: {value}")]
    InvalidParameter {
        symbol: String,
        field: &'static str,
        value: f64,
    },
    #[error("Atom type '{0}' is defined more than once")]
    DuplicateSymbol(String),
}

/// Mass, charge and Lennard-Jones parameters for one atom type.
///
/// The charge is carried through parsing and snapshots but no energy term reads it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AtomTypeParameters {
    #[serde(skip)]
    pub symbol: String,
    pub mass: f64,
    #[serde(default)]
    pub charge: f64,
    pub sigma: f64,
    pub epsilon: f64,
}

impl AtomTypeParameters {
    pub fn new(symbol: &str, mass: f64, charge: f64, sigma: f64, epsilon: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            mass,
            charge,
            sigma,
            epsilon,
        }
    }

    /// Checks the invariants every atom must satisfy before an energy call.
    pub fn validate(&self) -> Result<(), TypeTableError> {
        if self.symbol.is_empty() || self.symbol.chars().count() > MAX_SYMBOL_LEN {
            return Err(TypeTableError::InvalidSymbol(self.symbol.clone()));
        }
        let checks = [
            ("mass", self.mass),
            ("sigma", self.sigma),
            ("epsilon", self.epsilon),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 || (field == "sigma" && value == 0.0) {
                return Err(TypeTableError::InvalidParameter {
                    symbol: self.symbol.clone(),
                    field,
                    value,
                });
            }
        }
        if !self.charge.is_finite() {
            return Err(TypeTableError::InvalidParameter {
                symbol: self.symbol.clone(),
                field: "charge",
                value: self.charge,
            });
        }
        Ok(())
    }
}

/// Symbol-keyed table of atom types.
///
/// Lookups are case-insensitive. Atoms copy their parameters out of the table when they are
/// typed, so replacing an entry later never changes atoms that were already built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomTypeTable {
    entries: HashMap<String, AtomTypeParameters>,
    order: Vec<String>,
}

impl AtomTypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, params: AtomTypeParameters) -> Result<(), TypeTableError> {
        params.validate()?;
        let key = params.symbol.to_ascii_uppercase();
        if self.entries.contains_key(&key) {
            return Err(TypeTableError::DuplicateSymbol(params.symbol));
        }
        self.order.push(key.clone());
        self.entries.insert(key, params);
        Ok(())
    }

    pub fn get(&self, symbol: &str) -> Option<&AtomTypeParameters> {
        self.entries.get(&symbol.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the types in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &AtomTypeParameters> {
        self.order.iter().filter_map(|key| self.entries.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argon() -> AtomTypeParameters {
        AtomTypeParameters::new("Ar", 39.948, 0.0, 3.405, 0.238)
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut table = AtomTypeTable::new();
        table.insert(argon()).unwrap();
        assert_eq!(table.get("AR").unwrap().sigma, 3.405);
        assert_eq!(table.get("ar").unwrap().symbol, "Ar");
        assert!(table.get("Ne").is_none());
    }

    #[test]
    fn duplicate_symbols_are_rejected_regardless_of_case() {
        let mut table = AtomTypeTable::new();
        table.insert(argon()).unwrap();
        let result = table.insert(AtomTypeParameters::new("AR", 1.0, 0.0, 1.0, 1.0));
        assert_eq!(result, Err(TypeTableError::DuplicateSymbol("AR".into())));
    }

    #[test]
    fn symbols_longer_than_four_characters_are_rejected() {
        let params = AtomTypeParameters::new("ARGON", 1.0, 0.0, 1.0, 1.0);
        assert!(matches!(
            params.validate(),
            Err(TypeTableError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn non_finite_parameters_are_rejected() {
        let params = AtomTypeParameters::new("X", 1.0, 0.0, f64::NAN, 1.0);
        assert!(matches!(
            params.validate(),
            Err(TypeTableError::InvalidParameter { field: "sigma", .. })
        ));
    }

    #[test]
    fn zero_sigma_is_rejected() {
        let mut table = AtomTypeTable::new();
        let result = table.insert(AtomTypeParameters::new("X", 1.0, 0.0, 0.0, 1.0));
        assert!(matches!(
            result,
            Err(TypeTableError::InvalidParameter { field: "sigma", .. })
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn zero_epsilon_is_accepted() {
        let params = AtomTypeParameters::new("X", 1.0, 0.0, 1.0, 0.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut table = AtomTypeTable::new();
        table.insert(AtomTypeParameters::new("Xe", 1.0, 0.0, 1.0, 1.0)).unwrap();
        table.insert(argon()).unwrap();
        let symbols: Vec<_> = table.iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["Xe", "Ar"]);
        assert_eq!(table.len(), 2);
    }
}
