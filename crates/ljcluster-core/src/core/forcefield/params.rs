use crate::core::models::types::{AtomTypeParameters, AtomTypeTable, TypeTableError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeTableFile {
    types: BTreeMap<String, AtomTypeParameters>,
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid atom type in '{path}': {source}")]
    InvalidType {
        path: String,
        source: TypeTableError,
    },
}

/// Loads an [`AtomTypeTable`] from a TOML file of the form
///
/// ```toml
/// [types.Ar]
/// mass = 39.948
/// sigma = 3.405
/// epsilon = 0.238
/// charge = 0.0   # optional, carried but unused
/// ```
pub fn load_type_table(path: &Path) -> Result<AtomTypeTable, ParamLoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    parse_type_table(&content).map_err(|e| match e {
        TypeTableSourceError::Toml(source) => ParamLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source,
        },
        TypeTableSourceError::Invalid(source) => ParamLoadError::InvalidType {
            path: path.to_string_lossy().to_string(),
            source,
        },
    })
}

enum TypeTableSourceError {
    Toml(toml::de::Error),
    Invalid(TypeTableError),
}

fn parse_type_table(content: &str) -> Result<AtomTypeTable, TypeTableSourceError> {
    let file: TypeTableFile = toml::from_str(content).map_err(TypeTableSourceError::Toml)?;

    let mut table = AtomTypeTable::new();
    for (symbol, mut params) in file.types {
        params.symbol = symbol;
        table.insert(params).map_err(TypeTableSourceError::Invalid)?;
    }
    Ok(table)
}
