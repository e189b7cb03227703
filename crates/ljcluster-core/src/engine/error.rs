use thiserror::Error;

use super::config::ConfigError;
use super::random::RandomError;
use crate::core::forcefield::energy::EnergyError;
use crate::core::io::input::InputError;
use crate::core::io::xyz::XyzError;
use crate::core::utils::geometry::GeometryError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid engine configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Random stream initialization failed: {source}")]
    Random {
        #[from]
        source: RandomError,
    },

    #[error("Energy evaluation failed: {source}")]
    Energy {
        #[from]
        source: EnergyError,
    },

    #[error("Geometry error: {source}")]
    Geometry {
        #[from]
        source: GeometryError,
    },

    #[error("Input deck error: {source}")]
    Input {
        #[from]
        source: InputError,
    },

    #[error("Failed to read coordinates from '{path}': {source}")]
    Coordinates { path: String, source: XyzError },

    #[error("Could not place atom {atom} after {attempts} attempts")]
    PlacementExhausted { atom: usize, attempts: u64 },

    #[error("Atom range {start}..{end} is empty or exceeds the system of {natom} atoms")]
    InvalidRange {
        start: usize,
        end: usize,
        natom: usize,
    },

    #[error("Context holds {expected} atoms but {found} were supplied")]
    AtomCountMismatch { expected: usize, found: usize },

    #[error("Atom {0} was never assigned a type")]
    UntypedAtom(usize),

    #[error("Unknown atom type '{0}'")]
    UnknownAtomType(String),
}
