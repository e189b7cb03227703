//! # Core Module
//!
//! The stateless foundation of the library: atom and type models, the Lennard-Jones energy
//! kernel, file formats, and geometry helpers.
//!
//! - **Models** ([`models`]) - Atoms and the atom type table
//! - **Energy** ([`forcefield`]) - Pair potentials, confinement, and gradient evaluation
//! - **File I/O** ([`io`]) - XYZ coordinates, input decks, and the energy trace
//! - **Geometry** ([`utils`]) - Center of mass and recentring

pub mod forcefield;
pub mod io;
pub mod models;
pub mod utils;
