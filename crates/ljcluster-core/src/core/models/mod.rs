//! # Core Models Module
//!
//! Data structures describing a cluster: atom types and the atoms built from them.
//!
//! ## Key Components
//!
//! - [`types`] - Atom type parameters (mass, charge, sigma, epsilon) and the symbol-keyed
//!   [`types::AtomTypeTable`]
//! - [`atom`] - A single particle with its coordinates and a snapshot of its type parameters
//!
//! ## Usage
//!
//! ```ignore
//! use ljcluster::core::models::{atom::Atom, types::{AtomTypeParameters, AtomTypeTable}};
//! use nalgebra::Point3;
//!
//! let mut table = AtomTypeTable::new();
//! table.insert(AtomTypeParameters::new("Ar", 39.948, 0.0, 3.405, 0.238))?;
//!
//! let atom = Atom::with_params(table.get("Ar").unwrap(), Point3::origin());
//! ```

pub mod atom;
pub mod types;
