//! # Force Field Module
//!
//! Energy and gradient evaluation for Lennard-Jones clusters.
//!
//! ## Overview
//!
//! The cluster interacts through a single 12-6 Lennard-Jones pair potential. Mixed pairs use
//! an arithmetic mean for sigma and a geometric mean for epsilon. Because the cluster lives in
//! open space, every atom also feels a soft tenth-power restraint pulling it back towards the
//! center of mass of the system.
//!
//! ## Key Components
//!
//! - [`energy`] - The [`energy::PotentialEngine`], evaluating total or single-atom energies
//!   and per-atom gradients
//! - [`term`] - [`term::EnergyTerm`], the Lennard-Jones/confinement pair returned by an
//!   evaluation
//! - [`params`] - Loading an atom type table from TOML
//! - `potentials` - The scalar kernels, written against squared distances
//!
//! ## Usage
//!
//! ```ignore
//! use ljcluster::core::forcefield::energy::{Candidate, PotentialEngine};
//!
//! let engine = PotentialEngine::default();
//! let term = engine.evaluate(&atoms, Candidate::All)?;
//! let gradients = engine.evaluate_forces(&atoms)?;
//! ```

pub mod energy;
pub mod params;
pub(crate) mod potentials;
pub mod term;

pub use potentials::DEFAULT_CONFINEMENT_CONSTANT;
