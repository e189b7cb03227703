//! # ljcluster Core Library
//!
//! Energy evaluation and initial-configuration building for Lennard-Jones clusters confined
//! around their center of mass.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Atom`, `AtomTypeTable`), the pure
//!   energy kernel (`potentials`, `PotentialEngine`), and file I/O.
//!
//! - **[`engine`]: The Logic Core.** Stateful pieces of a run: the cached random stream, the
//!   per-run `SimulationContext`, and the `ClusterBuilder` that places atoms without overlaps.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together: turns an input deck
//!   into a typed, placed cluster and scores existing structures.

pub mod core;
pub mod engine;
pub mod workflows;
