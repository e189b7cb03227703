//! # Engine Module
//!
//! Stateful pieces of a cluster run.
//!
//! ## Overview
//!
//! A run owns one [`context::SimulationContext`]: the system size, the cached
//! [`random::RandomStream`] every stochastic step draws from, and the result of the last
//! energy evaluation. The [`placement::ClusterBuilder`] uses the context to give atoms their
//! initial coordinates, rejecting random draws that would overlap atoms already placed.
//!
//! - **Configuration** ([`config`]) - Cache size, retry ceiling, separation and confinement
//!   constants
//! - **Randomness** ([`random`]) - Seed derivation and the fixed-capacity uniform cache
//! - **Placement** ([`placement`]) - Placeholder, zero, and random builds of atom ranges
//! - **Progress Monitoring** ([`progress`]) - Progress callbacks for front ends
//! - **Error Handling** ([`error`]) - The engine error type

pub mod config;
pub mod context;
pub mod error;
pub mod placement;
pub mod progress;
pub mod random;
