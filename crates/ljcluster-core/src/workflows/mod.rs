//! # Workflows Module
//!
//! High-level entry points that tie the engine and the core together.
//!
//! - **Cluster Workflow** ([`cluster`]) - Preparing a typed, placed cluster from an input deck,
//!   and scoring existing structures.

pub mod cluster;
