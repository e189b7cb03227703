//! Geometric helpers shared by the potential engine and the cluster builder.

pub mod geometry;
