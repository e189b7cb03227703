//! Provides input/output for cluster runs.
//!
//! Coordinates go through the [`traits::CoordinateFile`] interface ([`xyz`] is the only format
//! for now), keyword input decks are parsed by [`input`], and [`energy`] reads and writes the
//! binary energy trace.

pub mod energy;
pub mod input;
pub mod traits;
pub mod xyz;
