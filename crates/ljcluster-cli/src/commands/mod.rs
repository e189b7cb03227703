pub mod build;
pub mod energies;
pub mod score;
