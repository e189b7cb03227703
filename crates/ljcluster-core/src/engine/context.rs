use super::config::EngineConfig;
use super::error::EngineError;
use super::random::RandomStream;
use crate::core::forcefield::energy::{Candidate, PotentialEngine};
use crate::core::forcefield::term::EnergyTerm;
use crate::core::models::atom::Atom;
use tracing::debug;

/// Per-run state owned by the driver: the system size, the random stream, and the result of
/// the last energy evaluation.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    natom: usize,
    pub random: RandomStream,
    engine: PotentialEngine,
    last_energy: Option<EnergyTerm>,
}

impl SimulationContext {
    pub fn new(natom: usize, random: RandomStream, config: &EngineConfig) -> Self {
        Self {
            natom,
            random,
            engine: PotentialEngine::new(config.confinement_constant),
            last_energy: None,
        }
    }

    pub fn natom(&self) -> usize {
        self.natom
    }

    pub fn engine(&self) -> &PotentialEngine {
        &self.engine
    }

    pub fn check_atoms(&self, atoms: &[Atom]) -> Result<(), EngineError> {
        if atoms.len() != self.natom {
            return Err(EngineError::AtomCountMismatch {
                expected: self.natom,
                found: atoms.len(),
            });
        }
        Ok(())
    }

    /// Evaluates `candidate` and records the result as the last energy of the run.
    pub fn evaluate(
        &mut self,
        atoms: &[Atom],
        candidate: Candidate,
    ) -> Result<EnergyTerm, EngineError> {
        self.check_atoms(atoms)?;
        let term = self.engine.evaluate(atoms, candidate)?;
        debug!(
            lj = term.lennard_jones,
            confinement = term.confinement,
            "Recorded energy evaluation."
        );
        self.last_energy = Some(term);
        Ok(term)
    }

    pub fn last_energy(&self) -> Option<EnergyTerm> {
        self.last_energy
    }

    /// Confinement part of the last evaluation, zero before the first one.
    pub fn confinement_energy(&self) -> f64 {
        self.last_energy.map_or(0.0, |t| t.confinement)
    }
}
