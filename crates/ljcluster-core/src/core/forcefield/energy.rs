use super::potentials::{self, SigmaPowers};
use super::term::EnergyTerm;
use crate::core::models::atom::Atom;
use crate::core::utils::geometry::{self, GeometryError};
use nalgebra::{Point3, Vector3};
use thiserror::Error;
use tracing::{instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Error, PartialEq)]
pub enum EnergyError {
    #[error("Atom {0} has no type parameters assigned")]
    UntypedAtom(usize),
    #[error("Atoms {first} and {second} occupy the same position")]
    DegenerateGeometry { first: usize, second: usize },
    #[error("Candidate atom {index} is out of range for a system of {natom} atoms")]
    CandidateOutOfRange { index: usize, natom: usize },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Selects which part of the system an evaluation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// Every unordered pair plus the confinement of every atom.
    All,
    /// One atom against all others plus its own confinement term.
    Atom(usize),
}

#[derive(Debug, Clone, Copy)]
struct LjParams {
    sigma: f64,
    epsilon: f64,
}

/// Evaluates the Lennard-Jones energy, its gradient, and the confinement restraint of a
/// cluster. No cutoff, no periodic images.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialEngine {
    confinement_constant: f64,
}

impl Default for PotentialEngine {
    fn default() -> Self {
        Self::new(potentials::DEFAULT_CONFINEMENT_CONSTANT)
    }
}

impl PotentialEngine {
    pub fn new(confinement_constant: f64) -> Self {
        Self {
            confinement_constant,
        }
    }

    pub fn confinement_constant(&self) -> f64 {
        self.confinement_constant
    }

    /// Computes the energy of the system or of a single candidate atom.
    ///
    /// With [`Candidate::All`] the Lennard-Jones part runs over every pair `i < j`. With
    /// [`Candidate::Atom`] it runs over every `j != i`, which lets a caller score a proposed
    /// single-atom move without recomputing the whole system. In both cases the confinement
    /// is measured from the center of mass of the *whole* system.
    ///
    /// # Errors
    ///
    /// - [`EnergyError::DegenerateGeometry`] if two atoms of an evaluated pair coincide.
    /// - [`EnergyError::UntypedAtom`] if any atom lacks parameters.
    /// - [`EnergyError::Geometry`] for an empty system.
    #[instrument(level = "debug", skip_all, fields(natom = atoms.len(), ?candidate))]
    pub fn evaluate(&self, atoms: &[Atom], candidate: Candidate) -> Result<EnergyTerm, EnergyError> {
        if let Candidate::Atom(index) = candidate {
            if index >= atoms.len() {
                return Err(EnergyError::CandidateOutOfRange {
                    index,
                    natom: atoms.len(),
                });
            }
        }

        let params = collect_params(atoms)?;
        let cm = geometry::center_of_mass(atoms)?;

        let term = match candidate {
            Candidate::All => {
                let n = atoms.len();

                #[cfg(not(feature = "parallel"))]
                let iterator = 0..n;

                #[cfg(feature = "parallel")]
                let iterator = (0..n).into_par_iter();

                let per_atom: Vec<EnergyTerm> = iterator
                    .map(|i| self.atom_term(atoms, &params, &cm, i, i + 1..n))
                    .collect::<Result<_, _>>()?;

                per_atom.into_iter().sum()
            }
            Candidate::Atom(i) => {
                let mut lennard_jones = 0.0;
                for j in (0..atoms.len()).filter(|&j| j != i) {
                    lennard_jones += pair_energy(atoms, &params, i, j)?;
                }
                EnergyTerm::new(lennard_jones, self.confinement_of(atoms, &params, &cm, i))
            }
        };

        trace!(
            lennard_jones = term.lennard_jones,
            confinement = term.confinement,
            "Potential evaluated."
        );
        Ok(term)
    }

    /// Computes, for every atom `i`, the sum over `j != i` of
    /// `de · (x_i − x_j)` with `de = −24·ε_ij·(2σ_ij¹²/r¹² − σ_ij⁶/r⁶)/r²`.
    ///
    /// This is the gradient of the pairwise Lennard-Jones energy with respect to each atom's
    /// position. The confinement restraint does not contribute.
    #[instrument(level = "debug", skip_all, fields(natom = atoms.len()))]
    pub fn evaluate_forces(&self, atoms: &[Atom]) -> Result<Vec<Vector3<f64>>, EnergyError> {
        let params = collect_params(atoms)?;
        let n = atoms.len();

        #[cfg(not(feature = "parallel"))]
        let iterator = 0..n;

        #[cfg(feature = "parallel")]
        let iterator = (0..n).into_par_iter();

        iterator
            .map(|i| {
                let mut gradient = Vector3::zeros();
                for j in (0..n).filter(|&j| j != i) {
                    let delta = atoms[i].position - atoms[j].position;
                    let d2 = delta.norm_squared();
                    if d2 == 0.0 {
                        return Err(degenerate(i, j));
                    }
                    let (sigma, epsilon) = combined(&params, i, j);
                    let de = potentials::lennard_jones_12_6_gradient_factor(
                        d2,
                        SigmaPowers::new(sigma),
                        epsilon,
                    );
                    gradient += delta * de;
                }
                Ok(gradient)
            })
            .collect()
    }

    fn atom_term(
        &self,
        atoms: &[Atom],
        params: &[LjParams],
        cm: &Point3<f64>,
        i: usize,
        partners: std::ops::Range<usize>,
    ) -> Result<EnergyTerm, EnergyError> {
        let mut lennard_jones = 0.0;
        for j in partners {
            lennard_jones += pair_energy(atoms, params, i, j)?;
        }
        Ok(EnergyTerm::new(
            lennard_jones,
            self.confinement_of(atoms, params, cm, i),
        ))
    }

    fn confinement_of(&self, atoms: &[Atom], params: &[LjParams], cm: &Point3<f64>, i: usize) -> f64 {
        let d2_cm = geometry::distance_squared(cm, &atoms[i].position);
        potentials::confinement(
            d2_cm,
            params[i].sigma,
            params[i].epsilon,
            self.confinement_constant,
        )
    }
}

fn collect_params(atoms: &[Atom]) -> Result<Vec<LjParams>, EnergyError> {
    atoms
        .iter()
        .enumerate()
        .map(|(i, atom)| {
            atom.params
                .as_ref()
                .map(|p| LjParams {
                    sigma: p.sigma,
                    epsilon: p.epsilon,
                })
                .ok_or(EnergyError::UntypedAtom(i))
        })
        .collect()
}

#[inline]
fn combined(params: &[LjParams], i: usize, j: usize) -> (f64, f64) {
    potentials::combine(
        params[i].sigma,
        params[i].epsilon,
        params[j].sigma,
        params[j].epsilon,
    )
}

#[inline]
fn pair_energy(atoms: &[Atom], params: &[LjParams], i: usize, j: usize) -> Result<f64, EnergyError> {
    let d2 = geometry::distance_squared(&atoms[j].position, &atoms[i].position);
    if d2 == 0.0 {
        return Err(degenerate(i, j));
    }
    let (sigma, epsilon) = combined(params, i, j);
    Ok(potentials::lennard_jones_12_6(
        d2,
        SigmaPowers::new(sigma),
        epsilon,
    ))
}

fn degenerate(i: usize, j: usize) -> EnergyError {
    EnergyError::DegenerateGeometry {
        first: i.min(j),
        second: i.max(j),
    }
}
