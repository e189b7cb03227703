use std::ops::{Add, AddAssign};

/// Result of one potential evaluation: the pairwise Lennard-Jones part and the
/// confinement restraint, kept apart so callers can report them separately.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyTerm {
    pub lennard_jones: f64,
    pub confinement: f64,
}

impl EnergyTerm {
    pub fn new(lennard_jones: f64, confinement: f64) -> Self {
        Self {
            lennard_jones,
            confinement,
        }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.lennard_jones + self.confinement
    }
}

impl Add for EnergyTerm {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            lennard_jones: self.lennard_jones + rhs.lennard_jones,
            confinement: self.confinement + rhs.confinement,
        }
    }
}

impl AddAssign for EnergyTerm {
    fn add_assign(&mut self, rhs: Self) {
        self.lennard_jones += rhs.lennard_jones;
        self.confinement += rhs.confinement;
    }
}

impl std::iter::Sum for EnergyTerm {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
