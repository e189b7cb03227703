use crate::core::models::atom::Atom;
use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum GeometryError {
    #[error("Cannot compute the center of mass of an empty system")]
    EmptySystem,
}

/// Returns the center of mass of the atoms.
///
/// Positions are *not* weighted by mass: the result is the plain centroid, which is what the
/// confinement restraint is defined against.
///
/// # Errors
///
/// Returns [`GeometryError::EmptySystem`] if `atoms` is empty.
pub fn center_of_mass(atoms: &[Atom]) -> Result<Point3<f64>, GeometryError> {
    if atoms.is_empty() {
        return Err(GeometryError::EmptySystem);
    }

    let mut sum = Vector3::zeros();
    for atom in atoms {
        sum += atom.position.coords;
    }

    Ok(Point3::from(sum / atoms.len() as f64))
}

/// Translates every atom so the center of mass sits at the origin.
///
/// Returns the center of mass that was removed.
pub fn recentre(atoms: &mut [Atom]) -> Result<Point3<f64>, GeometryError> {
    let cm = center_of_mass(atoms)?;
    for atom in atoms.iter_mut() {
        atom.position -= cm.coords;
    }
    Ok(cm)
}

/// Squared Euclidean distance between two points.
#[inline]
pub fn distance_squared(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    dx * dx + dy * dy + dz * dz
}
