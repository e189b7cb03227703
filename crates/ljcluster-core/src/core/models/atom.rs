use super::types::AtomTypeParameters;
use nalgebra::Point3;

/// Represents one particle of a cluster.
///
/// An atom owns a *copy* of its type parameters, taken when the atom is typed. Editing or
/// rebuilding an [`AtomTypeTable`] afterwards does not reach atoms that already exist.
///
/// [`AtomTypeTable`]: super::types::AtomTypeTable
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atom type symbol (e.g., "Ar"), empty until the atom is typed.
    pub symbol: String,
    /// Cartesian coordinates of the atom.
    pub position: Point3<f64>,
    /// Snapshot of the type parameters, `None` until the atom is typed.
    pub params: Option<AtomTypeParameters>,
}

impl Atom {
    /// Creates an untyped atom at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            symbol: String::new(),
            position,
            params: None,
        }
    }

    /// Creates an atom typed with a snapshot of `params`.
    pub fn with_params(params: &AtomTypeParameters, position: Point3<f64>) -> Self {
        let mut atom = Self::new(position);
        atom.assign_type(params);
        atom
    }

    /// Copies `params` into the atom and takes over its symbol.
    pub fn assign_type(&mut self, params: &AtomTypeParameters) {
        self.symbol = params.symbol.clone();
        self.params = Some(params.clone());
    }

    #[inline]
    pub fn is_typed(&self) -> bool {
        self.params.is_some()
    }

    /// Returns the coordinates as a plain `[x, y, z]` array.
    #[inline]
    pub fn coordinates(&self) -> [f64; 3] {
        point_to_array(&self.position)
    }

    /// Overwrites the coordinates from a plain `[x, y, z]` array.
    #[inline]
    pub fn set_coordinates(&mut self, xyz: [f64; 3]) {
        self.position = array_to_point(xyz);
    }
}

#[inline]
pub fn point_to_array(point: &Point3<f64>) -> [f64; 3] {
    [point.x, point.y, point.z]
}

#[inline]
pub fn array_to_point(xyz: [f64; 3]) -> Point3<f64> {
    Point3::new(xyz[0], xyz[1], xyz[2])
}
