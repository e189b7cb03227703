use crate::core::models::atom::Atom;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing coordinate file formats.
///
/// Implementors handle format-specific parsing and serialization; the path helpers wrap the
/// files in buffered readers and writers.
pub trait CoordinateFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads atoms from a buffered reader.
    ///
    /// Atoms come back with their symbol and position set and without type parameters.
    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Atom>, Self::Error>;

    /// Writes atoms to a writer, with a free-form comment where the format has one.
    fn write_to(atoms: &[Atom], comment: &str, writer: &mut impl Write) -> Result<(), Self::Error>;

    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Atom>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    fn write_to_path<P: AsRef<Path>>(
        atoms: &[Atom],
        comment: &str,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(atoms, comment, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
