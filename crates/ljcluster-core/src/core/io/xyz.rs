use crate::core::io::traits::CoordinateFile;
use crate::core::models::atom::Atom;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Expected {expected} atoms but the file ends after {found}")]
    Truncated { expected: usize, found: usize },
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count '{0}'")]
    InvalidCount(String),
    #[error("Invalid coordinate '{0}'")]
    InvalidFloat(String),
    #[error("Atom line needs a symbol and three coordinates")]
    MissingField,
}

/// Plain XYZ format: an atom count line, a comment line, then one `symbol x y z` line per
/// atom.
pub struct XyzFile;

impl CoordinateFile for XyzFile {
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Atom>, Self::Error> {
        let mut lines = reader.lines();

        let count_line = lines.next().transpose()?.unwrap_or_default();
        let expected: usize = count_line.trim().parse().map_err(|_| XyzError::Parse {
            line: 1,
            kind: XyzParseErrorKind::InvalidCount(count_line.trim().to_string()),
        })?;

        // comment line
        if lines.next().transpose()?.is_none() && expected > 0 {
            return Err(XyzError::Truncated { expected, found: 0 });
        }

        let mut atoms = Vec::with_capacity(expected);
        for (offset, line_res) in lines.enumerate() {
            if atoms.len() == expected {
                break;
            }
            let line = line_res?;
            let line_num = offset + 3;
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let symbol = fields.next().ok_or(XyzError::Parse {
                line: line_num,
                kind: XyzParseErrorKind::MissingField,
            })?;
            let mut xyz = [0.0; 3];
            for value in xyz.iter_mut() {
                let field = fields.next().ok_or(XyzError::Parse {
                    line: line_num,
                    kind: XyzParseErrorKind::MissingField,
                })?;
                *value = field.parse().map_err(|_| XyzError::Parse {
                    line: line_num,
                    kind: XyzParseErrorKind::InvalidFloat(field.to_string()),
                })?;
            }

            let mut atom = Atom::new(Point3::new(xyz[0], xyz[1], xyz[2]));
            atom.symbol = symbol.to_string();
            atoms.push(atom);
        }

        if atoms.len() < expected {
            return Err(XyzError::Truncated {
                expected,
                found: atoms.len(),
            });
        }
        Ok(atoms)
    }

    fn write_to(atoms: &[Atom], comment: &str, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "{}", atoms.len())?;
        writeln!(writer, "{}", comment.lines().next().unwrap_or(""))?;
        for atom in atoms {
            let symbol = if atom.symbol.is_empty() {
                "X"
            } else {
                atom.symbol.as_str()
            };
            writeln!(
                writer,
                "{:<4} {:>16.8} {:>16.8} {:>16.8}",
                symbol, atom.position.x, atom.position.y, atom.position.z
            )?;
        }
        Ok(())
    }
}
