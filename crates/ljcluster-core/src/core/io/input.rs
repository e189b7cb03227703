use crate::core::models::types::{AtomTypeParameters, AtomTypeTable, TypeTableError};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: InputParseErrorKind,
    },
    #[error("The input does not define the number of atoms (NATOMS)")]
    MissingAtomCount,
}

#[derive(Debug, Error, PartialEq)]
pub enum InputParseErrorKind {
    #[error("{directive} expects a value at position {position}")]
    MissingToken {
        directive: &'static str,
        position: usize,
    },
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
    #[error("Unknown integration method '{0}', expected LANGEVIN or BROWNIAN")]
    UnknownMethod(String),
    #[error("Unsupported boundary keyword '{0}', only NOPBC is available")]
    UnsupportedBoundary(String),
    #[error("NATOMS must be a positive integer, got {0}")]
    InvalidAtomCount(String),
    #[error("NATOMS is defined more than once")]
    DuplicateAtomCount,
    #[error("ATOM appears before NATOMS")]
    AtomsBeforeCount,
    #[error("Atom type '{0}' has not been defined by a previous PARAMS line")]
    UnknownAtomType(String),
    #[error("Atom range {from}..{to} is empty or outside the system")]
    InvalidAtomRange { from: usize, to: usize },
    #[error(transparent)]
    InvalidType(#[from] TypeTableError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorMethod {
    Langevin,
    Brownian,
}

impl FromStr for IntegratorMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LANGEVIN" => Ok(Self::Langevin),
            "BROWNIAN" => Ok(Self::Brownian),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodSettings {
    pub method: IntegratorMethod,
    /// Friction coefficient in ps⁻¹.
    pub friction: f64,
    /// Time step in ps.
    pub timestep: f64,
}

/// Non-bonded treatment requested by the input. The cluster kernel never applies a cutoff;
/// the values are carried for engines that do.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NonBonded {
    #[default]
    NoCutoff,
    Switched { cuton: f64, cutoff: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicOutput {
    pub path: PathBuf,
    pub every: u32,
}

/// A single coordinate snapshot and the file format the input asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateOutput {
    /// Upper-cased format keyword, e.g. `XYZ`.
    pub format: String,
    pub path: PathBuf,
}

impl CoordinateOutput {
    pub fn is_xyz(&self) -> bool {
        self.format == "XYZ"
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputSettings {
    pub energy: Option<PeriodicOutput>,
    pub first_coordinates: Option<CoordinateOutput>,
    pub last_coordinates: Option<CoordinateOutput>,
    pub trajectory: Option<PeriodicOutput>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateSource {
    Random,
    Zero,
    File(PathBuf),
}

/// One `ATOM` line: a type and a coordinate source for a range of atom indices.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomAssignment {
    /// Zero-based, half-open.
    pub range: Range<usize>,
    pub symbol: String,
    pub coordinates: CoordinateSource,
}

/// Everything a keyword input file describes about a run.
#[derive(Debug, Clone, PartialEq)]
pub struct InputDeck {
    pub natom: usize,
    pub temperature: Option<f64>,
    pub nsteps: Option<u64>,
    pub method: Option<MethodSettings>,
    pub nonbonded: NonBonded,
    pub output: OutputSettings,
    pub types: AtomTypeTable,
    /// Atom assignments in file order.
    pub assignments: Vec<AtomAssignment>,
}

#[derive(Default)]
struct DeckBuilder {
    natom: Option<usize>,
    temperature: Option<f64>,
    nsteps: Option<u64>,
    method: Option<MethodSettings>,
    nonbonded: NonBonded,
    output: OutputSettings,
    types: AtomTypeTable,
    assignments: Vec<AtomAssignment>,
}

struct Line<'a> {
    directive: &'static str,
    tokens: Vec<&'a str>,
}

impl<'a> Line<'a> {
    fn token(&self, position: usize) -> Result<&'a str, InputParseErrorKind> {
        self.tokens
            .get(position)
            .copied()
            .ok_or(InputParseErrorKind::MissingToken {
                directive: self.directive,
                position,
            })
    }

    fn number<T: FromStr>(&self, position: usize) -> Result<T, InputParseErrorKind> {
        let token = self.token(position)?;
        token
            .parse()
            .map_err(|_| InputParseErrorKind::InvalidNumber(token.to_string()))
    }

    fn path(&self, position: usize) -> Result<PathBuf, InputParseErrorKind> {
        Ok(PathBuf::from(self.token(position)?.trim_matches('\'')))
    }

    fn keyword(&self, position: usize) -> Option<String> {
        self.tokens.get(position).map(|t| t.to_ascii_uppercase())
    }

    // SAVE COOR <FIRST|LAST> <format> '<file>'
    fn coordinate_output(&self) -> Result<CoordinateOutput, InputParseErrorKind> {
        Ok(CoordinateOutput {
            format: self.token(3)?.to_ascii_uppercase(),
            path: self.path(4)?,
        })
    }
}

impl InputDeck {
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let content = std::fs::read_to_string(path).map_err(|e| InputError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses a keyword input. Keywords are case-insensitive, lines starting with `#` are
    /// comments, and unknown directives are skipped.
    pub fn parse(content: &str) -> Result<Self, InputError> {
        let mut builder = DeckBuilder::default();

        for (index, raw) in content.lines().enumerate() {
            let line_num = index + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let tokens: Vec<&str> = trimmed.split_whitespace().collect();
            builder
                .apply(&tokens)
                .map_err(|kind| InputError::Parse {
                    line: line_num,
                    kind,
                })?;
        }

        builder.finish()
    }
}

impl DeckBuilder {
    fn apply(&mut self, tokens: &[&str]) -> Result<(), InputParseErrorKind> {
        let head = tokens[0].to_ascii_uppercase();
        let directive = match head.as_str() {
            "METHOD" => "METHOD",
            "NONBOND" => "NONBOND",
            "SAVE" => "SAVE",
            "NATOMS" => "NATOMS",
            "TEMP" => "TEMP",
            "NSTEPS" => "NSTEPS",
            "PARAMS" => "PARAMS",
            "ATOM" => "ATOM",
            _ => {
                debug!(directive = tokens[0], "Skipping unknown input directive.");
                return Ok(());
            }
        };
        let line = Line {
            directive,
            tokens: tokens.to_vec(),
        };

        match directive {
            "METHOD" => self.method(&line),
            "NONBOND" => self.nonbond(&line),
            "SAVE" => self.save(&line),
            "NATOMS" => self.natoms(&line),
            "TEMP" => {
                self.temperature = Some(line.number(1)?);
                Ok(())
            }
            "NSTEPS" => {
                self.nsteps = Some(line.number(1)?);
                Ok(())
            }
            "PARAMS" => self.params(&line),
            _ => self.atom(&line),
        }
    }

    // METHOD <LANGEVIN|BROWNIAN> FRICTION <f> TIMESTEP <f>
    fn method(&mut self, line: &Line) -> Result<(), InputParseErrorKind> {
        let name = line.token(1)?;
        let method = name
            .parse()
            .map_err(|_| InputParseErrorKind::UnknownMethod(name.to_string()))?;
        self.method = Some(MethodSettings {
            method,
            friction: line.number(3)?,
            timestep: line.number(5)?,
        });
        Ok(())
    }

    // NONBOND NOPBC NOCUT | NONBOND NOPBC CUTON <f> CUTOFF <f>
    fn nonbond(&mut self, line: &Line) -> Result<(), InputParseErrorKind> {
        let boundary = line.token(1)?;
        if !boundary.eq_ignore_ascii_case("NOPBC") {
            return Err(InputParseErrorKind::UnsupportedBoundary(
                boundary.to_string(),
            ));
        }
        self.nonbonded = match line.keyword(2).as_deref() {
            Some("NOCUT") => NonBonded::NoCutoff,
            _ => NonBonded::Switched {
                cuton: line.number(3)?,
                cutoff: line.number(5)?,
            },
        };
        Ok(())
    }

    // SAVE ENER '<file>' EACH <n>
    // SAVE COOR FIRST|LAST <type> '<file>'
    // SAVE COOR TRAJ <type> '<file>' EACH <n>
    fn save(&mut self, line: &Line) -> Result<(), InputParseErrorKind> {
        match line.keyword(1).as_deref() {
            Some("ENER") => {
                self.output.energy = Some(PeriodicOutput {
                    path: line.path(2)?,
                    every: line.number(4)?,
                });
            }
            Some("COOR") => match line.keyword(2).as_deref() {
                Some("FIRST") => self.output.first_coordinates = Some(line.coordinate_output()?),
                Some("LAST") => self.output.last_coordinates = Some(line.coordinate_output()?),
                Some("TRAJ") => {
                    self.output.trajectory = Some(PeriodicOutput {
                        path: line.path(4)?,
                        every: line.number(6)?,
                    });
                }
                _ => debug!("Skipping unknown SAVE COOR target."),
            },
            _ => debug!("Skipping unknown SAVE target."),
        }
        Ok(())
    }

    fn natoms(&mut self, line: &Line) -> Result<(), InputParseErrorKind> {
        if self.natom.is_some() {
            return Err(InputParseErrorKind::DuplicateAtomCount);
        }
        let token = line.token(1)?;
        match token.parse::<usize>() {
            Ok(n) if n > 0 => {
                self.natom = Some(n);
                Ok(())
            }
            _ => Err(InputParseErrorKind::InvalidAtomCount(token.to_string())),
        }
    }

    // PARAMS <sym> MASS <f> EPSILON <f> SIGMA <f>
    fn params(&mut self, line: &Line) -> Result<(), InputParseErrorKind> {
        let symbol = line.token(1)?;
        let mass = line.number(3)?;
        let epsilon = line.number(5)?;
        let sigma = line.number(7)?;
        self.types
            .insert(AtomTypeParameters::new(symbol, mass, 0.0, sigma, epsilon))?;
        Ok(())
    }

    // ATOM <from> TO <to|END> <sym> COOR <RANDOM|ZERO|FILE> ['<file>']
    fn atom(&mut self, line: &Line) -> Result<(), InputParseErrorKind> {
        let natom = self.natom.ok_or(InputParseErrorKind::AtomsBeforeCount)?;

        let from: usize = line.number(1)?;
        let to = match line.keyword(3).as_deref() {
            Some("END") => natom,
            _ => line.number::<usize>(3)?,
        };
        let to = if to == 0 || to > natom { natom } else { to };
        if from == 0 || from > to {
            return Err(InputParseErrorKind::InvalidAtomRange { from, to });
        }

        let symbol = line.token(4)?;
        if self.types.get(symbol).is_none() {
            return Err(InputParseErrorKind::UnknownAtomType(symbol.to_string()));
        }

        let coordinates = match line.keyword(6).as_deref() {
            None | Some("RANDOM") => CoordinateSource::Random,
            Some("ZERO") => CoordinateSource::Zero,
            Some("FILE") => CoordinateSource::File(line.path(7)?),
            Some(other) => {
                warn!(mode = %other, "Unknown coordinate mode, placing atoms at random.");
                CoordinateSource::Random
            }
        };

        self.assignments.push(AtomAssignment {
            range: from - 1..to,
            symbol: symbol.to_string(),
            coordinates,
        });
        Ok(())
    }

    fn finish(self) -> Result<InputDeck, InputError> {
        let natom = self.natom.ok_or(InputError::MissingAtomCount)?;
        Ok(InputDeck {
            natom,
            temperature: self.temperature,
            nsteps: self.nsteps,
            method: self.method,
            nonbonded: self.nonbonded,
            output: self.output,
            types: self.types,
            assignments: self.assignments,
        })
    }
}
