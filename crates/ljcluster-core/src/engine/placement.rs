use super::config::EngineConfig;
use super::context::SimulationContext;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::atom::Atom;
use nalgebra::Point3;
use std::ops::Range;
use tracing::{debug, info, instrument, warn};

/// Coordinate given to every axis of an atom that has not been placed yet.
pub const PLACEHOLDER_COORDINATE: f64 = 9999.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Park the atoms at the placeholder coordinate.
    Placeholder,
    /// Put every atom at the origin.
    Zero,
    /// Draw positions uniformly in a cube, rejecting overlaps with atoms already placed in
    /// the same range.
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildReport {
    pub placed: usize,
    pub rejections: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlacementOutcome {
    Placed { attempts: u64 },
    Exhausted,
}

/// Assigns initial coordinates to a contiguous range of atoms.
pub struct ClusterBuilder<'a> {
    config: &'a EngineConfig,
    reporter: &'a ProgressReporter<'a>,
}

impl<'a> ClusterBuilder<'a> {
    pub fn new(config: &'a EngineConfig, reporter: &'a ProgressReporter<'a>) -> Self {
        Self { config, reporter }
    }

    /// Places `atoms[range]` according to `mode`.
    ///
    /// Random builds visit the atoms in ascending index order and consume three draws
    /// (x, y, z) from the context's random stream per attempt, so a seed fully determines
    /// the result.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidRange`] for an empty range or one that leaves the system.
    /// - [`EngineError::UntypedAtom`] if a random build meets an atom without parameters.
    /// - [`EngineError::PlacementExhausted`] if an atom cannot be placed within the
    ///   configured number of attempts.
    #[instrument(skip_all, name = "cluster_build", fields(start = range.start, end = range.end, ?mode))]
    pub fn build(
        &self,
        ctx: &mut SimulationContext,
        atoms: &mut [Atom],
        range: Range<usize>,
        mode: BuildMode,
    ) -> Result<BuildReport, EngineError> {
        ctx.check_atoms(atoms)?;
        if range.is_empty() || range.end > atoms.len() {
            return Err(EngineError::InvalidRange {
                start: range.start,
                end: range.end,
                natom: atoms.len(),
            });
        }

        let placed = range.len();
        let report = match mode {
            BuildMode::Placeholder => {
                fill(&mut atoms[range], PLACEHOLDER_COORDINATE);
                BuildReport {
                    placed,
                    rejections: 0,
                }
            }
            BuildMode::Zero => {
                fill(&mut atoms[range], 0.0);
                BuildReport {
                    placed,
                    rejections: 0,
                }
            }
            BuildMode::Random => self.build_random(ctx, atoms, range)?,
        };

        debug!(
            placed = report.placed,
            rejections = report.rejections,
            "Atom range built."
        );
        Ok(report)
    }

    fn build_random(
        &self,
        ctx: &mut SimulationContext,
        atoms: &mut [Atom],
        range: Range<usize>,
    ) -> Result<BuildReport, EngineError> {
        let half_width = (ctx.natom() as f64).sqrt() - 1.0;
        info!(
            atoms = range.len(),
            half_width, "Building random configuration."
        );

        self.reporter.report(Progress::RangeStart {
            range: range.clone(),
        });

        let mut report = BuildReport::default();
        for i in range.clone() {
            match self.place_atom(ctx, atoms, range.start, i, half_width)? {
                PlacementOutcome::Placed { attempts } => {
                    report.placed += 1;
                    report.rejections += attempts - 1;
                    self.reporter.report(Progress::AtomPlaced { index: i, attempts });
                }
                PlacementOutcome::Exhausted => {
                    warn!(atom = i, "Giving up on atom placement.");
                    self.reporter.report(Progress::RangeExhausted { index: i });
                    return Err(EngineError::PlacementExhausted {
                        atom: i,
                        attempts: self.config.max_placement_attempts,
                    });
                }
            }
        }

        self.reporter.report(Progress::RangeFinish {
            placed: report.placed,
            rejections: report.rejections,
        });
        Ok(report)
    }

    fn place_atom(
        &self,
        ctx: &mut SimulationContext,
        atoms: &mut [Atom],
        first: usize,
        i: usize,
        half_width: f64,
    ) -> Result<PlacementOutcome, EngineError> {
        let sigma = sigma_of(atoms, i)?;

        for attempt in 1..=self.config.max_placement_attempts {
            let x = 2.0 * ctx.random.next_uniform() - 1.0;
            let y = 2.0 * ctx.random.next_uniform() - 1.0;
            let z = 2.0 * ctx.random.next_uniform() - 1.0;
            let candidate = Point3::new(x, y, z) * half_width;

            if satisfies_separation(
                atoms,
                first..i,
                &candidate,
                sigma,
                self.config.separation_factor,
            )? {
                atoms[i].position = candidate;
                return Ok(PlacementOutcome::Placed { attempts: attempt });
            }
        }
        Ok(PlacementOutcome::Exhausted)
    }
}

fn fill(atoms: &mut [Atom], value: f64) {
    for atom in atoms {
        atom.position = Point3::new(value, value, value);
    }
}

fn sigma_of(atoms: &[Atom], index: usize) -> Result<f64, EngineError> {
    atoms[index]
        .params
        .as_ref()
        .map(|p| p.sigma)
        .ok_or(EngineError::UntypedAtom(index))
}

/// Checks a candidate position against the atoms in `placed`: the distance to each atom `j`
/// must be at least `factor · (sigma + sigma_j)`.
fn satisfies_separation(
    atoms: &[Atom],
    placed: Range<usize>,
    candidate: &Point3<f64>,
    sigma: f64,
    factor: f64,
) -> Result<bool, EngineError> {
    for j in placed {
        let min_distance = factor * (sigma + sigma_of(atoms, j)?);
        if (candidate - atoms[j].position).norm() < min_distance {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfigBuilder;
    use crate::engine::random::RandomStream;
    use crate::core::models::types::AtomTypeParameters;
    use std::sync::Mutex;

    fn typed_atoms(n: usize, sigma: f64) -> Vec<Atom> {
        let params = AtomTypeParameters::new("Ar", 39.948, 0.0, sigma, 1.0);
        (0..n)
            .map(|_| Atom::with_params(&params, Point3::origin()))
            .collect()
    }

    fn context(natom: usize, seed: &str, config: &EngineConfig) -> SimulationContext {
        let random = RandomStream::new(seed, config.cache_capacity).unwrap();
        SimulationContext::new(natom, random, config)
    }

    #[test]
    fn placeholder_mode_parks_atoms() {
        let config = EngineConfig::default();
        let reporter = ProgressReporter::new();
        let mut ctx = context(4, "1", &config);
        let mut atoms = typed_atoms(4, 1.0);

        let report = ClusterBuilder::new(&config, &reporter)
            .build(&mut ctx, &mut atoms, 1..3, BuildMode::Placeholder)
            .unwrap();

        assert_eq!(report, BuildReport { placed: 2, rejections: 0 });
        assert_eq!(atoms[0].position, Point3::origin());
        assert_eq!(atoms[1].coordinates(), [PLACEHOLDER_COORDINATE; 3]);
        assert_eq!(atoms[2].coordinates(), [PLACEHOLDER_COORDINATE; 3]);
        assert_eq!(atoms[3].position, Point3::origin());
    }

    #[test]
    fn zero_mode_moves_range_to_origin_without_touching_random_stream() {
        let config = EngineConfig::default();
        let reporter = ProgressReporter::new();
        let mut ctx = context(3, "1", &config);
        let mut atoms: Vec<Atom> = (0..3)
            .map(|_| Atom::new(Point3::new(1.0, 2.0, 3.0)))
            .collect();

        ClusterBuilder::new(&config, &reporter)
            .build(&mut ctx, &mut atoms, 0..2, BuildMode::Zero)
            .unwrap();

        assert_eq!(atoms[0].position, Point3::origin());
        assert_eq!(atoms[1].position, Point3::origin());
        assert_eq!(atoms[2].position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(ctx.random.refills(), 0);
    }

    #[test]
    fn random_build_respects_separation_and_bounds() {
        let config = EngineConfig::default();
        let reporter = ProgressReporter::new();
        let natom = 20;
        let mut ctx = context(natom, "1700000000", &config);
        let mut atoms = typed_atoms(natom, 0.1);

        ClusterBuilder::new(&config, &reporter)
            .build(&mut ctx, &mut atoms, 0..natom, BuildMode::Random)
            .unwrap();

        let half_width = (natom as f64).sqrt() - 1.0;
        for (i, a) in atoms.iter().enumerate() {
            assert!(a.coordinates().iter().all(|c| c.abs() <= half_width));
            for b in &atoms[i + 1..] {
                assert!((a.position - b.position).norm() >= 5.0 * 0.2);
            }
        }
    }

    #[test]
    fn random_build_is_reproducible_for_a_seed() {
        let config = EngineConfig::default();
        let reporter = ProgressReporter::new();
        let builder = ClusterBuilder::new(&config, &reporter);

        let mut first = typed_atoms(10, 0.1);
        let mut ctx = context(10, "argon", &config);
        builder
            .build(&mut ctx, &mut first, 0..10, BuildMode::Random)
            .unwrap();

        let mut second = typed_atoms(10, 0.1);
        let mut ctx = context(10, "argon", &config);
        builder
            .build(&mut ctx, &mut second, 0..10, BuildMode::Random)
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn first_random_atom_uses_first_three_draws() {
        let config = EngineConfig::default();
        let reporter = ProgressReporter::new();
        let mut ctx = context(9, "seed", &config);
        let mut reference = RandomStream::new("seed", config.cache_capacity).unwrap();
        let mut atoms = typed_atoms(9, 0.1);

        ClusterBuilder::new(&config, &reporter)
            .build(&mut ctx, &mut atoms, 0..1, BuildMode::Random)
            .unwrap();

        let expected: Vec<f64> = (0..3)
            .map(|_| (2.0 * reference.next_uniform() - 1.0) * 2.0)
            .collect();
        assert_eq!(atoms[0].coordinates().to_vec(), expected);
        assert_eq!(ctx.random.cursor(), 3);
    }

    #[test]
    fn separation_check_accepts_exact_minimum_and_rejects_closer() {
        let mut atoms = typed_atoms(2, 1.0);
        atoms[0].position = Point3::new(0.0, 0.0, 0.0);

        let at_limit = Point3::new(10.0, 0.0, 0.0);
        let too_close = Point3::new(9.99, 0.0, 0.0);
        assert!(satisfies_separation(&atoms, 0..1, &at_limit, 1.0, 5.0).unwrap());
        assert!(!satisfies_separation(&atoms, 0..1, &too_close, 1.0, 5.0).unwrap());
        // atoms outside the checked range are ignored
        assert!(satisfies_separation(&atoms, 1..1, &too_close, 1.0, 5.0).unwrap());
    }

    #[test]
    fn fifty_small_atoms_converge_with_few_rejections() {
        let config = EngineConfig::default();
        let reporter = ProgressReporter::new();
        let mut ctx = context(50, "1700000000", &config);
        let mut atoms = typed_atoms(50, 0.1);

        let report = ClusterBuilder::new(&config, &reporter)
            .build(&mut ctx, &mut atoms, 0..50, BuildMode::Random)
            .unwrap();

        assert_eq!(report.placed, 50);
        assert!(report.rejections < 10_000);
    }

    #[test]
    fn infeasible_separation_exhausts_attempts() {
        let config = EngineConfigBuilder::new()
            .cache_capacity(2048)
            .max_placement_attempts(500)
            .separation_factor(5.0)
            .confinement_constant(4.0)
            .build()
            .unwrap();
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            events.lock().unwrap().push(event);
        }));
        let mut ctx = context(50, "1700000000", &config);
        let mut atoms = typed_atoms(50, 1.0);

        let result = ClusterBuilder::new(&config, &reporter).build(
            &mut ctx,
            &mut atoms,
            0..50,
            BuildMode::Random,
        );
        drop(reporter);

        let (atom, attempts) = match result {
            Err(EngineError::PlacementExhausted { atom, attempts }) => (atom, attempts),
            other => panic!("expected placement to be exhausted, got {other:?}"),
        };
        assert_eq!(attempts, 500);
        assert_eq!(
            events.into_inner().unwrap().last(),
            Some(&Progress::RangeExhausted { index: atom })
        );
    }

    #[test]
    fn empty_or_out_of_bounds_range_is_rejected() {
        let config = EngineConfig::default();
        let reporter = ProgressReporter::new();
        let builder = ClusterBuilder::new(&config, &reporter);
        let mut ctx = context(5, "1", &config);
        let mut atoms = typed_atoms(5, 0.1);

        for range in [3..3, 2..6] {
            let result = builder.build(&mut ctx, &mut atoms, range, BuildMode::Zero);
            assert!(matches!(result, Err(EngineError::InvalidRange { natom: 5, .. })));
        }
    }

    #[test]
    fn random_build_requires_typed_atoms() {
        let config = EngineConfig::default();
        let reporter = ProgressReporter::new();
        let mut ctx = context(3, "1", &config);
        let mut atoms = typed_atoms(3, 0.1);
        atoms[2].params = None;

        let result = ClusterBuilder::new(&config, &reporter).build(
            &mut ctx,
            &mut atoms,
            0..3,
            BuildMode::Random,
        );
        assert!(matches!(result, Err(EngineError::UntypedAtom(2))));
    }

    #[test]
    fn random_build_reports_each_atom() {
        let config = EngineConfig::default();
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            events.lock().unwrap().push(event);
        }));
        let mut ctx = context(4, "7", &config);
        let mut atoms = typed_atoms(4, 0.1);

        let report = ClusterBuilder::new(&config, &reporter)
            .build(&mut ctx, &mut atoms, 1..4, BuildMode::Random)
            .unwrap();
        drop(reporter);

        let events = events.into_inner().unwrap();
        assert_eq!(events.first(), Some(&Progress::RangeStart { range: 1..4 }));
        assert_eq!(
            events.last(),
            Some(&Progress::RangeFinish {
                placed: 3,
                rejections: report.rejections
            })
        );
        let placed: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                Progress::AtomPlaced { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(placed, vec![1, 2, 3]);
    }
}
