use crate::core::forcefield::energy::{Candidate, PotentialEngine};
use crate::core::forcefield::term::EnergyTerm;
use crate::core::io::input::{AtomAssignment, CoordinateSource, InputDeck};
use crate::core::io::traits::CoordinateFile;
use crate::core::io::xyz::XyzFile;
use crate::core::models::atom::Atom;
use crate::core::models::types::AtomTypeTable;
use crate::engine::config::EngineConfig;
use crate::engine::context::SimulationContext;
use crate::engine::error::EngineError;
use crate::engine::placement::{BuildMode, BuildReport, ClusterBuilder};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::random::RandomStream;
use nalgebra::{Point3, Vector3};
use std::path::Path;
use tracing::{info, instrument};

/// A typed and placed cluster, ready for an integrator.
#[derive(Debug, Clone)]
pub struct PreparedCluster {
    pub context: SimulationContext,
    pub atoms: Vec<Atom>,
    /// Sum of the reports of every build the input requested.
    pub report: BuildReport,
}

#[derive(Debug, Clone)]
pub struct ScoreResult {
    pub energy: EnergyTerm,
    pub gradients: Option<Vec<Vector3<f64>>>,
}

/// Turns an input deck into a cluster: every atom starts at the placeholder coordinate, then
/// each `ATOM` request is applied in file order.
#[instrument(skip_all, name = "prepare_workflow", fields(natom = deck.natom))]
pub fn prepare(
    deck: &InputDeck,
    config: &EngineConfig,
    seed: &str,
    reporter: &ProgressReporter,
) -> Result<PreparedCluster, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    config.validate()?;
    let random = RandomStream::new(seed, config.cache_capacity)?;
    let mut context = SimulationContext::new(deck.natom, random, config);
    let mut atoms = vec![Atom::new(Point3::origin()); deck.natom];

    let builder = ClusterBuilder::new(config, reporter);
    builder.build(&mut context, &mut atoms, 0..deck.natom, BuildMode::Placeholder)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Placing Atoms",
    });
    let mut report = BuildReport::default();
    for assignment in &deck.assignments {
        let step = apply_assignment(&builder, &mut context, &mut atoms, deck, assignment)?;
        report.placed += step.placed;
        report.rejections += step.rejections;
    }
    reporter.report(Progress::PhaseFinish);

    if let Some(index) = atoms.iter().position(|a| !a.is_typed()) {
        return Err(EngineError::UntypedAtom(index));
    }

    info!(
        placed = report.placed,
        rejections = report.rejections,
        "Cluster prepared."
    );
    Ok(PreparedCluster {
        context,
        atoms,
        report,
    })
}

fn apply_assignment(
    builder: &ClusterBuilder,
    context: &mut SimulationContext,
    atoms: &mut [Atom],
    deck: &InputDeck,
    assignment: &AtomAssignment,
) -> Result<BuildReport, EngineError> {
    let range = assignment.range.clone();
    if range.is_empty() || range.end > atoms.len() {
        return Err(EngineError::InvalidRange {
            start: range.start,
            end: range.end,
            natom: atoms.len(),
        });
    }

    let params = deck
        .types
        .get(&assignment.symbol)
        .ok_or_else(|| EngineError::UnknownAtomType(assignment.symbol.clone()))?;
    for atom in &mut atoms[range.clone()] {
        atom.assign_type(params);
    }

    match &assignment.coordinates {
        CoordinateSource::Random => builder.build(context, atoms, range, BuildMode::Random),
        CoordinateSource::Zero => builder.build(context, atoms, range, BuildMode::Zero),
        CoordinateSource::File(path) => {
            copy_coordinates_from(path, atoms, range.clone())?;
            Ok(BuildReport {
                placed: range.len(),
                rejections: 0,
            })
        }
    }
}

/// Copies the positions of `range` from an XYZ file describing the whole system.
fn copy_coordinates_from(
    path: &Path,
    atoms: &mut [Atom],
    range: std::ops::Range<usize>,
) -> Result<(), EngineError> {
    info!(path = %path.display(), "Reading starting coordinates.");
    let source = XyzFile::read_from_path(path).map_err(|e| EngineError::Coordinates {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    if source.len() != atoms.len() {
        return Err(EngineError::AtomCountMismatch {
            expected: atoms.len(),
            found: source.len(),
        });
    }
    for i in range {
        atoms[i].position = source[i].position;
    }
    Ok(())
}

/// Types atoms by their symbol, copying the matching table entry into each atom.
pub fn assign_types(atoms: &mut [Atom], types: &AtomTypeTable) -> Result<(), EngineError> {
    for atom in atoms.iter_mut() {
        let params = types
            .get(&atom.symbol)
            .ok_or_else(|| EngineError::UnknownAtomType(atom.symbol.clone()))?;
        atom.assign_type(params);
    }
    Ok(())
}

/// Evaluates the energy of an existing structure, and optionally its pair gradients.
#[instrument(skip_all, name = "score_workflow", fields(natom = atoms.len(), ?candidate))]
pub fn score(
    atoms: &[Atom],
    config: &EngineConfig,
    candidate: Candidate,
    with_gradients: bool,
) -> Result<ScoreResult, EngineError> {
    config.validate()?;
    let engine = PotentialEngine::new(config.confinement_constant);
    let energy = engine.evaluate(atoms, candidate)?;
    let gradients = if with_gradients {
        Some(engine.evaluate_forces(atoms)?)
    } else {
        None
    };
    Ok(ScoreResult { energy, gradients })
}
