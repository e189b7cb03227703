use crate::cli::ScoreArgs;
use crate::config::PartialEngineConfig;
use crate::error::{CliError, Result};
use ljcluster::{
    core::forcefield::{energy::Candidate, params::load_type_table},
    core::io::{traits::CoordinateFile, xyz::XyzFile},
    workflows::cluster::{self, ScoreResult},
};
use tracing::info;

pub fn run(args: ScoreArgs) -> Result<()> {
    let engine_config =
        PartialEngineConfig::load(args.config.as_deref())?.merge_with_cli(&args.set_values)?;

    info!("Loading atom types from {:?}", &args.types);
    let types = load_type_table(&args.types)?;

    info!("Loading structure from {:?}", &args.input);
    let mut atoms = XyzFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;
    cluster::assign_types(&mut atoms, &types)?;

    let candidate = args.candidate.map_or(Candidate::All, Candidate::Atom);
    let result = cluster::score(&atoms, &engine_config, candidate, args.forces)?;

    print!("{}", render(&result, candidate, &atoms));
    Ok(())
}

fn render(
    result: &ScoreResult,
    candidate: Candidate,
    atoms: &[ljcluster::core::models::atom::Atom],
) -> String {
    let mut out = String::new();
    match candidate {
        Candidate::All => out.push_str(&format!("System of {} atoms\n", atoms.len())),
        Candidate::Atom(i) => out.push_str(&format!("Atom {} of {}\n", i, atoms.len())),
    }
    out.push_str(&format!(
        "  Lennard-Jones: {:>18.8}\n  Confinement:   {:>18.8}\n  Total:         {:>18.8}\n",
        result.energy.lennard_jones,
        result.energy.confinement,
        result.energy.total()
    ));

    if let Some(gradients) = &result.gradients {
        out.push_str("Gradients\n");
        for (i, (atom, g)) in atoms.iter().zip(gradients).enumerate() {
            out.push_str(&format!(
                "{:>6} {:<4} {:>16.8} {:>16.8} {:>16.8}\n",
                i, atom.symbol, g.x, g.y, g.z
            ));
        }
    }
    out
}
