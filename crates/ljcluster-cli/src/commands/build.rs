use crate::cli::BuildArgs;
use crate::config::PartialEngineConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use ljcluster::{
    core::forcefield::energy::{Candidate, EnergyError},
    core::io::{
        energy::{EnergyFileWriter, EnergyFrame},
        input::InputDeck,
        traits::CoordinateFile,
        xyz::XyzFile,
    },
    core::utils::geometry,
    engine::{error::EngineError, progress::ProgressReporter},
    workflows,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

pub fn run(args: BuildArgs) -> Result<()> {
    let engine_config =
        PartialEngineConfig::load(args.config.as_deref())?.merge_with_cli(&args.set_values)?;

    info!("Reading input deck from {:?}", &args.input);
    let deck = InputDeck::from_path(&args.input).map_err(EngineError::from)?;

    let seed = args.seed.clone().unwrap_or_else(default_seed);
    info!(seed = %seed, "Seeding random stream.");

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Building a cluster of {} atoms...", deck.natom);
    let mut prepared = workflows::cluster::prepare(&deck, &engine_config, &seed, &reporter)?;

    if args.recentre {
        let removed = geometry::recentre(&mut prepared.atoms).map_err(EngineError::from)?;
        info!(
            "Recentred structure, removed offset ({:.4}, {:.4}, {:.4}).",
            removed.x, removed.y, removed.z
        );
    }

    let energy = match prepared.context.evaluate(&prepared.atoms, Candidate::All) {
        Ok(term) => {
            println!(
                "Placed {} atoms with {} rejected draws. Energy: {:.6} (LJ {:.6}, confinement {:.6})",
                prepared.report.placed,
                prepared.report.rejections,
                term.total(),
                term.lennard_jones,
                term.confinement
            );
            Some(term)
        }
        Err(EngineError::Energy {
            source: EnergyError::DegenerateGeometry { first, second },
        }) => {
            warn!(
                first,
                second, "Atoms share a position; the built structure has no finite energy."
            );
            None
        }
        Err(e) => return Err(e.into()),
    };

    let output = args.output.clone().or_else(|| {
        deck.output.first_coordinates.as_ref().map(|first| {
            if !first.is_xyz() {
                warn!(
                    format = %first.format,
                    "Only XYZ coordinates are supported; writing {:?} as XYZ.",
                    &first.path
                );
            }
            first.path.clone()
        })
    });
    match output {
        Some(path) => {
            let comment = match energy {
                Some(term) => format!("seed {} energy {:.8}", seed, term.total()),
                None => format!("seed {}", seed),
            };
            XyzFile::write_to_path(&prepared.atoms, &comment, &path).map_err(|e| {
                CliError::FileParsing {
                    path: path.clone(),
                    source: e.into(),
                }
            })?;
            println!("✓ Structure written to: {}", path.display());
        }
        None => warn!("No output path given; the built structure is not saved."),
    }

    let energy_path = args
        .energy_file
        .clone()
        .or_else(|| deck.output.energy.as_ref().map(|e| e.path.clone()));
    if let (Some(path), Some(term)) = (energy_path, energy) {
        write_energy(&path, EnergyFrame::new(0.0, term.total(), 0.0))?;
        println!("✓ Energy written to: {}", path.display());
    }

    Ok(())
}

fn write_energy(path: &Path, frame: EnergyFrame) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = EnergyFileWriter::new(BufWriter::new(file))?;
    writer.write_frame(&frame)?;
    writer.finish()?;
    Ok(())
}

fn default_seed() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
        .to_string()
}
