use crate::cli::EnergiesArgs;
use crate::error::Result;
use ljcluster::core::io::energy::{EnergyFrame, read_energy_file, write_csv};
use std::fs::File;
use std::io::BufReader;
use tracing::info;

pub fn run(args: EnergiesArgs) -> Result<()> {
    let file = File::open(&args.file)?;
    let frames = read_energy_file(BufReader::new(file))?;
    info!("Read {} frame(s) from {:?}", frames.len(), &args.file);

    match &args.csv {
        Some(path) => {
            write_csv(&frames, path)?;
            println!("✓ {} frame(s) exported to: {}", frames.len(), path.display());
        }
        None => print!("{}", render_table(&frames)),
    }
    Ok(())
}

fn render_table(frames: &[EnergyFrame]) -> String {
    let mut out = format!(
        "{:>14} {:>18} {:>18} {:>18}\n",
        "time", "potential", "kinetic", "total"
    );
    for frame in frames {
        out.push_str(&format!(
            "{:>14.6} {:>18.8} {:>18.8} {:>18.8}\n",
            frame.time, frame.potential, frame.kinetic, frame.total
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ljcluster::core::io::energy::EnergyFileWriter;
    use std::fs;
    use tempfile::tempdir;

    fn write_sample(path: &std::path::Path) {
        let mut writer = EnergyFileWriter::new(File::create(path).unwrap()).unwrap();
        writer.write_frame(&EnergyFrame::new(0.0, -2.0, 0.5)).unwrap();
        writer.write_frame(&EnergyFrame::new(0.5, -2.5, 0.75)).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn table_has_header_and_one_row_per_frame() {
        let text = render_table(&[EnergyFrame::new(0.0, -2.0, 0.5)]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].trim_start().starts_with("time"));
        assert!(lines[1].contains("-1.50000000"));
    }

    #[test]
    fn csv_export_writes_every_frame() {
        let dir = tempdir().unwrap();
        let ener = dir.path().join("ener.dat");
        let csv = dir.path().join("ener.csv");
        write_sample(&ener);

        run(EnergiesArgs {
            file: ener,
            csv: Some(csv.clone()),
        })
        .unwrap();

        let content = fs::read_to_string(&csv).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.starts_with("time,potential,kinetic,total\n"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = run(EnergiesArgs {
            file: dir.path().join("absent.dat"),
            csv: None,
        });
        assert!(matches!(result, Err(crate::error::CliError::Io(_))));
    }
}
