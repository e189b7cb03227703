use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "ljcluster - build and score Lennard-Jones clusters held together by a soft confinement potential.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel energy evaluation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build an initial cluster from a keyword input deck.
    Build(BuildArgs),
    /// Evaluate the energy of an existing XYZ structure.
    Score(ScoreArgs),
    /// Print the frames of a binary energy file, or export them as CSV.
    Energies(EnergiesArgs),
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the keyword input deck.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to an engine configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed string for the random stream. Defaults to the current UNIX time.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<String>,

    /// Path for the built structure in XYZ format.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the energy of the built structure as a one-frame energy file.
    #[arg(long, value_name = "PATH")]
    pub energy_file: Option<PathBuf>,

    /// Move the center of mass of the built structure to the origin before writing it.
    #[arg(long)]
    pub recentre: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S placement.max-attempts=5000
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Path to the structure in XYZ format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to the atom type table in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub types: PathBuf,

    /// Path to an engine configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Score a single atom (0-based index) against the rest of the system.
    #[arg(long, value_name = "INDEX")]
    pub candidate: Option<usize>,

    /// Also print the Lennard-Jones gradient on every atom.
    #[arg(long)]
    pub forces: bool,

    /// Set a specific configuration value, overriding the config file.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `energies` subcommand.
#[derive(Args, Debug)]
pub struct EnergiesArgs {
    /// Path to the binary energy file.
    #[arg(required = true, value_name = "PATH")]
    pub file: PathBuf,

    /// Export the frames to a CSV file instead of printing them.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_build_with_global_flags() {
        let cli = Cli::parse_from([
            "ljcluster", "-vv", "-j", "2", "build", "-i", "run.inp", "--seed", "42", "--recentre",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.threads, Some(2));
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.input, PathBuf::from("run.inp"));
                assert_eq!(args.seed.as_deref(), Some("42"));
                assert!(args.recentre);
                assert!(args.output.is_none());
            }
            other => panic!("expected build, got {other:?}"),
        }
    }

    #[test]
    fn parses_score_candidate() {
        let cli = Cli::parse_from([
            "ljcluster", "score", "-i", "c.xyz", "-t", "types.toml", "--candidate", "3", "--forces",
        ]);
        match cli.command {
            Commands::Score(args) => {
                assert_eq!(args.candidate, Some(3));
                assert!(args.forces);
            }
            other => panic!("expected score, got {other:?}"),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["ljcluster", "-q", "-v", "energies", "e.dat"]);
        assert!(result.is_err());
    }
}
