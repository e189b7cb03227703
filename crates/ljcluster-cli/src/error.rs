use ljcluster::core::forcefield::params::ParamLoadError;
use ljcluster::core::io::energy::EnergyFileError;
use ljcluster::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Params(#[from] ParamLoadError),

    #[error("Energy file error: {0}")]
    EnergyFile(#[from] EnergyFileError),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
