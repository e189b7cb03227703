mod defaults;

use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use ljcluster::engine::config::{EngineConfig, EngineConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialRandomConfig {
    #[serde(rename = "cache-capacity")]
    cache_capacity: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPlacementConfig {
    #[serde(rename = "max-attempts")]
    max_attempts: Option<u64>,
    #[serde(rename = "separation-factor")]
    separation_factor: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPotentialConfig {
    #[serde(rename = "confinement-constant")]
    confinement_constant: Option<f64>,
}

/// Engine settings as read from a TOML file, before defaults and overrides are applied.
///
/// ```toml
/// [random]
/// cache-capacity = 2048
///
/// [placement]
/// max-attempts = 100000
/// separation-factor = 5.0
///
/// [potential]
/// confinement-constant = 4.0
/// ```
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialEngineConfig {
    random: Option<PartialRandomConfig>,
    placement: Option<PartialPlacementConfig>,
    potential: Option<PartialPotentialConfig>,
}

impl PartialEngineConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `path` if one is given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies `--set` overrides, fills the gaps from [`DefaultsConfig`], and validates.
    pub fn merge_with_cli(mut self, set_values: &[String]) -> Result<EngineConfig> {
        self.apply_set_values(set_values)?;

        let defaults = DefaultsConfig::default();
        let random = self.random.take().unwrap_or_default();
        let placement = self.placement.take().unwrap_or_default();
        let potential = self.potential.take().unwrap_or_default();

        EngineConfigBuilder::new()
            .cache_capacity(random.cache_capacity.unwrap_or(defaults.cache_capacity))
            .max_placement_attempts(
                placement
                    .max_attempts
                    .unwrap_or(defaults.max_placement_attempts),
            )
            .separation_factor(
                placement
                    .separation_factor
                    .unwrap_or(defaults.separation_factor),
            )
            .confinement_constant(
                potential
                    .confinement_constant
                    .unwrap_or(defaults.confinement_constant),
            )
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "random.cache-capacity" => {
                    self.random
                        .get_or_insert_with(Default::default)
                        .cache_capacity = Some(parse_value(key, value_str)?);
                }
                "placement.max-attempts" => {
                    self.placement
                        .get_or_insert_with(Default::default)
                        .max_attempts = Some(parse_value(key, value_str)?);
                }
                "placement.separation-factor" => {
                    self.placement
                        .get_or_insert_with(Default::default)
                        .separation_factor = Some(parse_value(key, value_str)?);
                }
                "potential.confinement-constant" => {
                    self.potential
                        .get_or_insert_with(Default::default)
                        .confinement_constant = Some(parse_value(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str) -> Result<T> {
    value_str
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value_str)))
}
