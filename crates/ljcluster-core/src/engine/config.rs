use thiserror::Error;

pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: u64 = 100_000;
pub const DEFAULT_SEPARATION_FACTOR: f64 = 5.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value {value} for parameter '{name}'")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Number of uniform draws generated per refill of the random cache.
    pub cache_capacity: usize,
    /// Attempts allowed per atom before a random build gives up.
    pub max_placement_attempts: u64,
    /// Minimum pair distance during a random build, in units of `sigma_i + sigma_j`.
    pub separation_factor: f64,
    /// Radius of the confinement restraint, in units of the atom's sigma.
    pub confinement_constant: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: super::random::DEFAULT_CACHE_CAPACITY,
            max_placement_attempts: DEFAULT_MAX_PLACEMENT_ATTEMPTS,
            separation_factor: DEFAULT_SEPARATION_FACTOR,
            confinement_constant: crate::core::forcefield::DEFAULT_CONFINEMENT_CONSTANT,
        }
    }
}

#[derive(Default)]
pub struct EngineConfigBuilder {
    cache_capacity: Option<usize>,
    max_placement_attempts: Option<u64>,
    separation_factor: Option<f64>,
    confinement_constant: Option<f64>,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }
    pub fn max_placement_attempts(mut self, attempts: u64) -> Self {
        self.max_placement_attempts = Some(attempts);
        self
    }
    pub fn separation_factor(mut self, factor: f64) -> Self {
        self.separation_factor = Some(factor);
        self
    }
    pub fn confinement_constant(mut self, k: f64) -> Self {
        self.confinement_constant = Some(k);
        self
    }

    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let config = EngineConfig {
            cache_capacity: self
                .cache_capacity
                .ok_or(ConfigError::MissingParameter("cache_capacity"))?,
            max_placement_attempts: self
                .max_placement_attempts
                .ok_or(ConfigError::MissingParameter("max_placement_attempts"))?,
            separation_factor: self
                .separation_factor
                .ok_or(ConfigError::MissingParameter("separation_factor"))?,
            confinement_constant: self
                .confinement_constant
                .ok_or(ConfigError::MissingParameter("confinement_constant"))?,
        };
        config.validate()?;
        Ok(config)
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == 0 {
            return Err(invalid("cache_capacity", self.cache_capacity));
        }
        if self.max_placement_attempts == 0 {
            return Err(invalid(
                "max_placement_attempts",
                self.max_placement_attempts,
            ));
        }
        if !self.separation_factor.is_finite() || self.separation_factor < 0.0 {
            return Err(invalid("separation_factor", self.separation_factor));
        }
        if !self.confinement_constant.is_finite() || self.confinement_constant <= 0.0 {
            return Err(invalid("confinement_constant", self.confinement_constant));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
            .cache_capacity(2048)
            .max_placement_attempts(100_000)
            .separation_factor(5.0)
            .confinement_constant(4.0)
    }

    #[test]
    fn builder_with_all_values_matches_default() {
        assert_eq!(complete().build().unwrap(), EngineConfig::default());
    }

    #[test]
    fn builder_reports_missing_parameter() {
        let result = EngineConfigBuilder::new()
            .cache_capacity(16)
            .separation_factor(5.0)
            .confinement_constant(4.0)
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingParameter("max_placement_attempts")
        );
    }

    #[test]
    fn builder_rejects_zero_capacity() {
        let result = complete().cache_capacity(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                name: "cache_capacity",
                ..
            })
        ));
    }

    #[test]
    fn builder_rejects_non_positive_confinement_constant() {
        let result = complete().confinement_constant(0.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                name: "confinement_constant",
                ..
            })
        ));
    }

    #[test]
    fn zero_separation_factor_is_allowed() {
        assert!(complete().separation_factor(0.0).build().is_ok());
    }
}
