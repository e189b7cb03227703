use ljcluster::core::forcefield::DEFAULT_CONFINEMENT_CONSTANT;
use ljcluster::engine::config::{DEFAULT_MAX_PLACEMENT_ATTEMPTS, DEFAULT_SEPARATION_FACTOR};
use ljcluster::engine::random::DEFAULT_CACHE_CAPACITY;

pub struct DefaultsConfig {
    pub cache_capacity: usize,
    pub max_placement_attempts: u64,
    pub separation_factor: f64,
    pub confinement_constant: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            max_placement_attempts: DEFAULT_MAX_PLACEMENT_ATTEMPTS,
            separation_factor: DEFAULT_SEPARATION_FACTOR,
            confinement_constant: DEFAULT_CONFINEMENT_CONSTANT,
        }
    }
}
