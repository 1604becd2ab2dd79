//! Configuration types for the search loop

use crate::catalog::CatalogPreset;

/// Default maximum tree depth
pub const DEFAULT_MAX_DEPTH: usize = 3;
/// Default number of candidates pulled per batch
pub const DEFAULT_BATCH_SIZE: usize = 50_000;
/// Default probability of keeping a failing candidate as a diagnostic sample
pub const DEFAULT_FAILURE_SAMPLE_RATE: f64 = 0.0005;

/// Main search configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Maximum depth of enumerated trees
    pub max_depth: usize,
    /// Candidates pulled per batch when the caller does not say otherwise
    pub batch_size: usize,
    /// Probability in `[0, 1]` of sampling each failing candidate
    pub failure_sample_rate: f64,
    /// Seed for the sampling RNG (None = random seed)
    pub seed: Option<u64>,
    /// Primitive menu offered to the enumerator
    pub catalog: CatalogPreset,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            batch_size: DEFAULT_BATCH_SIZE,
            failure_sample_rate: DEFAULT_FAILURE_SAMPLE_RATE,
            seed: None,
            catalog: CatalogPreset::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Set the failure sample rate, clamped into `[0, 1]` (NaN disables sampling)
    pub fn with_failure_sample_rate(mut self, rate: f64) -> Self {
        self.failure_sample_rate = clamp_rate(rate);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_seed_option(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_catalog(mut self, catalog: CatalogPreset) -> Self {
        self.catalog = catalog;
        self
    }
}

/// Clamp a probability into `[0, 1]`, mapping NaN to 0
pub fn clamp_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        0.0
    } else {
        rate.clamp(0.0, 1.0)
    }
}
