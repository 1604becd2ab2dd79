//! A resumable search over one case set.
//!
//! A [`Session`] owns the enumeration cursor, the input slots every candidate
//! reads from and the sampling RNG. Each [`Session::run_batch`] call pulls a
//! fixed number of candidates, checks them against the cases and returns what
//! it found; the cursor picks up where the previous batch stopped.

use crate::catalog::Catalog;
use crate::error::ConfigError;
use crate::ir::{Case, InputSlots, function_source};
use crate::search::config::{SearchConfig, clamp_rate};
use crate::search::enumerate::{Enumerator, count_trees};
use crate::search::result::{BatchResult, Pass, SearchStatistics};
use crate::semantics::{CaseCheck, check_cases, normalize};
use crate::validation::validate_cases;
use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Instant;

pub struct Session {
    cases: Vec<Case>,
    slots: InputSlots,
    cursor: Enumerator,
    rng: ChaCha8Rng,
    failure_sample_rate: f64,
    batch_size: usize,
    statistics: SearchStatistics,
}

/// Create a session over `cases` with the default configuration and the given depth
pub fn create_session(cases: Vec<Case>, max_depth: usize) -> Result<Session, ConfigError> {
    Session::new(cases, &SearchConfig::default().with_max_depth(max_depth))
}

impl Session {
    /// Validate the cases and set up a fresh cursor.
    ///
    /// Fails before any search work if there are no cases, if the cases
    /// disagree on their input count, or if the depth is zero.
    pub fn new(cases: Vec<Case>, config: &SearchConfig) -> Result<Self, ConfigError> {
        let arity = validate_cases(&cases)?;
        if config.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }

        let catalog = Arc::new(Catalog::with_preset(config.catalog, arity));
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };

        match count_trees(&catalog, config.max_depth) {
            Some(total) => info!(
                "Session: {} cases over {} inputs, depth {}, {} factories, {} candidates",
                cases.len(),
                arity,
                config.max_depth,
                catalog.len(),
                total
            ),
            None => info!(
                "Session: {} cases over {} inputs, depth {}, {} factories, candidate count overflows",
                cases.len(),
                arity,
                config.max_depth,
                catalog.len()
            ),
        }

        Ok(Self {
            cases,
            slots: InputSlots::new(arity),
            cursor: Enumerator::new(catalog, config.max_depth),
            rng,
            failure_sample_rate: clamp_rate(config.failure_sample_rate),
            batch_size: config.batch_size.max(1),
            statistics: SearchStatistics::default(),
        })
    }

    /// Pull up to `batch_size` candidates and check each against every case.
    ///
    /// Candidates that read no input are pulled but skipped. The result only
    /// covers this call.
    pub fn run_batch(&mut self, batch_size: usize) -> BatchResult {
        let start = Instant::now();
        let arity = self.arity();
        let mut result = BatchResult::default();

        for _ in 0..batch_size {
            let Some(candidate) = self.cursor.next_expr() else {
                break;
            };
            result.pulled += 1;

            if !candidate.has_input() {
                result.skipped += 1;
                continue;
            }

            match check_cases(&candidate, &self.cases, &mut self.slots) {
                CaseCheck::Pass => {
                    let pass = Pass::new(normalize(&candidate), arity);
                    trace!("Pass: {} (cost {})", pass.rendered_text, pass.cost);
                    result.passes.push(pass);
                }
                CaseCheck::Fail { .. } => {
                    result.failure_count += 1;
                    if self.rng.random_bool(self.failure_sample_rate) {
                        result
                            .failure_samples
                            .push(function_source(&normalize(&candidate), arity));
                    }
                }
            }
        }

        result.exhausted = self.cursor.is_exhausted();
        let elapsed = start.elapsed();
        self.statistics.record(&result, elapsed);

        debug!(
            "Batch {}: pulled {}, skipped {}, {} passes, {} failures in {:.2?}{}",
            self.statistics.batches,
            result.pulled,
            result.skipped,
            result.passes.len(),
            result.failure_count,
            elapsed,
            if result.exhausted { " (exhausted)" } else { "" }
        );
        if result.exhausted {
            info!(
                "Search space exhausted after {} candidates",
                self.cursor.produced()
            );
            for line in self.statistics.format_summary().lines() {
                info!("  {}", line);
            }
        }

        result
    }

    /// Run one batch of the configured size
    pub fn run_default_batch(&mut self) -> BatchResult {
        self.run_batch(self.batch_size)
    }

    pub fn arity(&self) -> usize {
        self.slots.arity()
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.cursor.catalog()
    }

    pub fn max_depth(&self) -> usize {
        self.cursor.max_depth()
    }

    /// Candidates pulled over the whole session
    pub fn produced(&self) -> u64 {
        self.cursor.produced()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_exhausted()
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}
