//! Batch results, cumulative statistics and the cost ranking of survivors

use crate::ir::{Expr, function_source};
use crate::semantics::cost::rank_order;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// A candidate that reproduced every case, after normalization
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    /// The normalized tree
    pub expr: Arc<Expr>,
    /// Function-literal source, e.g. `(a, b) -> a + b`
    pub rendered_text: String,
    pub cost: u32,
}

impl Pass {
    /// Wrap a normalized tree over `arity` variables
    pub fn new(expr: Arc<Expr>, arity: usize) -> Self {
        let rendered_text = function_source(&expr, arity);
        let cost = expr.cost();
        Self {
            expr,
            rendered_text,
            cost,
        }
    }
}

/// Result of one `run_batch` call
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// The enumeration has nothing left
    pub exhausted: bool,
    pub passes: Vec<Pass>,
    /// Candidates that failed a case in this batch
    pub failure_count: u64,
    /// Rendered text of a few randomly sampled failures
    pub failure_samples: Vec<String>,
    /// Candidates pulled from the enumerator, skipped ones included
    pub pulled: u64,
    /// Pulled candidates skipped for not reading any input
    pub skipped: u64,
}

impl BatchResult {
    /// Candidates checked against the cases
    pub fn examined(&self) -> u64 {
        self.pulled - self.skipped
    }
}

/// Statistics accumulated over every batch of a session
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    pub batches: u64,
    pub candidates_pulled: u64,
    pub candidates_skipped: u64,
    pub failures: u64,
    pub passes: u64,
    /// Time spent inside batches
    pub elapsed_time: Duration,
}

impl SearchStatistics {
    /// Fold one batch into the totals
    pub fn record(&mut self, batch: &BatchResult, elapsed: Duration) {
        self.record_counts(
            batch.pulled,
            batch.skipped,
            batch.failure_count,
            batch.passes.len() as u64,
            elapsed,
        );
    }

    /// Fold the counts of one batch into the totals
    pub fn record_counts(
        &mut self,
        pulled: u64,
        skipped: u64,
        failures: u64,
        passes: u64,
        elapsed: Duration,
    ) {
        self.batches += 1;
        self.candidates_pulled += pulled;
        self.candidates_skipped += skipped;
        self.failures += failures;
        self.passes += passes;
        self.elapsed_time += elapsed;
    }

    pub fn candidates_examined(&self) -> u64 {
        self.candidates_pulled - self.candidates_skipped
    }

    /// Get the rate of examined candidates that passed every case
    pub fn pass_rate(&self) -> f64 {
        let examined = self.candidates_examined();
        if examined == 0 {
            0.0
        } else {
            self.passes as f64 / examined as f64
        }
    }

    /// Get candidates pulled per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.candidates_pulled as f64 / secs
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Batches: {}\n", self.batches));
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        s.push_str(&format!("Candidates pulled: {}\n", self.candidates_pulled));
        s.push_str(&format!(
            "Constant-only skipped: {}\n",
            self.candidates_skipped
        ));
        s.push_str(&format!("Failures: {}\n", self.failures));
        s.push_str(&format!(
            "Passes: {} ({:.4}% of examined)\n",
            self.passes,
            self.pass_rate() * 100.0
        ));
        s.push_str(&format!(
            "Throughput: {:.0} candidates/sec\n",
            self.throughput()
        ));
        s
    }
}

/// A distinct survivor in the ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedPass {
    pub rendered_text: String,
    pub cost: u32,
}

/// Distinct passes ordered by cost, then by source text.
///
/// Many enumerated trees normalize to the same expression; the ranking keeps
/// each rendered form once.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    entries: Vec<RankedPass>,
    seen: HashSet<String>,
}

impl Ranking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rendered pass. Returns true if it was not ranked yet.
    pub fn insert(&mut self, rendered_text: &str, cost: u32) -> bool {
        if !self.seen.insert(rendered_text.to_string()) {
            return false;
        }
        let position = self
            .entries
            .binary_search_by(|e| rank_order(e.cost, &e.rendered_text, cost, rendered_text))
            .unwrap_or_else(|insert_at| insert_at);
        self.entries.insert(
            position,
            RankedPass {
                rendered_text: rendered_text.to_string(),
                cost,
            },
        );
        true
    }

    /// Add every pass of a batch, returning how many were new
    pub fn extend(&mut self, passes: &[Pass]) -> usize {
        passes
            .iter()
            .filter(|pass| self.insert(&pass.rendered_text, pass.cost))
            .count()
    }

    /// The cheapest survivor
    pub fn best(&self) -> Option<&RankedPass> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedPass> {
        self.entries.iter()
    }
}
