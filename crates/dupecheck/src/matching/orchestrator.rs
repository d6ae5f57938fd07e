use super::matcher::{CandidateMatcher, MatchCandidate, ProspectEntry, ReferenceEntry};
use super::normalizer::{NormalizationCache, Normalizer};
use super::results::{assemble, MatchResult};
use crate::config::{ConfigError, MatchConfig};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Progress snapshot emitted after every completed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    /// 1-based.
    pub batch_index: usize,
    pub batch_count: usize,
    pub batch_len: usize,
    pub processed: usize,
    pub total: usize,
    pub batch_matches: usize,
    pub total_matches: usize,
}

/// Observer for batch progress, kept apart from the matching core.
pub trait ProgressSink: Send + Sync {
    fn batch_finished(&self, progress: &BatchProgress);
}

/// Discards progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn batch_finished(&self, _progress: &BatchProgress) {}
}

/// Logs one line per batch through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn batch_finished(&self, progress: &BatchProgress) {
        info!(
            batch = progress.batch_index,
            batches = progress.batch_count,
            processed = progress.processed,
            total = progress.total,
            batch_matches = progress.batch_matches,
            total_matches = progress.total_matches,
            "batch complete"
        );
    }
}

/// Counters describing one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub threshold: f64,
    pub batch_size: usize,
    pub prospects_total: usize,
    pub prospects_skipped: usize,
    pub prospects_processed: usize,
    pub references_total: usize,
    pub references_skipped: usize,
    pub batch_count: usize,
    pub batches_completed: usize,
    pub matches: usize,
    pub interrupted: bool,
}

#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub results: Vec<MatchResult>,
    pub summary: RunSummary,
}

/// Drives the matcher over the prospect list in fixed-size batches.
pub struct BatchOrchestrator<'a> {
    config: &'a MatchConfig,
    normalizer: Normalizer,
    progress: Arc<dyn ProgressSink>,
    stop: Option<Arc<AtomicBool>>,
}

impl<'a> BatchOrchestrator<'a> {
    /// Fails when `config` does not pass [`MatchConfig::validate`].
    pub fn new(config: &'a MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            normalizer: Normalizer::new(config),
            progress: Arc::new(NoopProgress),
            stop: None,
        })
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Checked between batches. Once set, the run returns what it has so far.
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn run<P, R>(&self, prospects: &[P], references: &[R]) -> MatchOutcome
    where
        P: AsRef<str>,
        R: AsRef<str>,
    {
        let started_at = Utc::now();
        let clock = Instant::now();
        let batch_size = self.config.batch_size;
        let mut cache = NormalizationCache::new();

        let reference_entries: Vec<ReferenceEntry> = references
            .iter()
            .enumerate()
            .map(|(position, raw)| ReferenceEntry {
                position,
                raw: raw.as_ref().to_string(),
                normalized: cache.normalize(&self.normalizer, raw.as_ref()),
            })
            .collect();
        let references_total = reference_entries.len();
        let matcher = CandidateMatcher::new(reference_entries, self.config);
        let references_skipped = references_total - matcher.len();

        info!(
            references = references_total,
            skipped = references_skipped,
            prefilter = self.config.ngram_prefilter,
            "reference set normalized"
        );

        let total = prospects.len();
        let batch_count = total.div_ceil(batch_size);
        let mut candidates: Vec<MatchCandidate> = Vec::new();
        let mut processed = 0;
        let mut prospects_skipped = 0;
        let mut batches_completed = 0;
        let mut interrupted = false;

        for (batch_number, batch) in prospects.chunks(batch_size).enumerate() {
            if self.stop_requested() {
                warn!(
                    completed = batches_completed,
                    batches = batch_count,
                    "stop requested; ending run early"
                );
                interrupted = true;
                break;
            }

            let offset = batch_number * batch_size;
            let entries: Vec<ProspectEntry> = batch
                .iter()
                .enumerate()
                .map(|(index, raw)| ProspectEntry {
                    position: offset + index,
                    raw: raw.as_ref().to_string(),
                    normalized: cache.normalize(&self.normalizer, raw.as_ref()),
                })
                .collect();
            prospects_skipped += entries
                .iter()
                .filter(|entry| entry.normalized.is_empty())
                .count();

            let batch_candidates = self.match_batch(&matcher, &entries);
            let batch_matches = batch_candidates.len();
            candidates.extend(batch_candidates);
            processed += batch.len();
            batches_completed += 1;

            self.progress.batch_finished(&BatchProgress {
                batch_index: batch_number + 1,
                batch_count,
                batch_len: batch.len(),
                processed,
                total,
                batch_matches,
                total_matches: candidates.len(),
            });
        }

        debug!(
            distinct_names = cache.len(),
            cache_hits = cache.hits(),
            "normalization cache"
        );

        let results = assemble(candidates);
        let summary = RunSummary {
            started_at,
            elapsed_ms: u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX),
            threshold: self.config.similarity_threshold,
            batch_size,
            prospects_total: total,
            prospects_skipped,
            prospects_processed: processed,
            references_total,
            references_skipped,
            batch_count,
            batches_completed,
            matches: results.len(),
            interrupted,
        };

        info!(
            matches = summary.matches,
            skipped = summary.prospects_skipped,
            elapsed_ms = summary.elapsed_ms,
            "matching finished"
        );

        MatchOutcome { results, summary }
    }

    fn match_batch(
        &self,
        matcher: &CandidateMatcher,
        entries: &[ProspectEntry],
    ) -> Vec<MatchCandidate> {
        if self.config.parallel {
            entries
                .par_iter()
                .map(|entry| matcher.find_matches(entry))
                .collect::<Vec<_>>()
                .into_iter()
                .flatten()
                .collect()
        } else {
            entries
                .iter()
                .flat_map(|entry| matcher.find_matches(entry))
                .collect()
        }
    }

    fn stop_requested(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Acquire))
    }
}
