//! Company-name normalization and cross-list fuzzy matching.

mod matcher;
mod normalizer;
mod orchestrator;
mod prefilter;
mod results;
mod scorer;

#[cfg(test)]
mod tests;

pub use matcher::{CandidateMatcher, MatchCandidate, ProspectEntry, ReferenceEntry};
pub use normalizer::{NormalizationCache, NormalizedName, Normalizer};
pub use orchestrator::{
    BatchOrchestrator, BatchProgress, MatchOutcome, NoopProgress, ProgressSink, RunSummary,
    TracingProgress,
};
pub use results::{assemble, MatchResult};
pub use scorer::{score_token_sets, token_set_score, TokenSet};
