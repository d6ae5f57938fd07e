use std::sync::Mutex;

use crate::config::MatchConfig;
use crate::matching::normalizer::{NormalizedName, Normalizer};
use crate::matching::orchestrator::{BatchProgress, ProgressSink};
use crate::matching::results::MatchResult;
use crate::matching::ProspectEntry;

pub(super) fn config() -> MatchConfig {
    MatchConfig::default()
}

pub(super) fn config_with(suffixes: &[&str], remove_words: &[&str]) -> MatchConfig {
    MatchConfig {
        common_suffixes: suffixes.iter().map(|s| s.to_string()).collect(),
        common_remove_words: remove_words.iter().map(|s| s.to_string()).collect(),
        ..MatchConfig::default()
    }
}

pub(super) fn normalizer() -> Normalizer {
    Normalizer::new(&config())
}

pub(super) fn normalize(raw: &str) -> String {
    normalizer().normalize(raw).as_str().to_string()
}

pub(super) fn prospect(position: usize, raw: &str, normalized: &str) -> ProspectEntry {
    ProspectEntry {
        position,
        raw: raw.to_string(),
        normalized: normalized_name(normalized),
    }
}

pub(super) fn normalized_name(value: &str) -> NormalizedName {
    // Every token here is already in normalized form, so this round-trips.
    Normalizer::new(&config_with(&[], &[])).normalize(value)
}

pub(super) fn prospects() -> Vec<&'static str> {
    vec![
        "Acme Corp",
        "Zenith Traders",
        "",
        "LLC",
        "Global Systems Inc",
        "Blue River Foods Pvt. Ltd.",
        "Northwind Trading Co",
        "Johnson & Johnson",
        "Contoso (India) Limited",
        "Fabrikam Holdings",
        "Acme Corporation",
        "Initech Solutions",
    ]
}

pub(super) fn references() -> Vec<&'static str> {
    vec![
        "ACME CORPORATION",
        "Systems Global Incorporated",
        "Company",
        "Blue River Foods Private Limited",
        "Johnson and Johnson",
        "Contoso Ltd",
        "Northwind Traders",
        "Fabrikam, Inc.",
        "Umbrella Health",
        "",
    ]
}

pub(super) fn sorted_triples(results: &[MatchResult]) -> Vec<(String, String, u8)> {
    let mut triples: Vec<(String, String, u8)> = results
        .iter()
        .map(|result| {
            (
                result.prospect_name.clone(),
                result.matched_reference_name.clone(),
                result.similarity_percent,
            )
        })
        .collect();
    triples.sort();
    triples
}

#[derive(Default)]
pub(super) struct RecordingProgress {
    events: Mutex<Vec<BatchProgress>>,
}

impl RecordingProgress {
    pub(super) fn events(&self) -> Vec<BatchProgress> {
        self.events.lock().expect("progress mutex poisoned").clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn batch_finished(&self, progress: &BatchProgress) {
        self.events
            .lock()
            .expect("progress mutex poisoned")
            .push(progress.clone());
    }
}
