use super::normalizer::NormalizedName;
use super::prefilter::BigramIndex;
use super::scorer::{score_token_sets, TokenSet};
use crate::config::MatchConfig;

/// A reference-set name alongside its normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    pub position: usize,
    pub raw: String,
    pub normalized: NormalizedName,
}

/// A prospect name alongside its normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProspectEntry {
    pub position: usize,
    pub raw: String,
    pub normalized: NormalizedName,
}

/// One scored prospect/reference pairing that cleared the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub prospect_raw: String,
    pub prospect_normalized: NormalizedName,
    pub reference_raw: String,
    pub reference_normalized: NormalizedName,
    pub score: f64,
    pub(crate) prospect_position: usize,
    pub(crate) reference_position: usize,
}

#[derive(Debug)]
struct IndexedReference {
    entry: ReferenceEntry,
    tokens: TokenSet,
}

/// Scores prospects against the shared reference set.
///
/// References whose normalized name is empty are dropped on construction so
/// they can never pair with anything.
#[derive(Debug)]
pub struct CandidateMatcher {
    references: Vec<IndexedReference>,
    threshold: f64,
    index: Option<BigramIndex>,
}

impl CandidateMatcher {
    pub fn new(references: Vec<ReferenceEntry>, config: &MatchConfig) -> Self {
        let references: Vec<IndexedReference> = references
            .into_iter()
            .filter(|entry| !entry.normalized.is_empty())
            .map(|entry| IndexedReference {
                tokens: TokenSet::new(entry.normalized.as_str()),
                entry,
            })
            .collect();

        let index = config.ngram_prefilter.then(|| {
            BigramIndex::build(
                references
                    .iter()
                    .map(|reference| reference.entry.normalized.as_str()),
            )
        });

        Self {
            references,
            threshold: config.similarity_threshold,
            index,
        }
    }

    /// Number of references eligible for scoring.
    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn find_matches(&self, prospect: &ProspectEntry) -> Vec<MatchCandidate> {
        if prospect.normalized.is_empty() {
            return Vec::new();
        }

        let tokens = TokenSet::new(prospect.normalized.as_str());
        match &self.index {
            Some(index) => index
                .candidates(prospect.normalized.as_str())
                .into_iter()
                .filter_map(|slot| self.references.get(slot))
                .filter_map(|reference| self.score_pair(prospect, &tokens, reference))
                .collect(),
            None => self
                .references
                .iter()
                .filter_map(|reference| self.score_pair(prospect, &tokens, reference))
                .collect(),
        }
    }

    fn score_pair(
        &self,
        prospect: &ProspectEntry,
        prospect_tokens: &TokenSet,
        indexed: &IndexedReference,
    ) -> Option<MatchCandidate> {
        let score = score_token_sets(prospect_tokens, &indexed.tokens);
        if score < self.threshold {
            return None;
        }

        let reference = &indexed.entry;
        Some(MatchCandidate {
            prospect_raw: prospect.raw.clone(),
            prospect_normalized: prospect.normalized.clone(),
            reference_raw: reference.raw.clone(),
            reference_normalized: reference.normalized.clone(),
            score,
            prospect_position: prospect.position,
            reference_position: reference.position,
        })
    }
}
