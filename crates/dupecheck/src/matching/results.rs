use super::matcher::MatchCandidate;
use serde::Serialize;

/// One possible duplicate as written to the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub prospect_name: String,
    pub matched_reference_name: String,
    pub similarity_percent: u8,
    pub prospect_normalized: String,
    pub reference_normalized: String,
}

impl MatchResult {
    fn from_candidate(candidate: MatchCandidate) -> Self {
        Self {
            prospect_name: candidate.prospect_raw,
            matched_reference_name: candidate.reference_raw,
            similarity_percent: round_percent(candidate.score),
            prospect_normalized: candidate.prospect_normalized.as_str().to_string(),
            reference_normalized: candidate.reference_normalized.as_str().to_string(),
        }
    }
}

/// Turn surviving candidates into output rows, strongest first.
///
/// Ties keep prospect order, then reference order, so the output does not
/// depend on how the prospects were batched.
pub fn assemble(mut candidates: Vec<MatchCandidate>) -> Vec<MatchResult> {
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.prospect_position.cmp(&b.prospect_position))
            .then(a.reference_position.cmp(&b.reference_position))
    });

    candidates
        .into_iter()
        .map(MatchResult::from_candidate)
        .collect()
}

fn round_percent(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::normalizer::NormalizedName;

    fn candidate(
        prospect: &str,
        reference: &str,
        score: f64,
        positions: (usize, usize),
    ) -> MatchCandidate {
        MatchCandidate {
            prospect_raw: prospect.to_string(),
            prospect_normalized: NormalizedName::default(),
            reference_raw: reference.to_string(),
            reference_normalized: NormalizedName::default(),
            score,
            prospect_position: positions.0,
            reference_position: positions.1,
        }
    }

    #[test]
    fn orders_by_descending_score_then_position() {
        let results = assemble(vec![
            candidate("Beta", "Beta Ltd", 92.0, (1, 0)),
            candidate("Alpha", "Alpha One", 95.0, (0, 2)),
            candidate("Alpha", "Alpha Inc", 95.0, (0, 1)),
            candidate("Gamma", "Gamma Co", 100.0, (2, 3)),
        ]);

        let pairs: Vec<(&str, &str)> = results
            .iter()
            .map(|result| {
                (
                    result.prospect_name.as_str(),
                    result.matched_reference_name.as_str(),
                )
            })
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Gamma", "Gamma Co"),
                ("Alpha", "Alpha Inc"),
                ("Alpha", "Alpha One"),
                ("Beta", "Beta Ltd"),
            ]
        );
    }

    #[test]
    fn rounds_scores_to_whole_percent() {
        let results = assemble(vec![
            candidate("A", "B", 91.666, (0, 0)),
            candidate("C", "D", 90.4, (1, 0)),
        ]);
        assert_eq!(results[0].similarity_percent, 92);
        assert_eq!(results[1].similarity_percent, 90);
    }

    #[test]
    fn keeps_every_match_for_a_prospect() {
        let results = assemble(vec![
            candidate("Acme", "Acme Inc", 100.0, (0, 0)),
            candidate("Acme", "ACME LLC", 100.0, (0, 1)),
        ]);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|result| result.prospect_name == "Acme"));
    }
}
