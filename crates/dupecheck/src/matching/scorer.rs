use std::collections::BTreeSet;

/// Sorted, de-duplicated tokens of a normalized name.
///
/// Built once per name so repeated scoring against the same reference does
/// not re-split it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet(BTreeSet<String>);

impl TokenSet {
    pub fn new(name: &str) -> Self {
        Self(name.split_whitespace().map(str::to_string).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Token-set similarity between two normalized names, in `0.0..=100.0`.
///
/// Both names are reduced to sorted, de-duplicated token sets. The shared
/// tokens are compared against each side's full token string and the two
/// full strings against each other; the best normalized Levenshtein ratio
/// wins. Word order never matters and a name whose tokens are a subset of the
/// other's scores 100. Empty input scores 0.
pub fn token_set_score(left: &str, right: &str) -> f64 {
    score_token_sets(&TokenSet::new(left), &TokenSet::new(right))
}

/// [`token_set_score`] over prebuilt token sets.
pub fn score_token_sets(left: &TokenSet, right: &TokenSet) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let shared: Vec<&str> = left.0.intersection(&right.0).map(String::as_str).collect();
    let left_only: Vec<&str> = left.0.difference(&right.0).map(String::as_str).collect();
    let right_only: Vec<&str> = right.0.difference(&left.0).map(String::as_str).collect();

    let shared_text = shared.join(" ");
    let left_text = join_sections(&shared_text, &left_only);
    let right_text = join_sections(&shared_text, &right_only);

    let mut best = ratio(&left_text, &right_text);
    if !shared.is_empty() {
        best = best
            .max(ratio(&shared_text, &left_text))
            .max(ratio(&shared_text, &right_text));
    }

    (best * 100.0).clamp(0.0, 100.0)
}

fn join_sections(shared: &str, rest: &[&str]) -> String {
    match (shared.is_empty(), rest.is_empty()) {
        (_, true) => shared.to_string(),
        (true, false) => rest.join(" "),
        (false, false) => format!("{shared} {}", rest.join(" ")),
    }
}

fn ratio(left: &str, right: &str) -> f64 {
    strsim::normalized_levenshtein(left, right)
}
