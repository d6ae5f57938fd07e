use std::collections::{BTreeSet, HashMap, HashSet};

/// Character-bigram postings over the normalized reference names.
///
/// Only used when the run opts into prefiltering: a prospect is then scored
/// against the references that share at least one bigram with it.
#[derive(Debug, Default)]
pub(crate) struct BigramIndex {
    postings: HashMap<String, Vec<usize>>,
}

impl BigramIndex {
    pub(crate) fn build<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();
        for (slot, name) in names.into_iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            for gram in bigrams(name) {
                postings.entry(gram).or_default().push(slot);
            }
        }
        Self { postings }
    }

    /// Slots of the indexed names sharing a bigram with `name`, ascending.
    pub(crate) fn candidates(&self, name: &str) -> BTreeSet<usize> {
        let mut slots = BTreeSet::new();
        if name.is_empty() {
            return slots;
        }
        for gram in bigrams(name) {
            if let Some(posting) = self.postings.get(&gram) {
                slots.extend(posting.iter().copied());
            }
        }
        slots
    }
}

fn bigrams(name: &str) -> HashSet<String> {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() < 2 {
        return HashSet::from([name.to_string()]);
    }
    chars
        .windows(2)
        .map(|pair| pair.iter().collect::<String>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_names_sharing_a_bigram() {
        let index = BigramIndex::build(["acme", "zenith", "", "acorn"]);
        let slots: Vec<usize> = index.candidates("acme tools").into_iter().collect();
        assert_eq!(slots, vec![0, 3]);
    }

    #[test]
    fn single_character_names_index_themselves() {
        let index = BigramIndex::build(["x", "xy"]);
        let slots: Vec<usize> = index.candidates("x").into_iter().collect();
        assert_eq!(slots, vec![0]);
    }

    #[test]
    fn empty_name_has_no_candidates() {
        let index = BigramIndex::build(["acme"]);
        assert!(index.candidates("").is_empty());
    }
}
