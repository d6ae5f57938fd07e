use crate::config::MatchConfig;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical, comparable form of a company name.
///
/// An empty value means nothing matchable was left after normalization; such
/// names are never scored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedName(String);

impl NormalizedName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|token| !token.is_empty())
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Rewrites raw company names using the configured suffix and filler-word sets.
///
/// Character policy, applied to names and to the configured phrases alike:
/// bracketed asides (`(..)`, `[..]`, `{..}`) are dropped with their contents,
/// text is NFKD-folded without combining marks and lowercased, `&` becomes the
/// token `and`, apostrophes and periods are deleted in place, and any other
/// non-alphanumeric character separates tokens.
#[derive(Debug, Clone)]
pub struct Normalizer {
    suffixes: Vec<Vec<String>>,
    remove_words: Vec<Vec<String>>,
}

impl Normalizer {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            suffixes: compile_phrases(&config.common_suffixes),
            remove_words: compile_phrases(&config.common_remove_words),
        }
    }

    pub fn normalize(&self, raw: &str) -> NormalizedName {
        if raw.trim().is_empty() {
            return NormalizedName::default();
        }

        let mut tokens = tokenize(raw);
        remove_phrases(&mut tokens, &self.remove_words);
        strip_trailing_phrases(&mut tokens, &self.suffixes);

        NormalizedName(tokens.join(" "))
    }
}

/// Per-run memo of raw name to normalized name.
///
/// Each key is written once; lookups after that only read.
#[derive(Debug, Default)]
pub struct NormalizationCache {
    entries: HashMap<String, NormalizedName>,
    hits: usize,
}

impl NormalizationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, normalizer: &Normalizer, raw: &str) -> NormalizedName {
        if let Some(cached) = self.entries.get(raw) {
            self.hits += 1;
            return cached.clone();
        }

        let normalized = normalizer.normalize(raw);
        self.entries.insert(raw.to_string(), normalized.clone());
        normalized
    }

    pub fn get(&self, raw: &str) -> Option<&NormalizedName> {
        self.entries.get(raw)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}

fn compile_phrases(phrases: &[String]) -> Vec<Vec<String>> {
    let mut compiled: Vec<Vec<String>> = phrases
        .iter()
        .map(|phrase| tokenize(phrase))
        .filter(|tokens| !tokens.is_empty())
        .collect();

    compiled.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    compiled.dedup();
    compiled
}

fn tokenize(raw: &str) -> Vec<String> {
    let cleaned = raw.replace(['\u{feff}', '\u{200b}'], "");
    let without_asides = strip_bracketed(&cleaned);

    let mut text = String::with_capacity(without_asides.len());
    let folded = without_asides
        .nfkd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .filter(|ch| !is_combining_mark(*ch));

    for ch in folded {
        match ch {
            '&' => text.push_str(" and "),
            '\'' | '\u{2019}' | '.' => {}
            ch if ch.is_alphanumeric() => text.push(ch),
            _ => text.push(' '),
        }
    }

    text.split_whitespace().map(str::to_string).collect()
}

fn strip_bracketed(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());
    let mut index = 0;

    while index < chars.len() {
        let closing = match chars[index] {
            '(' => Some(')'),
            '[' => Some(']'),
            '{' => Some('}'),
            _ => None,
        };

        if let Some(closing) = closing {
            if let Some(offset) = chars[index + 1..].iter().position(|&ch| ch == closing) {
                index += offset + 2;
                out.push(' ');
                continue;
            }
        }

        out.push(chars[index]);
        index += 1;
    }

    out
}

/// Drops every whole-token occurrence of the given phrases, repeating until
/// no occurrence is left.
fn remove_phrases(tokens: &mut Vec<String>, phrases: &[Vec<String>]) {
    if phrases.is_empty() {
        return;
    }

    loop {
        let mut keep = vec![true; tokens.len()];
        let mut removed = false;
        let mut index = 0;

        'scan: while index < tokens.len() {
            for phrase in phrases {
                if tokens[index..].starts_with(phrase) {
                    keep[index..index + phrase.len()].fill(false);
                    index += phrase.len();
                    removed = true;
                    continue 'scan;
                }
            }
            index += 1;
        }

        if !removed {
            return;
        }

        let mut flags = keep.into_iter();
        tokens.retain(|_| flags.next().unwrap_or(true));
    }
}

/// Strips phrases from the end of the token list only, longest phrase first.
fn strip_trailing_phrases(tokens: &mut Vec<String>, phrases: &[Vec<String>]) {
    while let Some(phrase) = phrases
        .iter()
        .find(|phrase| tokens.ends_with(phrase.as_slice()))
    {
        let keep = tokens.len() - phrase.len();
        tokens.truncate(keep);
    }
}

#[cfg(test)]
pub(crate) fn tokenize_for_tests(value: &str) -> Vec<String> {
    tokenize(value)
}
