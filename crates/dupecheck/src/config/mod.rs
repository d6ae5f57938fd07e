use serde::{Deserialize, Serialize};
use std::env;

/// Legal-entity suffixes stripped from the tail of a company name.
pub const DEFAULT_SUFFIXES: &[&str] = &[
    "private limited",
    "pvt ltd",
    "pvt. ltd.",
    "pvt. ltd",
    "pvt ltd.",
    "pvt.",
    "pvt",
    "llp",
    "llc",
    "inc",
    "corporation",
    "limited",
    "ltd.",
    "ltd",
    "co",
    "company",
    "group",
    "holdings",
    "international",
    "enterprises",
    "solutions",
    "services",
    "corp",
    "incorporated",
];

/// Filler words removed wherever they appear in a name.
pub const DEFAULT_REMOVE_WORDS: &[&str] = &["india"];

pub const DEFAULT_THRESHOLD: f64 = 90.0;
pub const DEFAULT_BATCH_SIZE: usize = 1000;
pub const DEFAULT_NAME_FIELD: &str = "Company Name";

/// Top-level configuration for a duplicate-check run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub matching: MatchConfig,
    pub fields: FieldMapping,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Read `.env` and `DUPECHECK_*` variables over the defaults.
    ///
    /// Only parse failures are reported here. Range checks belong to
    /// [`MatchConfig::validate`], run once command-line overrides are applied.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let similarity_threshold = match env::var("DUPECHECK_THRESHOLD") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidThreshold(raw))?,
            Err(_) => DEFAULT_THRESHOLD,
        };

        let batch_size = match env::var("DUPECHECK_BATCH_SIZE") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidBatchSize(raw))?,
            Err(_) => DEFAULT_BATCH_SIZE,
        };

        let common_suffixes = env::var("DUPECHECK_SUFFIXES")
            .map(|raw| split_list(&raw))
            .unwrap_or_else(|_| owned(DEFAULT_SUFFIXES));
        let common_remove_words = env::var("DUPECHECK_REMOVE_WORDS")
            .map(|raw| split_list(&raw))
            .unwrap_or_else(|_| owned(DEFAULT_REMOVE_WORDS));

        let parallel = match env::var("DUPECHECK_PARALLEL") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "DUPECHECK_PARALLEL",
                value: raw,
            })?,
            Err(_) => false,
        };

        let prospect_field =
            env::var("DUPECHECK_PROSPECT_FIELD").unwrap_or_else(|_| DEFAULT_NAME_FIELD.to_string());
        let reference_field = env::var("DUPECHECK_REFERENCE_FIELD")
            .unwrap_or_else(|_| DEFAULT_NAME_FIELD.to_string());

        let log_level = env::var("DUPECHECK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let matching = MatchConfig {
            similarity_threshold,
            common_suffixes,
            common_remove_words,
            batch_size,
            parallel,
            ngram_prefilter: false,
        };

        Ok(Self {
            matching,
            fields: FieldMapping {
                prospect_field,
                reference_field,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Options that shape normalization and matching. Built once per run and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub similarity_threshold: f64,
    pub common_suffixes: Vec<String>,
    pub common_remove_words: Vec<String>,
    pub batch_size: usize,
    pub parallel: bool,
    pub ngram_prefilter: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_THRESHOLD,
            common_suffixes: owned(DEFAULT_SUFFIXES),
            common_remove_words: owned(DEFAULT_REMOVE_WORDS),
            batch_size: DEFAULT_BATCH_SIZE,
            parallel: false,
            ngram_prefilter: false,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.similarity_threshold));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        Ok(())
    }
}

/// Column names holding the company name in each input dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub prospect_field: String,
    pub reference_field: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            prospect_field: DEFAULT_NAME_FIELD.to_string(),
            reference_field: DEFAULT_NAME_FIELD.to_string(),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DUPECHECK_THRESHOLD must be a number, got '{0}'")]
    InvalidThreshold(String),
    #[error("similarity threshold must be within 0..=100, got {0}")]
    ThresholdOutOfRange(f64),
    #[error("DUPECHECK_BATCH_SIZE must be a positive integer, got '{0}'")]
    InvalidBatchSize(String),
    #[error("batch size must be greater than zero")]
    ZeroBatchSize,
    #[error("{name} must be true or false, got '{value}'")]
    InvalidFlag { name: &'static str, value: String },
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
