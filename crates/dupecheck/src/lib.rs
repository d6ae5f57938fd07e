//! Flag prospects that already exist in a reference export (e.g. a CRM dump)
//! by fuzzy company-name matching.

pub mod config;
pub mod dataset;
pub mod error;
pub mod matching;
pub mod telemetry;
