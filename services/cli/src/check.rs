use crate::cli::RuleArgs;
use clap::Args;
use dupecheck::config::AppConfig;
use dupecheck::dataset;
use dupecheck::error::AppError;
use dupecheck::matching::{
    BatchOrchestrator, MatchOutcome, MatchResult, RunSummary, TracingProgress,
};
use dupecheck::telemetry;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

const PREVIEW_ROWS: usize = 10;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Prospect list (.csv, .tsv or a spreadsheet such as .xlsx)
    #[arg(long)]
    pub(crate) prospects: PathBuf,
    /// Reference export to check against, e.g. a CRM account dump (.csv, .tsv or .xlsx)
    #[arg(long)]
    pub(crate) reference: PathBuf,
    /// Where to write possible duplicates (.csv or .tsv)
    #[arg(long, default_value = "possible_duplicates.csv")]
    pub(crate) output: PathBuf,
    /// Column holding the company name in the prospect list
    #[arg(long)]
    pub(crate) prospect_field: Option<String>,
    /// Column holding the company name in the reference export
    #[arg(long)]
    pub(crate) reference_field: Option<String>,
    /// Minimum similarity (0-100) for a pair to be reported
    #[arg(long)]
    pub(crate) threshold: Option<f64>,
    /// Number of prospects matched per batch
    #[arg(long)]
    pub(crate) batch_size: Option<usize>,
    #[command(flatten)]
    pub(crate) rules: RuleArgs,
    /// Score each batch on all CPU cores
    #[arg(long)]
    pub(crate) parallel: bool,
    /// Only score references sharing a character bigram with the prospect
    #[arg(long)]
    pub(crate) ngram_prefilter: bool,
    /// Add the normalized names to every output row
    #[arg(long)]
    pub(crate) include_normalized: bool,
    /// Print the run summary as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    output: &'a Path,
    summary: &'a RunSummary,
    top_matches: &'a [MatchResult],
}

pub(crate) fn run_check(mut args: CheckArgs) -> Result<(), AppError> {
    let config = resolve_config(&mut args)?;
    telemetry::init(&config.telemetry)?;

    let outcome = check(&args, &config)?;

    if args.json {
        let preview = &outcome.results[..outcome.results.len().min(PREVIEW_ROWS)];
        let report = CheckReport {
            output: &args.output,
            summary: &outcome.summary,
            top_matches: preview,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_summary(&outcome, &args.output);
    }

    Ok(())
}

/// Environment first, then flags; validation only sees the merged result.
fn resolve_config(args: &mut CheckArgs) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    apply_overrides(&mut config, args);
    config.matching.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut AppConfig, args: &mut CheckArgs) {
    if let Some(field) = args.prospect_field.take() {
        config.fields.prospect_field = field;
    }
    if let Some(field) = args.reference_field.take() {
        config.fields.reference_field = field;
    }
    if let Some(threshold) = args.threshold {
        config.matching.similarity_threshold = threshold;
    }
    if let Some(batch_size) = args.batch_size {
        config.matching.batch_size = batch_size;
    }
    std::mem::take(&mut args.rules).apply(&mut config.matching);
    config.matching.parallel |= args.parallel;
    config.matching.ngram_prefilter |= args.ngram_prefilter;
}

/// Full run: output path, inputs, matching, results file. An unusable
/// output path fails before any input is read.
fn check(args: &CheckArgs, config: &AppConfig) -> Result<MatchOutcome, AppError> {
    dataset::prepare_output(&args.output)?;

    let outcome = execute(args, config)?;
    dataset::save_results(&args.output, &outcome.results, args.include_normalized)?;
    info!(path = %args.output.display(), rows = outcome.results.len(), "results written");

    Ok(outcome)
}

/// Load both inputs, then match. Either input failing to load aborts before
/// any matching starts.
fn execute(args: &CheckArgs, config: &AppConfig) -> Result<MatchOutcome, AppError> {
    let prospects = dataset::load_names(&args.prospects, &config.fields.prospect_field)?;
    let references = dataset::load_names(&args.reference, &config.fields.reference_field)?;

    info!(
        prospects = prospects.len(),
        references = references.len(),
        threshold = config.matching.similarity_threshold,
        batch_size = config.matching.batch_size,
        "datasets loaded"
    );

    let outcome = BatchOrchestrator::new(&config.matching)?
        .with_progress(Arc::new(TracingProgress))
        .run(&prospects, &references);

    Ok(outcome)
}

fn render_summary(outcome: &MatchOutcome, output: &Path) {
    let summary = &outcome.summary;

    println!("Duplicate check");
    println!(
        "Prospects: {} rows, {} skipped (blank after normalization)",
        summary.prospects_total, summary.prospects_skipped
    );
    println!(
        "Reference: {} rows, {} skipped (blank after normalization)",
        summary.references_total, summary.references_skipped
    );
    println!(
        "Threshold: {}%, {} batch(es) of up to {}, finished in {} ms",
        summary.threshold, summary.batch_count, summary.batch_size, summary.elapsed_ms
    );

    if outcome.results.is_empty() {
        println!("\nNo potential duplicates found (header written to {})", output.display());
        return;
    }

    println!(
        "\n{} potential duplicate(s) written to {}",
        summary.matches,
        output.display()
    );
    for result in outcome.results.iter().take(PREVIEW_ROWS) {
        println!(
            "- {} -> {} ({}%)",
            result.prospect_name, result.matched_reference_name, result.similarity_percent
        );
    }
    if outcome.results.len() > PREVIEW_ROWS {
        println!("- ... {} more", outcome.results.len() - PREVIEW_ROWS);
    }
}
