use dupecheck::config::MatchConfig;
use dupecheck::dataset::{self, DatasetError, Format};
use dupecheck::matching::BatchOrchestrator;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "dupecheck-{label}-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn fixture_run_flags_known_duplicates() {
    let prospects =
        dataset::load_names(&fixture("prospects.csv"), "Company Name").expect("prospects load");
    let references =
        dataset::load_names(&fixture("crm_export.csv"), "Account Name").expect("crm loads");
    assert_eq!(prospects.len(), 12);
    assert_eq!(references.len(), 10);

    let config = MatchConfig {
        batch_size: 4,
        ..MatchConfig::default()
    };
    let outcome = BatchOrchestrator::new(&config)
        .expect("valid config")
        .run(&prospects, &references);

    let mut pairs: Vec<(&str, &str)> = outcome
        .results
        .iter()
        .map(|result| {
            (
                result.prospect_name.as_str(),
                result.matched_reference_name.as_str(),
            )
        })
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("Acme Corp", "ACME CORPORATION"),
            ("Acme Corporation", "ACME CORPORATION"),
            ("Blue River Foods Pvt. Ltd.", "Blue River Foods Private Limited"),
            ("Contoso (India) Limited", "Contoso Ltd"),
            ("Fabrikam Holdings", "Fabrikam, Inc."),
            ("Global Systems Inc", "Systems Global Incorporated"),
            ("Johnson & Johnson", "Johnson and Johnson"),
        ]
    );
    assert!(outcome
        .results
        .iter()
        .all(|result| result.similarity_percent >= 90));
    assert_eq!(outcome.summary.prospects_skipped, 2);
    assert_eq!(outcome.summary.references_skipped, 2);
    assert_eq!(outcome.summary.batch_count, 3);
}

#[test]
fn results_are_written_with_header_and_parent_directories() {
    let dir = scratch_dir("write");
    let output = dir.join("nested").join("possible_duplicates.csv");

    let config = MatchConfig::default();
    let outcome = BatchOrchestrator::new(&config)
        .expect("valid config")
        .run(&["Acme Corp"], &["ACME CORPORATION"]);
    dataset::save_results(&output, &outcome.results, false).expect("results saved");

    let written = std::fs::read_to_string(&output).expect("output readable");
    assert_eq!(
        written,
        "Prospect,Matched Salesforce Entry,Similarity %\nAcme Corp,ACME CORPORATION,100\n"
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn empty_result_still_writes_a_header() {
    let dir = scratch_dir("empty");
    let output = dir.join("none.csv");

    let config = MatchConfig::default();
    let outcome = BatchOrchestrator::new(&config)
        .expect("valid config")
        .run(&["Zenith Traders"], &["Acme Corp"]);
    assert!(outcome.results.is_empty());

    dataset::save_results(&output, &outcome.results, true).expect("results saved");
    let written = std::fs::read_to_string(&output).expect("output readable");
    assert_eq!(
        written,
        "Prospect,Matched Salesforce Entry,Similarity %,Normalized Prospect,Normalized Salesforce\n"
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_name_column_fails_before_matching() {
    let error = dataset::load_names(&fixture("crm_export.csv"), "Company Name")
        .expect_err("column is absent");

    match error {
        DatasetError::MissingField {
            field, available, ..
        } => {
            assert_eq!(field, "Company Name");
            assert_eq!(available, vec!["Account Name", "Owner", "Region"]);
        }
        other => panic!("expected missing field, got {other:?}"),
    }
}

#[test]
fn written_output_reads_back_through_the_loader() {
    let dir = scratch_dir("roundtrip");
    let output = dir.join("out.tsv");

    let config = MatchConfig::default();
    let outcome = BatchOrchestrator::new(&config)
        .expect("valid config")
        .run(
            &["Fabrikam Holdings", "Johnson & Johnson"],
            &["Fabrikam, Inc.", "Johnson and Johnson"],
        );
    dataset::save_results(&output, &outcome.results, false).expect("results saved");
    assert_eq!(Format::from_path(&output).expect("tsv"), Format::Tsv);

    let prospects = dataset::load_names(&output, "Prospect").expect("output loads");
    assert_eq!(prospects, vec!["Fabrikam Holdings", "Johnson & Johnson"]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn workbook_reference_loads_like_its_csv_export() {
    let from_csv =
        dataset::load_names(&fixture("crm_export.csv"), "Account Name").expect("csv loads");
    let from_workbook =
        dataset::load_names(&fixture("crm_export.xlsx"), "Account Name").expect("xlsx loads");

    assert_eq!(from_workbook, from_csv);
    assert_eq!(from_workbook.last().map(String::as_str), Some(""));
}

#[test]
fn workbook_missing_column_lists_sheet_headers() {
    let error = dataset::load_names(&fixture("crm_export.xlsx"), "Company Name")
        .expect_err("column is absent");

    match error {
        DatasetError::MissingField { available, .. } => {
            assert_eq!(available, vec!["Account Name", "Owner", "Region", "Employees"]);
        }
        other => panic!("expected missing field, got {other:?}"),
    }
}

#[test]
fn spreadsheet_output_is_rejected_before_anything_is_written() {
    let dir = scratch_dir("xlsx-out");
    let error = dataset::prepare_output(&dir.join("possible_duplicates.xlsx"))
        .expect_err("xlsx output rejected");

    assert!(matches!(error, DatasetError::UnsupportedFormat { .. }));
    assert!(!dir.exists());
}
