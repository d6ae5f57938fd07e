use super::Format;
use crate::matching::MatchResult;
use std::io::Write;

pub const OUTPUT_HEADERS: [&str; 3] = ["Prospect", "Matched Salesforce Entry", "Similarity %"];
pub const NORMALIZED_HEADERS: [&str; 2] = ["Normalized Prospect", "Normalized Salesforce"];

/// Write the result table. The header row is written even when `results` is empty.
pub fn write_results<W: Write>(
    writer: W,
    format: Format,
    results: &[MatchResult],
    include_normalized: bool,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_writer(writer);

    let mut header: Vec<&str> = OUTPUT_HEADERS.to_vec();
    if include_normalized {
        header.extend(NORMALIZED_HEADERS);
    }
    csv_writer.write_record(&header)?;

    for result in results {
        let percent = result.similarity_percent.to_string();
        let mut row = vec![
            result.prospect_name.as_str(),
            result.matched_reference_name.as_str(),
            percent.as_str(),
        ];
        if include_normalized {
            row.push(result.prospect_normalized.as_str());
            row.push(result.reference_normalized.as_str());
        }
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}
