use super::{clean_header, locate_column, DatasetError, Format};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read the `field` column of a delimited stream.
///
/// `origin` only labels errors. The whole input is decoded as UTF-8 when it
/// is valid UTF-8 and as Latin-1 otherwise, so every row of one file shares
/// an encoding.
pub fn read_names<R: Read>(
    mut reader: R,
    format: Format,
    field: &str,
    origin: &Path,
) -> Result<Vec<String>, DatasetError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| DatasetError::Read {
            path: origin.to_path_buf(),
            source,
        })?;
    let (text, latin1) = decode(bytes);

    let csv_error = |source: csv::Error| DatasetError::Csv {
        path: origin.to_path_buf(),
        source,
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter())
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(clean_header)
        .collect();
    let column = locate_column(headers, field, origin)?;

    let mut names = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(csv_error)?;
        names.push(record.get(column).unwrap_or_default().to_string());
    }

    debug!(
        path = %origin.display(),
        field,
        latin1,
        rows = names.len(),
        "name column loaded"
    );
    Ok(names)
}

fn decode(bytes: Vec<u8>) -> (String, bool) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, false),
        Err(err) => (err.into_bytes().into_iter().map(char::from).collect(), true),
    }
}
