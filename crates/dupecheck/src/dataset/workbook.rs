use super::{clean_header, locate_column, DatasetError};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::debug;

/// Read the `field` column from the first worksheet of a workbook.
///
/// The first non-empty row is the header. Numeric and date cells are
/// rendered as text; empty cells come back as empty names.
pub fn read_workbook_names(path: &Path, field: &str) -> Result<Vec<String>, DatasetError> {
    let workbook_error = |source: calamine::Error| DatasetError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DatasetError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?
        .map_err(workbook_error)?;

    let mut rows = sheet.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|cell| clean_header(&cell_text(cell))).collect())
        .unwrap_or_default();
    let column = locate_column(headers, field, path)?;

    let names: Vec<String> = rows
        .map(|row| row.get(column).map(cell_text).unwrap_or_default())
        .collect();

    debug!(
        path = %path.display(),
        field,
        rows = names.len(),
        "workbook name column loaded"
    );
    Ok(names)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}
