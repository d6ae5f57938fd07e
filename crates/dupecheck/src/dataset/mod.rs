//! Tabular input and output for the duplicate check.
//!
//! Inputs are delimited text files or spreadsheet workbooks with a header
//! row; only the designated name column is read. Output is always delimited
//! text and always carries a header, even with no rows.

mod reader;
mod workbook;
mod writer;

use std::path::{Path, PathBuf};

pub use reader::read_names;
pub use workbook::read_workbook_names;
pub use writer::{write_results, NORMALIZED_HEADERS, OUTPUT_HEADERS};

const DELIMITED_EXTENSIONS: &str = ".csv or .tsv";
const INPUT_EXTENSIONS: &str = ".csv, .tsv, .xlsx, .xlsm, .xlsb, .xls or .ods";

/// Delimited text formats recognized by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Tsv,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        match extension_of(path).as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            other => Err(DatasetError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: other.to_string(),
                expected: DELIMITED_EXTENSIONS,
            }),
        }
    }

    pub fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }
}

/// How an input file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Delimited(Format),
    Workbook,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        match extension_of(path).as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            "csv" => Ok(Self::Delimited(Format::Csv)),
            "tsv" => Ok(Self::Delimited(Format::Tsv)),
            other => Err(DatasetError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: other.to_string(),
                expected: INPUT_EXTENSIONS,
            }),
        }
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unsupported file format '{extension}' for {} (expected {expected})", .path.display())]
    UnsupportedFormat {
        path: PathBuf,
        extension: String,
        expected: &'static str,
    },
    #[error(
        "column '{field}' not found in {}; available columns: {}",
        .path.display(),
        .available.join(", ")
    )]
    MissingField {
        field: String,
        path: PathBuf,
        available: Vec<String>,
    },
    #[error("invalid data in {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("unreadable workbook {}: {source}", .path.display())]
    Workbook {
        path: PathBuf,
        source: calamine::Error,
    },
    #[error("workbook {} has no worksheets", .path.display())]
    EmptyWorkbook { path: PathBuf },
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: csv::Error },
}

/// Load every value of `field` from the file at `path`, in row order.
///
/// Blank cells come back as empty strings so row positions line up with the
/// source file.
pub fn load_names(path: &Path, field: &str) -> Result<Vec<String>, DatasetError> {
    match InputFormat::from_path(path)? {
        InputFormat::Workbook => read_workbook_names(path, field),
        InputFormat::Delimited(format) => {
            let file = std::fs::File::open(path).map_err(|source| DatasetError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            read_names(file, format, field, path)
        }
    }
}

/// Check that `path` can take results and create its missing parent
/// directories. Run it before matching so a bad output path fails fast.
pub fn prepare_output(path: &Path) -> Result<Format, DatasetError> {
    let format = Format::from_path(path)?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DatasetError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    Ok(format)
}

/// Write results to `path`, creating missing parent directories first.
pub fn save_results(
    path: &Path,
    results: &[crate::matching::MatchResult],
    include_normalized: bool,
) -> Result<(), DatasetError> {
    let format = prepare_output(path)?;

    let file = std::fs::File::create(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    write_results(file, format, results, include_normalized).map_err(|source| {
        DatasetError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

fn locate_column(headers: Vec<String>, field: &str, origin: &Path) -> Result<usize, DatasetError> {
    match headers.iter().position(|header| header == field.trim()) {
        Some(column) => Ok(column),
        None => Err(DatasetError::MissingField {
            field: field.to_string(),
            path: origin.to_path_buf(),
            available: headers,
        }),
    }
}
