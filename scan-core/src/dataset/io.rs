use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use super::record::{RecordError, SampleRecord};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("{path} line {line}: {source}")]
    Parse {
        path: String,
        line: usize,
        source: serde_json::Error,
    },

    #[error("{path} line {line}: {source}")]
    Record {
        path: String,
        line: usize,
        source: RecordError,
    },

    #[error("{path} contains no records")]
    Empty { path: String },
}

/// Write records as JSONL, creating parent directories as needed
pub fn write_jsonl(path: &Path, records: &[SampleRecord]) -> Result<(), DatasetError> {
    let display = path.display().to_string();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| DatasetError::Io {
                path: display.clone(),
                source,
            })?;
        }
    }

    let file = File::create(path).map_err(|source| DatasetError::Io {
        path: display.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    for (index, record) in records.iter().enumerate() {
        let line = serde_json::to_string(record).map_err(|source| DatasetError::Parse {
            path: display.clone(),
            line: index + 1,
            source,
        })?;
        writeln!(writer, "{}", line).map_err(|source| DatasetError::Io {
            path: display.clone(),
            source,
        })?;
    }

    writer.flush().map_err(|source| DatasetError::Io {
        path: display,
        source,
    })
}

/// Read and validate a JSONL dataset. Blank lines are skipped; anything
/// else that fails to parse or validate aborts the read with its line
/// number.
pub fn read_jsonl(path: &Path) -> Result<Vec<SampleRecord>, DatasetError> {
    let display = path.display().to_string();

    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: display.clone(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| DatasetError::Io {
            path: display.clone(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let record: SampleRecord =
            serde_json::from_str(&line).map_err(|source| DatasetError::Parse {
                path: display.clone(),
                line: index + 1,
                source,
            })?;
        record.validate().map_err(|source| DatasetError::Record {
            path: display.clone(),
            line: index + 1,
            source,
        })?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(DatasetError::Empty { path: display });
    }
    Ok(records)
}
