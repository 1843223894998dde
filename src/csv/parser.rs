//! CSV import using the csv crate
//!
//! RFC 4180 compliant parsing with support for quoted fields and escaped
//! quotes. The first record is the header; every following record becomes a
//! row with a freshly generated id.

use std::collections::HashSet;
use std::io::Cursor;

use crate::model::{Row, Value, ID_KEY};

/// Error type for CSV import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// Input has no header line at all
    #[error("CSV import error: missing header row")]
    MissingHeader,
    /// A record's field count differs from the header's
    #[error("CSV import error at line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
    /// Two columns share a name, so one would overwrite the other
    #[error("CSV import error: duplicate header {name:?}")]
    DuplicateHeader { name: String },
    /// Any other reader failure (bad UTF-8, I/O)
    #[error("CSV import error: {message}")]
    Parse { message: String, line: Option<u64> },
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::UnequalLengths {
                pos,
                expected_len,
                len,
            } => ImportError::RaggedRow {
                line: pos.as_ref().map(|p| p.line()).unwrap_or_default(),
                expected: *expected_len as usize,
                found: *len as usize,
            },
            _ => ImportError::Parse {
                line: err.position().map(|p| p.line()),
                message: err.to_string(),
            },
        }
    }
}

fn reader(content: &str) -> csv::Reader<Cursor<&[u8]>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(Cursor::new(content.as_bytes()))
}

/// Reject an empty header line and repeated names (`id` aside, it is dropped)
fn check_headers(headers: &csv::StringRecord) -> Result<(), ImportError> {
    if headers.is_empty() {
        return Err(ImportError::MissingHeader);
    }
    let mut seen = HashSet::new();
    for name in headers.iter().filter(|h| *h != ID_KEY) {
        if !seen.insert(name) {
            return Err(ImportError::DuplicateHeader {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Header keys in file order, verbatim
pub fn import_headers(content: &str) -> Result<Vec<String>, ImportError> {
    let mut reader = reader(content);
    let headers = reader.headers()?;
    check_headers(headers)?;
    Ok(headers.iter().map(|h| h.to_string()).collect())
}

/// Parse CSV text into rows
///
/// Header names are used verbatim as field keys and must be unique. Every row gets a new UUID;
/// an `id` column in the file is ignored. Blank lines are skipped. The whole
/// import fails on the first malformed record, so callers never see a
/// partial result.
pub fn import_csv(content: &str) -> Result<Vec<Row>, ImportError> {
    let mut reader = reader(content);
    let headers = reader.headers()?.clone();
    check_headers(&headers)?;
    if headers.iter().any(|h| h == ID_KEY) {
        tracing::debug!("ignoring id column in imported CSV");
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = Row::new(uuid::Uuid::new_v4().to_string());
        for (key, value) in headers.iter().zip(record.iter()) {
            if key == ID_KEY {
                continue;
            }
            row.fields.insert(key.to_string(), Value::text(value));
        }
        rows.push(row);
    }

    tracing::debug!(rows = rows.len(), columns = headers.len(), "parsed CSV");
    Ok(rows)
}
