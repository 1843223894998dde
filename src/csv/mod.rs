//! CSV import/export codec
//!
//! Converts between the record store's rows/columns and CSV text.
//!
//! ```text
//! text ──import_csv──▶ Vec<Row>      (fresh ids, header keys verbatim)
//! rows + columns ──export_csv──▶ text (visible columns, labels as header)
//! ```

mod parser;
mod writer;

pub use parser::{import_csv, import_headers, ImportError};
pub use writer::{escape_csv_value, export_csv};
