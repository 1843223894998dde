//! CSV export
//!
//! Writes the full record store (not the current view) using only the visible
//! columns, in column order.

use crate::model::{Column, Row};

/// Quote a value if it contains a delimiter, quote or line break
pub fn escape_csv_value(value: &str, delimiter: char) -> String {
    let needs_quotes = value.contains(delimiter)
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');

    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Serialize rows to CSV text
///
/// The header uses each column's label, falling back to its key. Lines are
/// joined with `\n` and there is no trailing newline.
pub fn export_csv(rows: &[Row], columns: &[Column]) -> String {
    let visible: Vec<&Column> = columns.iter().filter(|c| c.visible).collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(join_line(visible.iter().map(|c| c.header().to_string())));
    for row in rows {
        lines.push(join_line(visible.iter().map(|c| row.display(&c.key))));
    }

    lines.join("\n")
}

fn join_line(values: impl Iterator<Item = String>) -> String {
    values
        .map(|v| escape_csv_value(&v, ','))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{default_columns, seed_rows};

    #[test]
    fn test_escape_plain_value() {
        assert_eq!(escape_csv_value("hello", ','), "hello");
    }

    #[test]
    fn test_escape_comma_quote_newline() {
        assert_eq!(escape_csv_value("a,b", ','), "\"a,b\"");
        assert_eq!(escape_csv_value("say \"hi\"", ','), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_value("two\nlines", ','), "\"two\nlines\"");
    }

    #[test]
    fn test_export_uses_labels_and_visible_columns() {
        let mut columns = default_columns();
        columns[1].visible = false;
        let rows = &seed_rows()[..2];

        let csv = export_csv(rows, &columns);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Name,Age,Role");
        assert_eq!(lines[1], "Alice Johnson,28,Developer");
        assert_eq!(lines[2], "Bob Singh,34,Designer");
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_export_missing_field_is_empty() {
        let columns = vec![Column::new("a", None), Column::new("b", None)];
        let rows = vec![Row::new("1").with("a", "x")];
        assert_eq!(export_csv(&rows, &columns), "a,b\nx,");
    }

    #[test]
    fn test_export_no_rows_is_header_only() {
        assert_eq!(export_csv(&[], &default_columns()), "Name,Email,Age,Role");
    }
}
