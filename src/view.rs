//! Query pipeline: search → sort → paginate
//!
//! Pure functions over the committed rows. Nothing is cached; the view is
//! recomputed from scratch on every read.

use std::cmp::Ordering;

use crate::model::{QueryParams, Row, SortOrder, SortSpec, Value};

/// The rows on the current page plus the post-filter row count
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub page_rows: Vec<Row>,
    /// Matching rows before pagination; drives the pager
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
}

impl TableView {
    /// Number of pages for the pager (at least one)
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 1;
        }
        self.total_count.div_ceil(self.page_size).max(1)
    }

    pub fn is_empty(&self) -> bool {
        self.page_rows.is_empty()
    }

    /// Ids of the rows on this page, in display order
    pub fn ids(&self) -> Vec<&str> {
        self.page_rows.iter().map(|r| r.id.as_str()).collect()
    }
}

/// Run the full pipeline
pub fn view(rows: &[Row], params: &QueryParams) -> TableView {
    let filtered = filter_rows(rows, &params.search_text);
    let total_count = filtered.len();
    let sorted = sort_rows(filtered, &params.sort);
    let page_rows = paginate(&sorted, params.page, params.page_size)
        .iter()
        .map(|r| (*r).clone())
        .collect();

    TableView {
        page_rows,
        total_count,
        page: params.page,
        page_size: params.page_size,
    }
}

/// Keep rows where any field contains `search` (case-insensitive substring)
///
/// A blank search keeps every row. Input order is preserved.
pub fn filter_rows<'a>(rows: &'a [Row], search: &str) -> Vec<&'a Row> {
    if search.trim().is_empty() {
        return rows.iter().collect();
    }
    let needle = search.to_lowercase();
    rows.iter()
        .filter(|row| {
            row.searchable_values()
                .any(|v| v.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Stable sort by the spec's key; pass-through when unsorted
pub fn sort_rows<'a>(mut rows: Vec<&'a Row>, spec: &SortSpec) -> Vec<&'a Row> {
    if spec.is_passthrough() {
        return rows;
    }
    // sort_by is stable, so ties keep their filtered order in both directions
    rows.sort_by(|a, b| {
        let ord = compare_field(a, b, &spec.key);
        match spec.order {
            SortOrder::Descending => ord.reverse(),
            _ => ord,
        }
    });
    rows
}

/// Slice out one page; out-of-range pages are empty
pub fn paginate<'a, T>(items: &'a [T], page: usize, page_size: usize) -> &'a [T] {
    let start = page.saturating_mul(page_size);
    if start >= items.len() {
        return &items[items.len()..];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

fn compare_field(a: &Row, b: &Row, key: &str) -> Ordering {
    let va = a.get(key).unwrap_or(Value::Null);
    let vb = b.get(key).unwrap_or(Value::Null);
    va.cmp_natural(&vb)
}
