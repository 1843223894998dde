//! Query parameters: search text, sort spec and pagination cursor

use serde::{Deserialize, Serialize};

use super::seed::DEFAULT_PAGE_SIZE;

/// Sort direction, including the "unsorted" state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
    #[default]
    None,
}

impl SortOrder {
    /// Next state in the header click cycle: asc → desc → none → asc
    pub fn next(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::None,
            SortOrder::None => SortOrder::Ascending,
        }
    }
}

/// Which field to sort by and in what direction
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: impl Into<String>, order: SortOrder) -> Self {
        Self {
            key: key.into(),
            order,
        }
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        Self::new(key, SortOrder::Ascending)
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self::new(key, SortOrder::Descending)
    }

    /// Whether this spec leaves rows in their original order
    pub fn is_passthrough(&self) -> bool {
        self.order == SortOrder::None || self.key.is_empty()
    }

    /// Spec produced by clicking the header of `key`
    ///
    /// The same column advances through the cycle; a different column
    /// starts at ascending.
    pub fn cycle(&self, key: &str) -> SortSpec {
        let order = if self.key == key {
            self.order.next()
        } else {
            SortOrder::Ascending
        };
        SortSpec::new(key, order)
    }
}

/// Everything the view pipeline needs besides the rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub search_text: String,
    pub sort: SortSpec,
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl QueryParams {
    /// Initial parameters with a given page size (zero falls back to the default)
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            search_text: String::new(),
            sort: SortSpec::default(),
            page: 0,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    /// Whether the search stage lets every row through
    pub fn search_is_blank(&self) -> bool {
        self.search_text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_cycle() {
        let order = SortOrder::Ascending;
        assert_eq!(order.next(), SortOrder::Descending);
        assert_eq!(order.next().next(), SortOrder::None);
        assert_eq!(order.next().next().next(), SortOrder::Ascending);
    }

    #[test]
    fn test_sort_spec_cycle_same_and_other_column() {
        let spec = SortSpec::default();
        let spec = spec.cycle("age");
        assert_eq!(spec, SortSpec::ascending("age"));
        let spec = spec.cycle("age");
        assert_eq!(spec, SortSpec::descending("age"));
        let spec = spec.cycle("name");
        assert_eq!(spec, SortSpec::ascending("name"));
    }

    #[test]
    fn test_passthrough() {
        assert!(SortSpec::default().is_passthrough());
        assert!(SortSpec::new("age", SortOrder::None).is_passthrough());
        assert!(SortSpec::new("", SortOrder::Ascending).is_passthrough());
        assert!(!SortSpec::ascending("age").is_passthrough());
    }

    #[test]
    fn test_sort_order_accepts_short_names() {
        let order: SortOrder = serde_json::from_str("\"asc\"").unwrap();
        assert_eq!(order, SortOrder::Ascending);
        let order: SortOrder = serde_json::from_str("\"descending\"").unwrap();
        assert_eq!(order, SortOrder::Descending);
    }

    #[test]
    fn test_zero_page_size_falls_back() {
        assert_eq!(QueryParams::with_page_size(0).page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(QueryParams::with_page_size(25).page_size, 25);
    }
}
