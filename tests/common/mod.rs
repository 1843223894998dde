//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use rowdesk::model::{Column, RecordStore, Row, TableModel};
use rowdesk::update::update;
use rowdesk::Msg;

/// Seeded model with the default page size
pub fn test_model() -> TableModel {
    TableModel::default()
}

/// Model holding exactly the given rows and columns
pub fn test_model_with(rows: Vec<Row>, columns: Vec<Column>) -> TableModel {
    let mut model = TableModel::default();
    model.store = RecordStore::from_parts(rows, columns).unwrap();
    model
}

/// Apply a sequence of messages, ignoring the returned commands
pub fn apply(model: &mut TableModel, msgs: impl IntoIterator<Item = Msg>) {
    for msg in msgs {
        update(model, msg);
    }
}

/// Ids on the current page, in display order
pub fn page_ids(model: &TableModel) -> Vec<String> {
    model.view().page_rows.into_iter().map(|r| r.id).collect()
}

/// `n` rows with ids "1".."n", a zero-padded name and a pseudo-random score
pub fn numbered_rows(n: usize) -> Vec<Row> {
    (1..=n)
        .map(|i| {
            Row::new(i.to_string())
                .with("name", format!("row {:04}", i))
                .with("score", ((i * 37) % 101) as i64)
        })
        .collect()
}

/// `n` rows whose `age` alternates between a number and the same number as text
///
/// Every fifth row has no age and every seventh holds non-numeric text.
pub fn mixed_rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            let age = ((i * 7919) % 1000) as i64;
            let row = Row::new(i.to_string()).with("name", format!("Person {}", i % 13));
            if i % 7 == 0 {
                row.with("age", format!("unknown {}", i % 3))
            } else if i % 5 == 0 {
                row
            } else if i % 2 == 0 {
                row.with("age", age)
            } else {
                row.with("age", age.to_string())
            }
        })
        .collect()
}
