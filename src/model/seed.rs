//! Built-in seed dataset used on first run and by "reset"

use super::row::{Column, Row};

/// Page size used when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The default column set: name, email, age, role
pub fn default_columns() -> Vec<Column> {
    [
        ("name", "Name"),
        ("email", "Email"),
        ("age", "Age"),
        ("role", "Role"),
    ]
    .into_iter()
    .map(|(key, label)| Column::new(key, Some(label.to_string())))
    .collect()
}

/// The eleven sample rows
pub fn seed_rows() -> Vec<Row> {
    const PEOPLE: [(&str, &str, &str, i64, &str); 11] = [
        ("1", "Alice Johnson", "alice@example.com", 28, "Developer"),
        ("2", "Bob Singh", "bob@example.com", 34, "Designer"),
        ("3", "Carlos D", "carlos@example.com", 24, "Intern"),
        ("4", "Divya K", "divya@example.com", 30, "Manager"),
        ("5", "Esha P", "esha@example.com", 26, "QA"),
        ("6", "Fahad A", "fahad@example.com", 31, "DevOps"),
        ("7", "Gauri M", "gauri@example.com", 29, "Developer"),
        ("8", "Harsh V", "harsh@example.com", 27, "Developer"),
        ("9", "Ishita R", "ishita@example.com", 32, "Product"),
        ("10", "Jon Doe", "jon@example.com", 25, "Support"),
        ("11", "Karan T", "karan@example.com", 35, "Developer"),
    ];

    PEOPLE
        .iter()
        .map(|&(id, name, email, age, role)| {
            Row::new(id)
                .with("name", name)
                .with("email", email)
                .with("age", age)
                .with("role", role)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let rows = seed_rows();
        let ids: HashSet<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(rows.len(), 11);
        assert_eq!(ids.len(), 11);
    }

    #[test]
    fn test_seed_rows_cover_default_columns() {
        let columns = default_columns();
        for row in seed_rows() {
            for col in &columns {
                assert!(row.contains_key(&col.key), "row {} lacks {}", row.id, col.key);
            }
        }
    }
}
