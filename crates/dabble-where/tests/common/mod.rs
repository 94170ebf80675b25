#![allow(dead_code)]

use dabble_where::{Bindable, SqlValue, Where};

/// Minimal SELECT collaborator used as a compiled sub-statement.
pub struct Select {
    table: String,
    columns: Vec<String>,
    filter: Where,
}

impl Select {
    pub fn new(table: &str, columns: &[&str], filter: Where) -> Self {
        Self {
            table: String::from(table),
            columns: columns.iter().map(|c| String::from(*c)).collect(),
            filter,
        }
    }
}

impl Bindable for Select {
    fn render(&self) -> String {
        format!(
            "SELECT {} FROM {} WHERE {}",
            self.columns.join(", "),
            self.table,
            self.filter.render()
        )
    }

    fn bindings(&self) -> Vec<SqlValue> {
        self.filter.bindings()
    }
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}

/// Counts `?` placeholders outside single-quoted literals.
pub fn placeholder_count(sql: &str) -> usize {
    let mut in_literal = false;
    let mut count = 0;
    for c in sql.chars() {
        match c {
            '\'' => in_literal = !in_literal,
            '?' if !in_literal => count += 1,
            _ => {}
        }
    }
    count
}

/// Asserts that every placeholder in the rendered SQL has exactly one
/// binding and returns both.
pub fn assert_parity(tree: &Where) -> (String, Vec<SqlValue>) {
    let (sql, params) = tree.build();
    assert_eq!(
        placeholder_count(&sql),
        params.len(),
        "placeholder/binding mismatch\n  sql:    {sql}\n  params: {params:?}"
    );
    (sql, params)
}
