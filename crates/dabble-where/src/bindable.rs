//! Sub-expressions that carry their own bindings.
//!
//! Anything that can be spliced into a clause, be it a raw fragment, a
//! compiled statement or another clause tree, implements [`Bindable`].

use crate::value::SqlValue;

/// A piece of SQL paired with the values for its placeholders.
pub trait Bindable {
    /// Returns the SQL text.
    fn render(&self) -> String;

    /// Returns the bound values, in placeholder order.
    fn bindings(&self) -> Vec<SqlValue>;
}

/// Caller-supplied SQL inserted verbatim.
///
/// **Warning**: the text is neither parsed nor escaped. Pass user input
/// through `params`, never through `sql`.
#[derive(Debug, Clone, PartialEq)]
pub struct Raw {
    sql: String,
    params: Vec<SqlValue>,
}

impl Raw {
    /// Creates a fragment without bindings.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: vec![],
        }
    }

    /// Creates a fragment whose placeholders are bound to `params`.
    #[must_use]
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Returns the SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the declared bindings.
    #[must_use]
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }
}

impl Bindable for Raw {
    fn render(&self) -> String {
        self.sql.clone()
    }

    fn bindings(&self) -> Vec<SqlValue> {
        self.params.clone()
    }
}

/// A compiled statement used as the right-hand side of a comparison.
///
/// Holds a snapshot of the statement's SQL and bindings taken when it was
/// created, so the clause tree does not borrow the statement builder.
#[derive(Debug, Clone, PartialEq)]
pub struct Subquery {
    sql: String,
    params: Vec<SqlValue>,
}

impl Subquery {
    /// Creates a sub-statement from already compiled SQL.
    #[must_use]
    pub fn new(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Snapshots any [`Bindable`] statement.
    #[must_use]
    pub fn of<B: Bindable + ?Sized>(statement: &B) -> Self {
        Self {
            sql: statement.render(),
            params: statement.bindings(),
        }
    }

    /// Returns the SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the statement's bindings.
    #[must_use]
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }
}

impl Bindable for Subquery {
    fn render(&self) -> String {
        self.sql.clone()
    }

    fn bindings(&self) -> Vec<SqlValue> {
        self.params.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_without_params() {
        let raw = Raw::new("x > NOW()");
        assert_eq!(raw.render(), "x > NOW()");
        assert!(raw.bindings().is_empty());
    }

    #[test]
    fn test_raw_with_params() {
        let raw = Raw::with_params("age > ? + ?", vec![SqlValue::Int(1), SqlValue::Int(2)]);
        assert_eq!(raw.sql(), "age > ? + ?");
        assert_eq!(raw.bindings(), vec![SqlValue::Int(1), SqlValue::Int(2)]);
    }

    #[test]
    fn test_subquery_snapshot() {
        let raw = Raw::with_params("SELECT id FROM t WHERE a = ?", vec![SqlValue::Int(9)]);
        let sub = Subquery::of(&raw);
        assert_eq!(sub.sql(), "SELECT id FROM t WHERE a = ?");
        assert_eq!(sub.params(), &[SqlValue::Int(9)]);
    }
}
