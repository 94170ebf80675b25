//! Condition specifications.
//!
//! A [`Condition`] describes one filter before it is validated. Lists of
//! conditions become a [`Where`](crate::Where) clause tree.
//!
//! # Example
//!
//! ```rust
//! use dabble_where::{Condition, Where};
//!
//! let filter = Where::new(vec![
//!     Condition::eq("status", "active"),
//!     Condition::group(vec![
//!         Condition::gt("age", 18),
//!         Condition::eq("verified", true),
//!     ]),
//! ])
//! .unwrap();
//!
//! assert_eq!(filter.render(), "(status = ? AND (age > ? OR verified = ?))");
//! ```

use std::fmt;

use crate::bindable::{Raw, Subquery};
use crate::clause::Where;
use crate::value::{SqlValue, ToSqlValue};

/// Logical separator joining the clauses of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// AND
    #[default]
    And,
    /// OR
    Or,
}

impl Separator {
    /// Returns the other separator.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::And => Self::Or,
            Self::Or => Self::And,
        }
    }

    /// Parses `AND` / `OR`, ignoring case.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_uppercase().as_str() {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            _ => None,
        }
    }

    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set-membership modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMode {
    /// IN
    In,
    /// NOT IN
    NotIn,
    /// ANY
    Any,
    /// SOME
    Some,
    /// ALL
    All,
}

impl SetMode {
    /// Parses a mode keyword, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let normalized = keyword
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();
        match normalized.as_str() {
            "IN" => Some(Self::In),
            "NOT IN" => Some(Self::NotIn),
            "ANY" => Some(Self::Any),
            "SOME" => Some(Self::Some),
            "ALL" => Some(Self::All),
            _ => None,
        }
    }

    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Any => "ANY",
            Self::Some => "SOME",
            Self::All => "ALL",
        }
    }
}

impl fmt::Display for SetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of a set-membership test.
#[derive(Debug, Clone, PartialEq)]
pub enum SetOperand {
    /// A list of values, deduplicated when rendered.
    Values(Vec<SqlValue>),
    /// A compiled sub-statement.
    Subquery(Subquery),
}

/// One filter condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `field = value`, or `field IS NULL`.
    Equals { field: String, value: SqlValue },
    /// `field <operator> value`; the token is resolved when rendered.
    Compared {
        field: String,
        operator: String,
        value: SqlValue,
    },
    /// `field BETWEEN low AND high`
    Between {
        field: String,
        low: SqlValue,
        high: SqlValue,
    },
    /// `field IN (...)` and friends.
    In {
        field: String,
        mode: SetMode,
        operand: SetOperand,
    },
    /// `field LIKE pattern`; wildcards are part of the pattern.
    Like { field: String, pattern: SqlValue },
    /// Nested group. Without a separator it takes the opposite of its parent.
    Group {
        separator: Option<Separator>,
        children: Vec<Condition>,
    },
    /// Opaque SQL inserted as a clause of its own.
    Raw(Raw),
    /// `field = <raw sql>`
    RawEquals { field: String, raw: Raw },
    /// `field = (<sub-statement>)`
    SubqueryEquals { field: String, query: Subquery },
    /// An already constructed clause tree, kept with its own separator.
    Clause(Where),
}

impl Condition {
    /// Creates an equality condition (`field = value`).
    pub fn eq<V: ToSqlValue>(field: &str, value: V) -> Self {
        Self::Equals {
            field: field.to_string(),
            value: value.to_sql_value(),
        }
    }

    /// Creates a comparison with an explicit operator token.
    ///
    /// `"!"` means `<>`; other tokens are passed through.
    pub fn compare<V: ToSqlValue>(field: &str, operator: &str, value: V) -> Self {
        Self::Compared {
            field: field.to_string(),
            operator: operator.to_string(),
            value: value.to_sql_value(),
        }
    }

    /// Creates an inequality condition (`field <> value`).
    pub fn ne<V: ToSqlValue>(field: &str, value: V) -> Self {
        Self::compare(field, "!", value)
    }

    /// Creates a greater-than condition.
    pub fn gt<V: ToSqlValue>(field: &str, value: V) -> Self {
        Self::compare(field, ">", value)
    }

    /// Creates a greater-than-or-equal condition.
    pub fn gte<V: ToSqlValue>(field: &str, value: V) -> Self {
        Self::compare(field, ">=", value)
    }

    /// Creates a less-than condition.
    pub fn lt<V: ToSqlValue>(field: &str, value: V) -> Self {
        Self::compare(field, "<", value)
    }

    /// Creates a less-than-or-equal condition.
    pub fn lte<V: ToSqlValue>(field: &str, value: V) -> Self {
        Self::compare(field, "<=", value)
    }

    /// Creates a BETWEEN condition (low <= field <= high).
    pub fn between<V: ToSqlValue, W: ToSqlValue>(field: &str, low: V, high: W) -> Self {
        Self::Between {
            field: field.to_string(),
            low: low.to_sql_value(),
            high: high.to_sql_value(),
        }
    }

    /// Creates a set-membership condition over a list of values.
    pub fn set<V: ToSqlValue>(field: &str, mode: SetMode, values: Vec<V>) -> Self {
        Self::In {
            field: field.to_string(),
            mode,
            operand: SetOperand::Values(values.into_iter().map(ToSqlValue::to_sql_value).collect()),
        }
    }

    /// Creates an IN list condition.
    pub fn in_list<V: ToSqlValue>(field: &str, values: Vec<V>) -> Self {
        Self::set(field, SetMode::In, values)
    }

    /// Creates a NOT IN list condition.
    pub fn not_in_list<V: ToSqlValue>(field: &str, values: Vec<V>) -> Self {
        Self::set(field, SetMode::NotIn, values)
    }

    /// Creates a set-membership condition against a sub-statement.
    pub fn in_subquery(field: &str, mode: SetMode, query: Subquery) -> Self {
        Self::In {
            field: field.to_string(),
            mode,
            operand: SetOperand::Subquery(query),
        }
    }

    /// Creates a LIKE condition. Use `%` for wildcard matching.
    pub fn like(field: &str, pattern: &str) -> Self {
        Self::Like {
            field: field.to_string(),
            pattern: SqlValue::Text(pattern.to_string()),
        }
    }

    /// Creates a contains condition (LIKE %value%).
    pub fn contains(field: &str, value: &str) -> Self {
        Self::like(field, &format!("%{value}%"))
    }

    /// Creates a starts-with condition (LIKE value%).
    pub fn starts_with(field: &str, value: &str) -> Self {
        Self::like(field, &format!("{value}%"))
    }

    /// Creates an ends-with condition (LIKE %value).
    pub fn ends_with(field: &str, value: &str) -> Self {
        Self::like(field, &format!("%{value}"))
    }

    /// Creates a nested group that alternates its parent's separator.
    #[must_use]
    pub const fn group(children: Vec<Self>) -> Self {
        Self::Group {
            separator: None,
            children,
        }
    }

    /// Creates a nested group with an explicit separator.
    #[must_use]
    pub const fn group_with(separator: Separator, children: Vec<Self>) -> Self {
        Self::Group {
            separator: Some(separator),
            children,
        }
    }

    /// Creates a raw SQL clause.
    ///
    /// **Warning**: Use parameterized values to prevent SQL injection.
    #[must_use]
    pub const fn raw(raw: Raw) -> Self {
        Self::Raw(raw)
    }

    /// Compares a field to a raw SQL expression (`field = <raw>`).
    #[must_use]
    pub fn raw_eq(field: &str, raw: Raw) -> Self {
        Self::RawEquals {
            field: field.to_string(),
            raw,
        }
    }

    /// Compares a field to a sub-statement (`field = (<query>)`).
    #[must_use]
    pub fn subquery_eq(field: &str, query: Subquery) -> Self {
        Self::SubqueryEquals {
            field: field.to_string(),
            query,
        }
    }

    /// Embeds an existing clause tree.
    #[must_use]
    pub const fn clause(tree: Where) -> Self {
        Self::Clause(tree)
    }
}
