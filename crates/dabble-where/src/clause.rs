//! The clause tree.
//!
//! [`Where`] validates a list of [`Condition`]s once and can then be
//! rendered any number of times. Nested groups, embedded trees, raw
//! fragments and sub-statements are resolved to SQL text and bindings while
//! the tree is built; scalar values are bound when it is rendered.

use std::fmt;

use tracing::{debug, trace};

use crate::bindable::Bindable;
use crate::condition::{Condition, Separator, SetMode, SetOperand};
use crate::error::{Result, SpecError};
use crate::render::{inline_bindings, Renderer};
use crate::value::SqlValue;

/// SQL text resolved at construction time, with its bindings.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fragment {
    pub(crate) sql: String,
    pub(crate) params: Vec<SqlValue>,
}

impl Fragment {
    fn of<B: Bindable + ?Sized>(source: &B) -> Self {
        Self {
            sql: source.render(),
            params: source.bindings(),
        }
    }

    /// Resolves a nested tree without emitting a render event.
    fn nested(tree: &Where) -> Self {
        let (sql, params) = tree.compile();
        Self { sql, params }
    }
}

/// A validated clause.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Clause {
    Compare {
        field: String,
        operator: Option<String>,
        value: SqlValue,
    },
    Between {
        field: String,
        low: SqlValue,
        high: SqlValue,
    },
    InValues {
        field: String,
        mode: SetMode,
        values: Vec<SqlValue>,
    },
    InQuery {
        field: String,
        mode: SetMode,
        query: Fragment,
    },
    Like {
        field: String,
        pattern: SqlValue,
    },
    Fragment(Fragment),
    EqualsRaw {
        field: String,
        raw: Fragment,
    },
    EqualsQuery {
        field: String,
        query: Fragment,
    },
}

/// A compiled WHERE expression.
///
/// # Example
///
/// ```rust
/// use dabble_where::{Condition, SqlValue, Where};
///
/// let filter = Where::new(vec![
///     Condition::eq("status", "active"),
///     Condition::between("age", 18, 65),
/// ])
/// .unwrap();
///
/// let (sql, params) = filter.build();
/// assert_eq!(sql, "(status = ? AND age BETWEEN ? AND ?)");
/// assert_eq!(params.len(), 3);
/// assert_eq!(params[0], SqlValue::Text(String::from("active")));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Where {
    separator: Separator,
    clauses: Vec<Clause>,
}

impl Where {
    /// Creates a tree with no clauses; it renders as `(1=1)`.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            separator: Separator::And,
            clauses: vec![],
        }
    }

    /// Builds a tree whose top-level clauses are joined with AND.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when a condition is malformed, e.g. an empty
    /// nested group, an IN list without values or an empty field name.
    pub fn new(conditions: Vec<Condition>) -> Result<Self> {
        Self::with_separator(conditions, Separator::And)
    }

    /// Builds a tree whose top-level clauses are joined with `separator`.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when a condition is malformed.
    pub fn with_separator(conditions: Vec<Condition>, separator: Separator) -> Result<Self> {
        let clauses = conditions
            .into_iter()
            .enumerate()
            .map(|(position, condition)| build_clause(condition, separator, position))
            .collect::<Result<Vec<_>>>()?;
        trace!(
            clauses = clauses.len(),
            separator = separator.as_str(),
            "built clause tree"
        );
        Ok(Self { separator, clauses })
    }

    /// Returns the separator joining the top-level clauses.
    #[must_use]
    pub const fn separator(&self) -> Separator {
        self.separator
    }

    /// Returns true when the tree has no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns the number of top-level clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Renders the SQL text.
    #[must_use]
    pub fn render(&self) -> String {
        self.build().0
    }

    /// Returns the bound values in placeholder order.
    #[must_use]
    pub fn bindings(&self) -> Vec<SqlValue> {
        self.build().1
    }

    /// Renders the SQL text and its bindings in a single pass.
    #[must_use]
    pub fn build(&self) -> (String, Vec<SqlValue>) {
        let (sql, params) = self.compile();
        debug!(sql = %sql, bindings = params.len(), "rendered where clause");
        (sql, params)
    }

    fn compile(&self) -> (String, Vec<SqlValue>) {
        let mut r = Renderer::new();
        self.write(&mut r);
        trace!(dialect = r.dialect(), "compiled clause tree");
        r.finish()
    }

    /// Renders the SQL with every binding inlined as an escaped literal.
    ///
    /// **Warning**: for logs and debugging only. Execute [`Where::build`]
    /// output instead.
    #[must_use]
    pub fn to_debug_sql(&self) -> String {
        let (sql, params) = self.build();
        inline_bindings(&sql, &params)
    }

    fn write(&self, r: &mut Renderer) {
        if self.clauses.is_empty() {
            r.sql.push_str("(1=1)");
            return;
        }
        let separator = format!(" {} ", self.separator);
        r.sql.push('(');
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(&separator);
            }
            r.clause(clause);
        }
        r.sql.push(')');
    }
}

impl Bindable for Where {
    fn render(&self) -> String {
        Self::render(self)
    }

    fn bindings(&self) -> Vec<SqlValue> {
        Self::bindings(self)
    }
}

impl fmt::Display for Where {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn check_field(field: &str) -> Result<()> {
    if field.trim().is_empty() {
        return Err(SpecError::EmptyField);
    }
    Ok(())
}

/// Validates one condition and resolves its nested parts.
fn build_clause(condition: Condition, parent: Separator, position: usize) -> Result<Clause> {
    match condition {
        Condition::Equals { field, value } => {
            check_field(&field)?;
            Ok(Clause::Compare {
                field,
                operator: None,
                value,
            })
        }
        Condition::Compared {
            field,
            operator,
            value,
        } => {
            check_field(&field)?;
            Ok(Clause::Compare {
                field,
                operator: Some(operator),
                value,
            })
        }
        Condition::Between { field, low, high } => {
            check_field(&field)?;
            Ok(Clause::Between { field, low, high })
        }
        Condition::In {
            field,
            mode,
            operand,
        } => {
            check_field(&field)?;
            match operand {
                SetOperand::Values(values) if values.is_empty() => {
                    Err(SpecError::MissingOperand {
                        field,
                        modifier: mode.to_string(),
                    })
                }
                SetOperand::Values(values) => Ok(Clause::InValues {
                    field,
                    mode,
                    values,
                }),
                SetOperand::Subquery(query) => Ok(Clause::InQuery {
                    field,
                    mode,
                    query: Fragment::of(&query),
                }),
            }
        }
        Condition::Like { field, pattern } => {
            check_field(&field)?;
            Ok(Clause::Like { field, pattern })
        }
        Condition::Group {
            separator,
            children,
        } => {
            if children.is_empty() {
                return Err(SpecError::EmptyGroup {
                    key: position.to_string(),
                });
            }
            let separator = separator.unwrap_or_else(|| parent.flip());
            let nested = Where::with_separator(children, separator)?;
            Ok(Clause::Fragment(Fragment::nested(&nested)))
        }
        Condition::Clause(tree) => Ok(Clause::Fragment(Fragment::nested(&tree))),
        Condition::Raw(raw) => Ok(Clause::Fragment(Fragment::of(&raw))),
        Condition::RawEquals { field, raw } => {
            check_field(&field)?;
            Ok(Clause::EqualsRaw {
                field,
                raw: Fragment::of(&raw),
            })
        }
        Condition::SubqueryEquals { field, query } => {
            check_field(&field)?;
            Ok(Clause::EqualsQuery {
                field,
                query: Fragment::of(&query),
            })
        }
    }
}
