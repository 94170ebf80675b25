//! Rendering of clause trees into SQL text and bindings.
//!
//! A [`Renderer`] is created per compile call. SQL text and bound values
//! are appended side by side, so the i-th placeholder written always pairs
//! with the i-th value pushed.

use crate::clause::{Clause, Fragment};
use crate::dialect::{Dialect, GenericDialect};
use crate::operator::resolve_operator;
use crate::value::SqlValue;

/// Accumulates SQL text and bound values during one traversal.
pub(crate) struct Renderer {
    dialect: GenericDialect,
    pub(crate) sql: String,
    pub(crate) params: Vec<SqlValue>,
}

impl Renderer {
    pub(crate) const fn new() -> Self {
        Self {
            dialect: GenericDialect::new(),
            sql: String::new(),
            params: vec![],
        }
    }

    pub(crate) fn dialect(&self) -> &'static str {
        self.dialect.name()
    }

    pub(crate) fn finish(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.params)
    }

    fn push_value(&mut self, value: &SqlValue) {
        let placeholder = self.dialect.placeholder_for(value);
        self.sql.push_str(placeholder.token);
        if placeholder.binds {
            self.params.push(value.clone());
        }
    }

    fn push_set(&mut self, values: &[SqlValue]) {
        let (placeholders, bound) = self.dialect.placeholders_for(values, true);
        let tokens: Vec<&str> = placeholders.iter().map(|p| p.token).collect();
        self.sql.push_str(&tokens.join(", "));
        self.params.extend(bound);
    }

    fn push_fragment(&mut self, fragment: &Fragment) {
        self.sql.push_str(&fragment.sql);
        self.params.extend(fragment.params.iter().cloned());
    }

    /// Writes one clause.
    pub(crate) fn clause(&mut self, clause: &Clause) {
        match clause {
            Clause::Compare {
                field,
                operator,
                value,
            } => {
                let op = resolve_operator(value, operator.as_deref());
                self.sql.push_str(&format!("{field} {op} "));
                self.push_value(value);
            }
            Clause::Between { field, low, high } => {
                self.sql.push_str(&format!("{field} BETWEEN "));
                self.push_value(low);
                self.sql.push_str(" AND ");
                self.push_value(high);
            }
            Clause::InValues {
                field,
                mode,
                values,
            } => {
                self.sql.push_str(&format!("{field} {mode} ("));
                self.push_set(values);
                self.sql.push(')');
            }
            Clause::InQuery { field, mode, query } => {
                self.sql.push_str(&format!("{field} {mode} ("));
                self.push_fragment(query);
                self.sql.push(')');
            }
            Clause::Like { field, pattern } => {
                self.sql.push_str(&format!("{field} LIKE "));
                self.push_value(pattern);
            }
            Clause::Fragment(fragment) => self.push_fragment(fragment),
            Clause::EqualsRaw { field, raw } => {
                self.sql.push_str(&format!("{field} = "));
                self.push_fragment(raw);
            }
            Clause::EqualsQuery { field, query } => {
                self.sql.push_str(&format!("{field} = ("));
                self.push_fragment(query);
                self.sql.push(')');
            }
        }
    }
}

/// Substitutes bound values into `sql` as escaped literals.
///
/// Placeholders inside single-quoted literals are left alone. Only meant
/// for log output; never execute the result.
pub(crate) fn inline_bindings(sql: &str, params: &[SqlValue]) -> String {
    let dialect = GenericDialect;
    let placeholder = dialect.parameter_placeholder();
    let mut out = String::with_capacity(sql.len());
    let mut params = params.iter();
    let mut in_literal = false;
    let mut rest = sql;
    while let Some(c) = rest.chars().next() {
        if c == '\'' {
            in_literal = !in_literal;
        }
        if !in_literal && rest.starts_with(placeholder) {
            if let Some(value) = params.next() {
                out.push_str(&dialect.quote_literal(value));
                rest = &rest[placeholder.len()..];
                continue;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_bindings() {
        let params = vec![SqlValue::Text(String::from("it's")), SqlValue::Int(3)];
        assert_eq!(
            inline_bindings("(a = ? AND b > ?)", &params),
            "(a = 'it''s' AND b > 3)"
        );
    }

    #[test]
    fn test_inline_bindings_skips_quoted_question_marks() {
        let params = vec![SqlValue::Int(1)];
        assert_eq!(
            inline_bindings("(note = '?' AND id = ?)", &params),
            "(note = '?' AND id = 1)"
        );
    }

    #[test]
    fn test_renderer_pairs_text_and_params() {
        let mut r = Renderer::new();
        r.clause(&Clause::Between {
            field: String::from("age"),
            low: SqlValue::Int(18),
            high: SqlValue::Int(65),
        });
        let (sql, params) = r.finish();
        assert_eq!(sql, "age BETWEEN ? AND ?");
        assert_eq!(params, vec![SqlValue::Int(18), SqlValue::Int(65)]);
    }

    #[test]
    fn test_renderer_null_is_inline() {
        let mut r = Renderer::new();
        r.clause(&Clause::Compare {
            field: String::from("deleted_at"),
            operator: None,
            value: SqlValue::Null,
        });
        let (sql, params) = r.finish();
        assert_eq!(sql, "deleted_at IS NULL");
        assert!(params.is_empty());
    }

    #[test]
    fn test_renderer_uses_generic_placeholders() {
        let mut r = Renderer::new();
        assert_eq!(r.dialect(), "generic");
        r.clause(&Clause::InValues {
            field: String::from("id"),
            mode: crate::condition::SetMode::In,
            values: vec![SqlValue::Int(1), SqlValue::Null],
        });
        let (sql, params) = r.finish();
        assert_eq!(sql, "id IN (?, NULL)");
        assert_eq!(params, vec![SqlValue::Int(1)]);
    }
}
