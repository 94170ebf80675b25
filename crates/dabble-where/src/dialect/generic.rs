//! Generic SQL dialect.

use super::Dialect;

/// A generic SQL dialect using ANSI `?` placeholders.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Placeholder;
    use crate::value::SqlValue;

    #[test]
    fn test_generic_dialect() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.name(), "generic");
        assert_eq!(dialect.parameter_placeholder(), "?");
        assert_eq!(dialect.string_escape(), "''");
    }

    #[test]
    fn test_placeholder_for_value_binds() {
        let p = GenericDialect.placeholder_for(&SqlValue::Int(1));
        assert_eq!(
            p,
            Placeholder {
                token: "?",
                binds: true
            }
        );
    }

    #[test]
    fn test_placeholder_for_null_is_inline() {
        let p = GenericDialect.placeholder_for(&SqlValue::Null);
        assert_eq!(p.token, "NULL");
        assert!(!p.binds);
    }

    #[test]
    fn test_placeholders_for_keeps_duplicates_without_set_semantics() {
        let values = [SqlValue::Int(1), SqlValue::Int(1)];
        let (placeholders, bound) = GenericDialect.placeholders_for(&values, false);
        assert_eq!(placeholders.len(), 2);
        assert_eq!(bound, values.to_vec());
    }

    #[test]
    fn test_placeholders_for_unique() {
        let values = [
            SqlValue::Int(1),
            SqlValue::Int(2),
            SqlValue::Int(2),
            SqlValue::Int(3),
        ];
        let (placeholders, bound) = GenericDialect.placeholders_for(&values, true);
        assert_eq!(placeholders.len(), 3);
        assert_eq!(
            bound,
            vec![SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3)]
        );
    }

    #[test]
    fn test_placeholders_for_skips_null_bindings() {
        let values = [SqlValue::Int(1), SqlValue::Null];
        let (placeholders, bound) = GenericDialect.placeholders_for(&values, true);
        let tokens: Vec<&str> = placeholders.iter().map(|p| p.token).collect();
        assert_eq!(tokens, vec!["?", "NULL"]);
        assert_eq!(bound, vec![SqlValue::Int(1)]);
    }

    #[test]
    fn test_quote_literal() {
        let d = GenericDialect;
        assert_eq!(d.quote_literal(&SqlValue::Null), "NULL");
        assert_eq!(d.quote_literal(&SqlValue::Bool(true)), "TRUE");
        assert_eq!(d.quote_literal(&SqlValue::Int(-100)), "-100");
        assert_eq!(
            d.quote_literal(&SqlValue::Text(String::from("O'Brien"))),
            "'O''Brien'"
        );
        assert_eq!(
            d.quote_literal(&SqlValue::Blob(vec![0x48, 0x45, 0x4C, 0x4C, 0x4F])),
            "X'48454C4C4F'"
        );
    }

    #[test]
    fn test_quote_literal_injection_is_escaped() {
        let malicious = SqlValue::Text(String::from("'; DROP TABLE users; --"));
        assert_eq!(
            GenericDialect.quote_literal(&malicious),
            "'''; DROP TABLE users; --'"
        );
    }
}
