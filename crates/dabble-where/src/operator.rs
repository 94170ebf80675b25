//! Comparison operator resolution.

use std::borrow::Cow;

use crate::value::SqlValue;

/// Resolves the SQL operator for a comparison against `value`.
///
/// With no token the operator is inferred from the value. `"!"` is
/// shorthand for `<>`, and a numeric token (left over from a positional
/// list entry) means equality. Anything else is passed through uppercased
/// and left to the database to reject. Equality and inequality against
/// NULL become `IS` / `IS NOT`.
#[must_use]
pub fn resolve_operator(value: &SqlValue, token: Option<&str>) -> Cow<'static, str> {
    let op: Cow<'static, str> = match token.map(str::trim) {
        None | Some("") => Cow::Borrowed("="),
        Some("!") => Cow::Borrowed("<>"),
        Some(t) if is_numeric_token(t) => Cow::Borrowed("="),
        Some(t) => Cow::Owned(t.to_ascii_uppercase()),
    };
    if !value.is_null() {
        return op;
    }
    match op.as_ref() {
        "=" => Cow::Borrowed("IS"),
        "<>" | "!=" => Cow::Borrowed("IS NOT"),
        _ => op,
    }
}

/// Matches the comparison operators that may lead an `[operator, operand]`
/// list.
pub(crate) fn is_comparison_token(token: &str) -> bool {
    matches!(
        token.trim().to_ascii_uppercase().as_str(),
        "!" | "=" | "<>" | "!=" | "<" | "<=" | ">" | ">=" | "IS" | "IS NOT" | "NOT LIKE"
    )
}

/// Matches tokens such as `0`, `12`, `-3` or `1.5`.
pub(crate) fn is_numeric_token(token: &str) -> bool {
    let digits = token
        .strip_prefix(|c| c == '-' || c == '+')
        .unwrap_or(token);
    let mut parts = digits.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next();
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    match fraction {
        None => !whole.is_empty() && all_digits(whole),
        Some(f) => (!whole.is_empty() || !f.is_empty()) && all_digits(whole) && all_digits(f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text() -> SqlValue {
        SqlValue::Text(String::from("active"))
    }

    #[test]
    fn test_inferred_equality() {
        assert_eq!(resolve_operator(&text(), None), "=");
    }

    #[test]
    fn test_inferred_null() {
        assert_eq!(resolve_operator(&SqlValue::Null, None), "IS");
    }

    #[test]
    fn test_negation_shorthand() {
        assert_eq!(resolve_operator(&text(), Some("!")), "<>");
        assert_eq!(resolve_operator(&SqlValue::Null, Some("!")), "IS NOT");
    }

    #[test]
    fn test_numeric_token_means_equality() {
        assert_eq!(resolve_operator(&text(), Some("0")), "=");
        assert_eq!(resolve_operator(&text(), Some("12")), "=");
        assert_eq!(resolve_operator(&SqlValue::Null, Some("3")), "IS");
    }

    #[test]
    fn test_explicit_operator_passes_through() {
        assert_eq!(resolve_operator(&SqlValue::Int(5), Some(">")), ">");
        assert_eq!(resolve_operator(&SqlValue::Int(5), Some("<=")), "<=");
        assert_eq!(resolve_operator(&text(), Some("not like")), "NOT LIKE");
    }

    #[test]
    fn test_null_rewrites_only_equality_forms() {
        assert_eq!(resolve_operator(&SqlValue::Null, Some("=")), "IS");
        assert_eq!(resolve_operator(&SqlValue::Null, Some("<>")), "IS NOT");
        assert_eq!(resolve_operator(&SqlValue::Null, Some("!=")), "IS NOT");
        assert_eq!(resolve_operator(&SqlValue::Null, Some(">")), ">");
    }

    #[test]
    fn test_malformed_token_is_verbatim() {
        assert_eq!(resolve_operator(&SqlValue::Int(1), Some("=>=")), "=>=");
    }

    #[test]
    fn test_comparison_token_detection() {
        for token in ["!", "=", "<>", "!=", "<", "<=", ">", ">=", "is not", " >= "] {
            assert!(is_comparison_token(token), "{token}");
        }
        assert!(!is_comparison_token("alice"));
        assert!(!is_comparison_token("x; DROP TABLE users; --"));
        assert!(!is_comparison_token("=>="));
        assert!(!is_comparison_token("0"));
    }

    #[test]
    fn test_numeric_token_detection() {
        assert!(is_numeric_token("0"));
        assert!(is_numeric_token("-3"));
        assert!(is_numeric_token("1.5"));
        assert!(!is_numeric_token(""));
        assert!(!is_numeric_token("."));
        assert!(!is_numeric_token("1e5"));
        assert!(!is_numeric_token("!"));
        assert!(!is_numeric_token("inf"));
    }
}
