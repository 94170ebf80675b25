//! Parsing of JSON-shaped specifications.
//!
//! The accepted shape mirrors a nested keyed array:
//!
//! - a numeric key (`"0"`, `"1"`, ...) or an array element is a nested
//!   group whose separator alternates with its parent's;
//! - an `"AND"` / `"OR"` key is a nested group with that separator;
//! - a field with a scalar value is an equality test;
//! - a field with `{"<modifier>": operand}` uses `BETWEEN`, `IN`, `NOT IN`,
//!   `ANY`, `SOME`, `ALL`, `LIKE`, or any other key as a comparison
//!   operator;
//! - a field with `["<modifier>", operand]` does the same, but only for
//!   those keywords and the comparison symbols (`!`, `=`, `<>`, `<`, ...);
//! - any other list is an equality test against its first value.
//!
//! Keys are processed in document order, so `serde_json` must keep object
//! order (the `preserve_order` feature).
//!
//! # Example
//!
//! ```rust
//! use dabble_where::Where;
//! use serde_json::json;
//!
//! let filter = Where::from_json(&json!({
//!     "status": "active",
//!     "age": {"BETWEEN": [18, 65]},
//!     "0": {"role": "admin", "verified": true},
//! }))
//! .unwrap();
//!
//! assert_eq!(
//!     filter.render(),
//!     "(status = ? AND age BETWEEN ? AND ? AND (role = ? OR verified = ?))"
//! );
//! ```

use serde_json::{Map, Value as JsonValue};

use crate::clause::Where;
use crate::condition::{Condition, SetMode, SetOperand, Separator};
use crate::error::{Result, SpecError};
use crate::operator::{is_comparison_token, is_numeric_token};
use crate::value::SqlValue;

/// Parses a JSON specification into conditions.
///
/// `null`, `{}` and `[]` yield no conditions.
///
/// # Errors
///
/// Returns [`SpecError`] when the root is a scalar or a nested shape
/// cannot be interpreted.
pub fn parse(spec: &JsonValue) -> Result<Vec<Condition>> {
    match spec {
        JsonValue::Null => Ok(vec![]),
        JsonValue::Object(map) => parse_object(map),
        JsonValue::Array(items) => parse_array(items),
        other => Err(SpecError::InvalidRoot(shape(other))),
    }
}

impl Where {
    /// Builds a clause tree from a JSON specification.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when the specification is malformed.
    pub fn from_json(spec: &JsonValue) -> Result<Self> {
        Self::new(parse(spec)?)
    }
}

fn parse_object(map: &Map<String, JsonValue>) -> Result<Vec<Condition>> {
    map.iter()
        .map(|(key, value)| {
            if is_numeric_token(key) {
                parse_group(key, value, None)
            } else if let Some(separator) = Separator::from_keyword(key) {
                parse_group(key, value, Some(separator))
            } else {
                parse_field(key, value)
            }
        })
        .collect()
}

fn parse_array(items: &[JsonValue]) -> Result<Vec<Condition>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_group(&i.to_string(), item, None))
        .collect()
}

fn parse_group(key: &str, value: &JsonValue, separator: Option<Separator>) -> Result<Condition> {
    let children = match value {
        JsonValue::Object(map) => parse_object(map)?,
        JsonValue::Array(items) => parse_array(items)?,
        other => {
            return Err(SpecError::NotAGroup {
                key: key.to_string(),
                found: shape(other),
            })
        }
    };
    if children.is_empty() {
        return Err(SpecError::EmptyGroup {
            key: key.to_string(),
        });
    }
    Ok(Condition::Group {
        separator,
        children,
    })
}

fn parse_field(field: &str, value: &JsonValue) -> Result<Condition> {
    if field.trim().is_empty() {
        return Err(SpecError::EmptyField);
    }
    match value {
        JsonValue::Object(map) => {
            let mut entries = map.iter();
            match (entries.next(), entries.next()) {
                (Some((token, operand)), None) => parse_modifier(field, token, operand),
                _ => Err(SpecError::ModifierCount {
                    field: field.to_string(),
                    found: map.len(),
                }),
            }
        }
        JsonValue::Array(items) => match items.as_slice() {
            [JsonValue::String(token), operand] if is_list_modifier(token) => {
                parse_modifier(field, token, operand)
            }
            _ => Ok(Condition::Compared {
                field: field.to_string(),
                operator: String::from("0"),
                value: first_scalar(field, "=", value)?,
            }),
        },
        scalar => Ok(Condition::Equals {
            field: field.to_string(),
            value: first_scalar(field, "=", scalar)?,
        }),
    }
}

/// Only known keywords may lead a list; anything else is data.
fn is_list_modifier(token: &str) -> bool {
    let keyword = token.trim().to_ascii_uppercase();
    keyword == "BETWEEN"
        || keyword == "LIKE"
        || SetMode::from_keyword(token).is_some()
        || is_comparison_token(token)
}

fn parse_modifier(field: &str, token: &str, operand: &JsonValue) -> Result<Condition> {
    let modifier = token.trim().to_ascii_uppercase();
    if modifier == "BETWEEN" {
        return parse_between(field, operand);
    }
    if let Some(mode) = SetMode::from_keyword(token) {
        return Ok(Condition::In {
            field: field.to_string(),
            mode,
            operand: SetOperand::Values(scalar_list(field, mode.as_str(), operand)?),
        });
    }
    if modifier == "LIKE" {
        let pattern = SqlValue::from_json(operand).ok_or_else(|| SpecError::InvalidOperand {
            field: field.to_string(),
            modifier,
            expected: "a pattern",
            found: shape(operand),
        })?;
        return Ok(Condition::Like {
            field: field.to_string(),
            pattern,
        });
    }
    Ok(Condition::Compared {
        field: field.to_string(),
        operator: token.to_string(),
        value: first_scalar(field, &modifier, operand)?,
    })
}

fn parse_between(field: &str, operand: &JsonValue) -> Result<Condition> {
    let JsonValue::Array(items) = operand else {
        return Err(SpecError::InvalidOperand {
            field: field.to_string(),
            modifier: String::from("BETWEEN"),
            expected: "a pair of values",
            found: shape(operand),
        });
    };
    let values = scalar_list(field, "BETWEEN", operand)?;
    match <[SqlValue; 2]>::try_from(values) {
        Ok([low, high]) => Ok(Condition::Between {
            field: field.to_string(),
            low,
            high,
        }),
        Err(_) => Err(SpecError::BetweenArity {
            field: field.to_string(),
            found: items.len(),
        }),
    }
}

/// Reads a scalar or a flat array of scalars.
fn scalar_list(field: &str, modifier: &str, operand: &JsonValue) -> Result<Vec<SqlValue>> {
    let invalid = |found: &JsonValue| SpecError::InvalidOperand {
        field: field.to_string(),
        modifier: modifier.to_string(),
        expected: "scalar values",
        found: shape(found),
    };
    match operand {
        JsonValue::Array(items) => items
            .iter()
            .map(|item| SqlValue::from_json(item).ok_or_else(|| invalid(item)))
            .collect(),
        JsonValue::Object(_) => Err(invalid(operand)),
        scalar => SqlValue::from_json(scalar)
            .map(|value| vec![value])
            .ok_or_else(|| invalid(scalar)),
    }
}

/// Unwraps nested arrays down to their first scalar.
fn first_scalar(field: &str, modifier: &str, operand: &JsonValue) -> Result<SqlValue> {
    let mut current = operand;
    loop {
        match current {
            JsonValue::Array(items) => match items.first() {
                Some(first) => current = first,
                None => {
                    return Err(SpecError::MissingOperand {
                        field: field.to_string(),
                        modifier: modifier.to_string(),
                    })
                }
            },
            JsonValue::Object(_) => {
                return Err(SpecError::InvalidOperand {
                    field: field.to_string(),
                    modifier: modifier.to_string(),
                    expected: "a scalar value",
                    found: "object",
                })
            }
            scalar => {
                return SqlValue::from_json(scalar).ok_or(SpecError::InvalidOperand {
                    field: field.to_string(),
                    modifier: modifier.to_string(),
                    expected: "a scalar value",
                    found: shape(scalar),
                })
            }
        }
    }
}

fn shape(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(n) if n.is_u64() && n.as_i64().is_none() => "integer out of range",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
