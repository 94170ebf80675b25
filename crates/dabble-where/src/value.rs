//! SQL values and parameter handling.
//!
//! Every caller-supplied value ends up as a bound parameter. The only value
//! ever written into the SQL text is the `NULL` sentinel.

use serde::Serialize;
use serde_json::Value as JsonValue;

/// A SQL value that can be bound to a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Returns true for the NULL sentinel.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Converts a scalar JSON value.
    ///
    /// Returns `None` for arrays and objects, which are specification
    /// shapes rather than values, and for integers beyond `i64::MAX`,
    /// which would otherwise lose precision as floats.
    #[must_use]
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => Some(Self::Null),
            JsonValue::Bool(b) => Some(Self::Bool(*b)),
            JsonValue::Number(n) if n.is_u64() => n.as_i64().map(Self::Int),
            JsonValue::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float)),
            JsonValue::String(s) => Some(Self::Text(s.clone())),
            JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }
}

/// Removes repeated values, keeping the first occurrence of each in place.
pub(crate) fn dedup_values(values: &[SqlValue]) -> Vec<SqlValue> {
    let mut unique: Vec<SqlValue> = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(value) {
            unique.push(value.clone());
        }
    }
    unique
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

impl ToSqlValue for i32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for i16 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for u32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for u16 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for u8 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        self.map_or(SqlValue::Null, ToSqlValue::to_sql_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_sql_value_conversions() {
        assert_eq!(true.to_sql_value(), SqlValue::Bool(true));
        assert_eq!(42_i32.to_sql_value(), SqlValue::Int(42));
        assert_eq!(2.5_f64.to_sql_value(), SqlValue::Float(2.5));
        assert_eq!(
            "hello".to_sql_value(),
            SqlValue::Text(String::from("hello"))
        );
        assert_eq!(None::<i32>.to_sql_value(), SqlValue::Null);
        assert_eq!(Some(42_i32).to_sql_value(), SqlValue::Int(42));
    }

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(SqlValue::from_json(&json!(null)), Some(SqlValue::Null));
        assert_eq!(SqlValue::from_json(&json!(7)), Some(SqlValue::Int(7)));
        assert_eq!(SqlValue::from_json(&json!(1.5)), Some(SqlValue::Float(1.5)));
        assert_eq!(
            SqlValue::from_json(&json!("x")),
            Some(SqlValue::Text(String::from("x")))
        );
        assert_eq!(
            SqlValue::from_json(&json!(i64::MAX)),
            Some(SqlValue::Int(i64::MAX))
        );
        assert_eq!(SqlValue::from_json(&json!(u64::MAX)), None);
        assert_eq!(SqlValue::from_json(&json!([1])), None);
        assert_eq!(SqlValue::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn test_dedup_keeps_first_seen_order() {
        let values = vec![
            SqlValue::Int(3),
            SqlValue::Int(1),
            SqlValue::Int(3),
            SqlValue::Int(2),
            SqlValue::Int(1),
        ];
        assert_eq!(
            dedup_values(&values),
            vec![SqlValue::Int(3), SqlValue::Int(1), SqlValue::Int(2)]
        );
    }

    #[test]
    fn test_serialize_untagged() {
        let values = vec![
            SqlValue::Null,
            SqlValue::Int(1),
            SqlValue::Text(String::from("a")),
        ];
        assert_eq!(
            serde_json::to_string(&values).unwrap(),
            r#"[null,1,"a"]"#
        );
    }
}
