//! Placeholder and literal quoting.
//!
//! The compiler never decides on its own how a value is written into SQL
//! text; it asks a [`Dialect`]. Only ANSI `?` placeholders are provided.

mod generic;

pub use generic::GenericDialect;

use crate::value::{dedup_values, SqlValue};

/// The text written for one value slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    /// Text emitted into the SQL.
    pub token: &'static str,
    /// Whether the slot consumes one bound value.
    pub binds: bool,
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the string escape sequence for a single quote.
    fn string_escape(&self) -> &'static str {
        "''"
    }

    /// Returns the parameter placeholder style.
    fn parameter_placeholder(&self) -> &'static str {
        "?"
    }

    /// Returns the placeholder for a single value.
    ///
    /// NULL is written inline and binds nothing; everything else is a
    /// positional parameter.
    fn placeholder_for(&self, value: &SqlValue) -> Placeholder {
        if value.is_null() {
            Placeholder {
                token: "NULL",
                binds: false,
            }
        } else {
            Placeholder {
                token: self.parameter_placeholder(),
                binds: true,
            }
        }
    }

    /// Returns one placeholder per value, in input order, together with the
    /// values that have to be bound for them.
    ///
    /// With `unique` set, repeated values are dropped first (first-seen
    /// order is kept).
    fn placeholders_for(
        &self,
        values: &[SqlValue],
        unique: bool,
    ) -> (Vec<Placeholder>, Vec<SqlValue>) {
        let values = if unique {
            dedup_values(values)
        } else {
            values.to_vec()
        };
        let placeholders: Vec<Placeholder> =
            values.iter().map(|v| self.placeholder_for(v)).collect();
        let bound = values
            .into_iter()
            .zip(&placeholders)
            .filter(|(_, p)| p.binds)
            .map(|(v, _)| v)
            .collect();
        (placeholders, bound)
    }

    /// Returns the SQL representation for inline use (escaped).
    ///
    /// **Warning**: only meant for the NULL sentinel and debug output.
    fn quote_literal(&self, value: &SqlValue) -> String {
        match value {
            SqlValue::Null => String::from("NULL"),
            SqlValue::Bool(b) => {
                if *b {
                    String::from("TRUE")
                } else {
                    String::from("FALSE")
                }
            }
            SqlValue::Int(n) => format!("{n}"),
            SqlValue::Float(f) => format!("{f}"),
            SqlValue::Text(s) => {
                let escaped = s.replace('\'', self.string_escape());
                format!("'{escaped}'")
            }
            SqlValue::Blob(b) => {
                let hex: String = b.iter().map(|byte| format!("{byte:02X}")).collect();
                format!("X'{hex}'")
            }
        }
    }
}
