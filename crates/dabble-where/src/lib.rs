//! # dabble-where
//!
//! Compiles nested filter specifications into parenthesized SQL WHERE
//! expressions with positional bindings.
//!
//! This crate provides:
//! - A closed set of [`Condition`]s (equality, explicit operators, ranges,
//!   set membership, LIKE, nested groups, raw fragments, sub-statements)
//! - A parser for JSON-shaped specifications ([`Where::from_json`])
//! - A clause tree ([`Where`]) that renders SQL text and the matching list
//!   of bound values
//!
//! ## Building a filter
//!
//! ```rust
//! use dabble_where::{Condition, SqlValue, Where};
//!
//! let (sql, params) = Where::new(vec![
//!     Condition::eq("status", "active"),
//!     Condition::in_list("id", vec![1, 2, 2, 3]),
//!     Condition::group(vec![
//!         Condition::eq("role", "admin"),
//!         Condition::eq("deleted_at", SqlValue::Null),
//!     ]),
//! ])
//! .unwrap()
//! .build();
//!
//! assert_eq!(
//!     sql,
//!     "(status = ? AND id IN (?, ?, ?) AND (role = ? OR deleted_at IS NULL))"
//! );
//! assert_eq!(params.len(), 5);
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values are always bound, never interpolated. NULL is the only literal the
//! compiler writes itself:
//!
//! ```rust
//! use dabble_where::Where;
//! use serde_json::json;
//!
//! let filter = Where::from_json(&json!({"name": "'; DROP TABLE users; --"})).unwrap();
//! assert_eq!(filter.render(), "(name = ?)");
//! ```
//!
//! An empty specification renders the tautology `(1=1)`, so a WHERE clause
//! can always be emitted.

pub mod bindable;
mod clause;
pub mod condition;
pub mod dialect;
mod error;
pub mod operator;
mod parse;
mod render;
pub mod value;

pub use bindable::{Bindable, Raw, Subquery};
pub use clause::Where;
pub use condition::{Condition, Separator, SetMode, SetOperand};
pub use dialect::{Dialect, GenericDialect, Placeholder};
pub use error::{Result, SpecError};
pub use operator::resolve_operator;
pub use parse::parse;
pub use value::{SqlValue, ToSqlValue};
