//! Error types for clause construction.

use thiserror::Error;

/// A condition specification the compiler cannot interpret.
///
/// Raised while a clause tree is being constructed; rendering a constructed
/// tree never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// The root of a JSON specification is neither an object, an array nor null.
    #[error("specification must be an object or an array, found {0}")]
    InvalidRoot(&'static str),

    /// A condition names an empty field.
    #[error("field name must not be empty")]
    EmptyField,

    /// A nested group has no children.
    #[error("group '{key}' has no conditions")]
    EmptyGroup {
        /// Key (or position) of the group.
        key: String,
    },

    /// A positional or separator key holds something other than a group.
    #[error("key '{key}' must hold a nested group, found {found}")]
    NotAGroup {
        /// The offending key.
        key: String,
        /// Shape that was found instead.
        found: &'static str,
    },

    /// A set-membership modifier was given no values.
    #[error("{modifier} on '{field}' requires at least one value")]
    MissingOperand {
        /// Field the modifier applies to.
        field: String,
        /// The modifier, uppercased.
        modifier: String,
    },

    /// BETWEEN was given anything but a pair of values.
    #[error("BETWEEN on '{field}' expects exactly two values, found {found}")]
    BetweenArity {
        /// Field the range applies to.
        field: String,
        /// Number of values supplied.
        found: usize,
    },

    /// A modifier object holds zero or several modifiers.
    #[error("'{field}' expects exactly one modifier, found {found}")]
    ModifierCount {
        /// Field the modifiers apply to.
        field: String,
        /// Number of modifier keys supplied.
        found: usize,
    },

    /// An operand has a shape that does not fit its modifier.
    #[error("'{field}': {modifier} expects {expected}, found {found}")]
    InvalidOperand {
        /// Field the modifier applies to.
        field: String,
        /// The modifier, uppercased.
        modifier: String,
        /// Shape that was expected.
        expected: &'static str,
        /// Shape that was found.
        found: &'static str,
    },
}

/// Result type for clause construction.
pub type Result<T> = std::result::Result<T, SpecError>;
