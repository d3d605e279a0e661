//! Translation error types
//!
//! Translating an expression never fails. These errors only come from
//! building a custom rule table.

use thiserror::Error;

/// Result type for rule-table construction
pub type TranslateResult<T> = std::result::Result<T, TranslateError>;

/// Errors that can occur while building or validating a rule table
#[derive(Debug, Error)]
pub enum TranslateError {
    /// A custom rule pattern failed to compile
    #[error("Invalid pattern for rule {rule}: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    /// Two rules share a name
    #[error("Duplicate rule name: {0}")]
    DuplicateRule(String),

    /// A rule references another rule that is not in the table
    #[error("Rule {rule} references unknown rule {target}")]
    UnknownRule { rule: String, target: String },

    /// A composite rule sits after the generic rule it wraps
    #[error("Rule {composite} (position {composite_pos}) must come before {generic} (position {generic_pos})")]
    OrderViolation {
        composite: String,
        composite_pos: usize,
        generic: String,
        generic_pos: usize,
    },
}
