//! Validation error types
//!
//! Two shapes of rejection exist:
//! - `Body`: every violated field constraint, in field order
//! - `Param`: the first path parameter that failed identifier coercion

use std::fmt;

use thiserror::Error;

/// Rule a path identifier failed, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdRule {
    /// Value does not coerce to a number
    NotANumber,
    /// Value is a number but not an integer
    NotAnInteger,
    /// Value is an integer but zero or negative
    NotPositive,
    /// Value is a positive integer that no stored row can carry
    OutOfRange,
}

impl IdRule {
    /// Client-facing rule text, appended to the parameter name
    pub fn message(&self) -> &'static str {
        match self {
            IdRule::NotANumber => "must be a number",
            IdRule::NotAnInteger => "must be an integer",
            IdRule::NotPositive => "must be positive",
            IdRule::OutOfRange => "is out of range",
        }
    }
}

impl fmt::Display for IdRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Input rejected before it reaches a handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Request body violated one or more field constraints
    #[error("invalid book: {}", .0.join("; "))]
    Body(Vec<String>),

    /// Path parameter failed identifier coercion
    #[error("Parameter '{name}' {rule}")]
    Param { name: String, rule: IdRule },
}

impl ValidationError {
    /// Individual messages carried by this error.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ValidationError::Body(messages) => messages.clone(),
            ValidationError::Param { .. } => vec![self.to_string()],
        }
    }
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;
