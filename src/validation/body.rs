//! Book body validation
//!
//! Checks title, author and year in that order, collecting every violation.
//! Validation is all-or-nothing: a payload is produced only when no rule
//! failed. Fields other than the three known ones are ignored.

use serde_json::Value;

use super::errors::{ValidationError, ValidationResult};
use super::rules::{AUTHOR, TITLE, YEAR};
use crate::model::BookPayload;

/// Message used when the body is not a JSON object at all
pub const NOT_AN_OBJECT: &str = "Request body must be a JSON object";

/// Validates and normalizes a raw request body.
///
/// # Errors
///
/// Returns [`ValidationError::Body`] carrying one message per violated
/// constraint.
pub fn validate_book(body: &Value) -> ValidationResult<BookPayload> {
    let fields = body
        .as_object()
        .ok_or_else(|| ValidationError::Body(vec![NOT_AN_OBJECT.to_string()]))?;

    let mut violations = Vec::new();
    let title = TITLE.check(fields.get("title"), &mut violations);
    let author = AUTHOR.check(fields.get("author"), &mut violations);
    let year = YEAR.check(fields.get("year"), &mut violations);

    match (title, author, year) {
        (Some(title), Some(author), Some(year)) if violations.is_empty() => Ok(BookPayload {
            title,
            author,
            year,
        }),
        _ => Err(ValidationError::Body(violations)),
    }
}
