//! # Validation
//!
//! Turns untyped request input into typed, constrained values.
//!
//! - `body`: book payload (title, author, year), every violation reported
//! - `params`: path identifiers, first violation reported
//!
//! Validation performs no I/O.

mod body;
mod errors;
mod params;
mod rules;

pub use body::{validate_book, NOT_AN_OBJECT};
pub use errors::{IdRule, ValidationError, ValidationResult};
pub use params::{coerce_id, validate_params};
