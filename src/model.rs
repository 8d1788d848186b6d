//! Book domain types
//!
//! A `Book` is the only entity the service stores. `BookPayload` is the
//! validated, normalized body of a create or update request; `BookId` is a
//! strictly positive row identifier assigned by storage.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a stored book.
///
/// Always strictly positive. Values come either from path validation or
/// from rows read back out of storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    /// Wraps a raw identifier, returning `None` unless it is positive.
    pub fn new(raw: i64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized book fields as accepted by the body validator.
///
/// `title` and `author` are trimmed. Construct through
/// [`crate::validation::validate_book`] to guarantee the field constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub year: i64,
}

/// A persisted book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl Book {
    /// Returns the non-id fields as a payload.
    pub fn payload(&self) -> BookPayload {
        BookPayload {
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.year,
        }
    }
}
