//! Table layout for the book store.
//!
//! One table, `books`. `AUTOINCREMENT` keeps SQLite from handing out the id
//! of a deleted row again, so an id names at most one book over the life of
//! the database file.

/// Creates the `books` table when missing. Safe to run on every open.
pub const CREATE_BOOKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    year INTEGER NOT NULL
);
"#;
