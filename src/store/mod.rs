//! # Book Store
//!
//! Persistence for the `books` table. The store is the only component that
//! creates, mutates or removes records.
//!
//! - `schema`: table layout, bootstrapped on open
//! - `book_store`: the five record operations plus a liveness ping

mod book_store;
mod errors;
mod schema;

pub use book_store::{BookStore, DEFAULT_BUSY_TIMEOUT};
pub use errors::{StoreError, StoreResult};
pub use schema::CREATE_BOOKS_TABLE;
