//! SQLite-backed book store
//!
//! Every operation is a single statement with bound parameters, so SQLite's
//! own atomicity covers concurrent requests. Statements run on tokio's
//! blocking pool; the connection is taken through a mutex guard that is
//! released on every exit path, including errors and panics.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::errors::{StoreError, StoreResult};
use super::schema::CREATE_BOOKS_TABLE;
use crate::model::{Book, BookId, BookPayload};

/// Default time a statement waits on a locked database before failing
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the book table. Cheap to clone; clones share one connection.
#[derive(Clone)]
pub struct BookStore {
    conn: Arc<Mutex<Connection>>,
}

impl BookStore {
    /// Opens (creating if needed) the database file at `path`.
    pub fn open(path: impl AsRef<Path>, busy_timeout: Duration) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::bootstrap(conn, busy_timeout)
    }

    /// Opens a private in-memory database. Contents vanish on drop.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn, DEFAULT_BUSY_TIMEOUT)
    }

    fn bootstrap(conn: Connection, busy_timeout: Duration) -> StoreResult<Self> {
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch(CREATE_BOOKS_TABLE)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `op` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, op: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
            op(&guard)
        })
        .await?
    }

    /// Returns every book, ordered by id ascending.
    pub async fn list_all(&self) -> StoreResult<Vec<Book>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare_cached("SELECT id, title, author, year FROM books ORDER BY id ASC")?;
            let books = stmt
                .query_map([], row_to_book)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(books)
        })
        .await
    }

    /// Returns the book with `id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when no row matches.
    pub async fn get_by_id(&self, id: BookId) -> StoreResult<Book> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT id, title, author, year FROM books WHERE id = ?1",
                params![id.get()],
                row_to_book,
            )
            .optional()?
            .ok_or(StoreError::NotFound(id))
        })
        .await
    }

    /// Inserts a new book and returns it with its assigned id.
    ///
    /// Field constraints are the caller's responsibility.
    pub async fn create(&self, payload: BookPayload) -> StoreResult<Book> {
        self.with_conn(move |conn| {
            let book = conn.query_row(
                "INSERT INTO books (title, author, year) VALUES (?1, ?2, ?3) \
                 RETURNING id, title, author, year",
                params![payload.title, payload.author, payload.year],
                row_to_book,
            )?;
            Ok(book)
        })
        .await
    }

    /// Replaces title, author and year of the book with `id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when no row was affected.
    pub async fn update(&self, id: BookId, payload: BookPayload) -> StoreResult<Book> {
        self.with_conn(move |conn| {
            conn.query_row(
                "UPDATE books SET title = ?1, author = ?2, year = ?3 WHERE id = ?4 \
                 RETURNING id, title, author, year",
                params![payload.title, payload.author, payload.year, id.get()],
                row_to_book,
            )
            .optional()?
            .ok_or(StoreError::NotFound(id))
        })
        .await
    }

    /// Removes the book with `id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when no row was affected.
    pub async fn delete(&self, id: BookId) -> StoreResult<()> {
        self.with_conn(move |conn| {
            let affected = conn.execute("DELETE FROM books WHERE id = ?1", params![id.get()])?;
            if affected == 0 {
                return Err(StoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    /// Round-trips to the database and returns its current UTC time.
    pub async fn ping(&self) -> StoreResult<String> {
        self.with_conn(|conn| {
            let now = conn.query_row("SELECT datetime('now')", [], |row| row.get::<_, String>(0))?;
            Ok(now)
        })
        .await
    }

    /// Closes the connection if this is the last handle.
    ///
    /// With other handles still alive the connection stays open and closes
    /// when the last of them is dropped.
    pub fn close(self) -> StoreResult<()> {
        let Ok(mutex) = Arc::try_unwrap(self.conn) else {
            return Ok(());
        };
        let conn = mutex.into_inner().map_err(|_| StoreError::Poisoned)?;
        conn.close().map_err(|(_, err)| StoreError::Storage(err))
    }
}

fn row_to_book(row: &Row<'_>) -> rusqlite::Result<Book> {
    let raw_id: i64 = row.get(0)?;
    let id = BookId::new(raw_id).ok_or(rusqlite::Error::IntegralValueOutOfRange(0, raw_id))?;
    Ok(Book {
        id,
        title: row.get(1)?,
        author: row.get(2)?,
        year: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: &str, author: &str, year: i64) -> BookPayload {
        BookPayload {
            title: title.to_string(),
            author: author.to_string(),
            year,
        }
    }

    fn missing_id() -> BookId {
        BookId::new(9_999).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_echoes_fields() {
        let store = BookStore::open_in_memory().unwrap();
        let book = store
            .create(payload("Rayuela", "Julio Cortázar", 1963))
            .await
            .unwrap();

        assert!(book.id.get() > 0);
        assert_eq!(book.payload(), payload("Rayuela", "Julio Cortázar", 1963));
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let store = BookStore::open_in_memory().unwrap();
        let created = store
            .create(payload("Pedro Páramo", "Juan Rulfo", 1955))
            .await
            .unwrap();

        let fetched = store.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_list_all_orders_by_id() {
        let store = BookStore::open_in_memory().unwrap();
        assert!(store.list_all().await.unwrap().is_empty());

        let first = store.create(payload("Uno", "Ana", 2001)).await.unwrap();
        let second = store.create(payload("Dos", "Luis", 2002)).await.unwrap();

        let ids: Vec<_> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = BookStore::open_in_memory().unwrap();
        let err = store.get_by_id(missing_id()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == missing_id()));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_id() {
        let store = BookStore::open_in_memory().unwrap();
        let created = store
            .create(payload("Borrador", "Autor Viejo", 1999))
            .await
            .unwrap();

        let updated = store
            .update(created.id, payload("Final", "Autor Nuevo", 2000))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.payload(), payload("Final", "Autor Nuevo", 2000));

        let fetched = store.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = BookStore::open_in_memory().unwrap();
        let err = store
            .update(missing_id(), payload("Nada", "Nadie", 1))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = BookStore::open_in_memory().unwrap();
        let created = store.create(payload("Efímero", "Ana", 2020)).await.unwrap();

        store.delete(created.id).await.unwrap();
        assert!(store.get_by_id(created.id).await.unwrap_err().is_not_found());
        assert!(store.delete(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let store = BookStore::open_in_memory().unwrap();
        let first = store.create(payload("Uno", "Ana", 2001)).await.unwrap();
        store.delete(first.id).await.unwrap();

        let second = store.create(payload("Dos", "Ana", 2002)).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_values_are_bound_not_interpolated() {
        let store = BookStore::open_in_memory().unwrap();
        let hostile = "x'); DROP TABLE books; --";
        let created = store.create(payload(hostile, "Ana", 2001)).await.unwrap();

        assert_eq!(created.title, hostile);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_table_is_storage_error() {
        let store = BookStore::open_in_memory().unwrap();
        store
            .conn
            .lock()
            .unwrap()
            .execute_batch("DROP TABLE books;")
            .unwrap();

        let err = store.list_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
    }

    #[tokio::test]
    async fn test_ping_returns_clock() {
        let store = BookStore::open_in_memory().unwrap();
        let now = store.ping().await.unwrap();
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(now.len(), 19);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let store = BookStore::open_in_memory().unwrap();
        let mut tasks = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.create(payload("Paralelo", "Ana", 2000 + i)).await
            }));
        }

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap().unwrap().id);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    #[test]
    fn test_close_last_handle() {
        let store = BookStore::open_in_memory().unwrap();
        let clone = store.clone();
        assert!(clone.close().is_ok());
        assert!(store.close().is_ok());
    }
}
