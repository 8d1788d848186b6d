//! Book HTTP Routes
//!
//! CRUD endpoints over the book store. Input arrives already validated by
//! the `ValidId` / `ValidBook` extractors; handlers call one store
//! operation each and map the outcome to a status and body.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::errors::ApiResult;
use super::extract::{ValidBook, ValidId};
use super::response::{DataResponse, MessageResponse};
use crate::model::Book;
use crate::store::BookStore;

// ==================
// Shared State
// ==================

/// Book state shared across handlers
pub struct BookState {
    pub store: BookStore,
}

impl BookState {
    pub fn new(store: BookStore) -> Self {
        Self { store }
    }
}

// ==================
// Book Routes
// ==================

/// Create book routes, to be nested under `/books`
pub fn book_routes(state: Arc<BookState>) -> Router {
    Router::new()
        .route("/", get(list_books_handler).post(create_book_handler))
        .route(
            "/:id",
            get(get_book_handler)
                .put(update_book_handler)
                .delete(delete_book_handler),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_books_handler(State(state): State<Arc<BookState>>) -> ApiResult<Json<Vec<Book>>> {
    let books = state.store.list_all().await?;
    Ok(Json(books))
}

async fn get_book_handler(
    State(state): State<Arc<BookState>>,
    ValidId(id): ValidId,
) -> ApiResult<Json<Book>> {
    let book = state.store.get_by_id(id).await?;
    Ok(Json(book))
}

async fn create_book_handler(
    State(state): State<Arc<BookState>>,
    ValidBook(payload): ValidBook,
) -> ApiResult<(StatusCode, Json<DataResponse<Book>>)> {
    let book = state.store.create(payload).await?;
    tracing::info!(id = %book.id, "book created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("Book added successfully", book)),
    ))
}

async fn update_book_handler(
    State(state): State<Arc<BookState>>,
    ValidId(id): ValidId,
    ValidBook(payload): ValidBook,
) -> ApiResult<Json<DataResponse<Book>>> {
    let book = state.store.update(id, payload).await?;
    tracing::info!(%id, "book updated");
    Ok(Json(DataResponse::new("Book updated successfully", book)))
}

async fn delete_book_handler(
    State(state): State<Arc<BookState>>,
    ValidId(id): ValidId,
) -> ApiResult<Json<MessageResponse>> {
    state.store.delete(id).await?;
    tracing::info!(%id, "book deleted");
    Ok(Json(MessageResponse::new("Book deleted successfully")))
}
