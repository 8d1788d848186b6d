//! API documentation route
//!
//! Serves a static OpenAPI 3 description of the book endpoints at
//! `/api-docs/openapi.json`.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// Create documentation routes, to be nested under `/api-docs`
pub fn docs_routes() -> Router {
    Router::new().route("/openapi.json", get(openapi_handler))
}

async fn openapi_handler() -> Json<Value> {
    Json(openapi_document())
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": json_content(json!({ "$ref": "#/components/schemas/Error" }))
    })
}

fn id_parameter(description: &str) -> Value {
    json!({
        "in": "path",
        "name": "id",
        "required": true,
        "schema": { "type": "integer", "minimum": 1 },
        "description": description
    })
}

fn payload_body() -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/BookPayload" } }
        }
    })
}

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

fn collection_path() -> Value {
    let list = json!({
        "summary": "List every book",
        "tags": ["Books"],
        "responses": {
            "200": {
                "description": "All books, ordered by id",
                "content": json_content(json!({
                    "type": "array",
                    "items": { "$ref": "#/components/schemas/Book" }
                }))
            },
            "500": error_response("Internal server error")
        }
    });
    let create = json!({
        "summary": "Create a book",
        "tags": ["Books"],
        "requestBody": payload_body(),
        "responses": {
            "201": {
                "description": "Book created",
                "content": json_content(json!({ "$ref": "#/components/schemas/BookEnvelope" }))
            },
            "400": error_response("Validation failed"),
            "500": error_response("Internal server error")
        }
    });
    json!({ "get": list, "post": create })
}

fn item_path() -> Value {
    let get = json!({
        "summary": "Get a book by id",
        "tags": ["Books"],
        "parameters": [id_parameter("Id of the book to fetch")],
        "responses": {
            "200": {
                "description": "Book found",
                "content": json_content(json!({ "$ref": "#/components/schemas/Book" }))
            },
            "400": error_response("Invalid id"),
            "404": error_response("Book not found"),
            "500": error_response("Internal server error")
        }
    });
    let put = json!({
        "summary": "Replace a book's fields",
        "tags": ["Books"],
        "parameters": [id_parameter("Id of the book to update")],
        "requestBody": payload_body(),
        "responses": {
            "200": {
                "description": "Book updated",
                "content": json_content(json!({ "$ref": "#/components/schemas/BookEnvelope" }))
            },
            "400": error_response("Invalid id or body"),
            "404": error_response("Book not found"),
            "500": error_response("Internal server error")
        }
    });
    let delete = json!({
        "summary": "Delete a book",
        "tags": ["Books"],
        "parameters": [id_parameter("Id of the book to delete")],
        "responses": {
            "200": { "description": "Book deleted" },
            "400": error_response("Invalid id"),
            "404": error_response("Book not found"),
            "500": error_response("Internal server error")
        }
    });
    json!({ "get": get, "put": put, "delete": delete })
}

fn schemas() -> Value {
    let book = json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer" },
            "title": { "type": "string" },
            "author": { "type": "string" },
            "year": { "type": "integer" }
        },
        "example": {
            "id": 1,
            "title": "Cien años de soledad",
            "author": "Gabriel García Márquez",
            "year": 1967
        }
    });
    let payload = json!({
        "type": "object",
        "required": ["title", "author", "year"],
        "properties": {
            "title": { "type": "string", "minLength": 2, "maxLength": 100 },
            "author": {
                "type": "string",
                "minLength": 2,
                "maxLength": 50,
                "pattern": "^[A-Za-zÀ-ÿ]+(?:\\s[A-Za-zÀ-ÿ]+)*$"
            },
            "year": { "type": "integer", "minimum": 1 }
        }
    });
    let envelope = json!({
        "type": "object",
        "properties": {
            "message": { "type": "string" },
            "data": { "$ref": "#/components/schemas/Book" }
        }
    });
    let error = json!({
        "type": "object",
        "properties": {
            "error": {
                "oneOf": [
                    { "type": "string" },
                    { "type": "array", "items": { "type": "string" } }
                ]
            }
        }
    });
    json!({ "Book": book, "BookPayload": payload, "BookEnvelope": envelope, "Error": error })
}

/// Builds the OpenAPI document for the book endpoints.
pub fn openapi_document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Bookshelf API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "CRUD endpoints for books"
        },
        "tags": [{ "name": "Books", "description": "Books managed by the API" }],
        "paths": {
            "/books": collection_path(),
            "/books/{id}": item_path()
        },
        "components": { "schemas": schemas() }
    })
}
