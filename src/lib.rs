//! bookshelf - a small, strict CRUD service for books
//!
//! Request flow: path and body validation (`validation`), one store
//! operation (`store`), status and JSON body (`http_server`).

pub mod cli;
pub mod config;
pub mod http_server;
pub mod logging;
pub mod model;
pub mod store;
pub mod validation;
