//! fyyur-server: venues, artists, and the shows that link them
//!
//! - `models`: form drafts and their validation
//! - `db`: SQLite pool, schema, and repositories
//! - `http`: Axum routes, extractors, and JSON errors

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_memory_pool, create_pool, create_pool_with_options, DbError};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
