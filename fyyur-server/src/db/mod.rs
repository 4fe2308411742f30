//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - Explicit pool handle, borrowed by a repository per request
//! - List operations aggregate with JOINs - no N+1 queries
//! - Every mutation runs in one transaction; references are checked
//!   inside it before the first write

pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool, create_pool_with_options};
pub use repos::*;
