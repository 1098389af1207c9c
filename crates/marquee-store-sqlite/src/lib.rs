//! SQLite backend for the marquee movie store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{DEFAULT_DATABASE_PATH, SqliteStore};

#[cfg(test)]
mod tests;
