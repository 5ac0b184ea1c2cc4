//! SQLite course catalog.
//!
//! [`Database`] wraps a single synchronous connection and exposes the catalog
//! queries; [`SqliteCatalog`] adapts it to the async [`crate::CourseCatalog`]
//! gateway by opening a connection per call on the blocking thread pool.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

mod catalog;
pub mod course_queries;
pub mod migrations;

pub use catalog::SqliteCatalog;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the catalog at `path` and brings its schema up to
    /// date.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
