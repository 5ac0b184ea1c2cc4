//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

/// Columns added after the first catalog schema, with their definitions.
const ADDED_COLUMNS: [(&str, &str); 2] = [
    ("overview", "TEXT"),
    ("terms", "TEXT NOT NULL DEFAULT '[]'"),
];

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()
    }

    /// Brings catalogs created by older versions up to date.
    fn apply_migrations(&self) -> Result<()> {
        for (column, definition) in ADDED_COLUMNS {
            if !self.has_column("courses", column)? {
                self.connection
                    .execute(
                        &format!("ALTER TABLE courses ADD COLUMN {column} {definition}"),
                        [],
                    )
                    .db_context("Failed to add column to courses table")?;
            }
        }

        Ok(())
    }

    fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        self.connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
                [table, column],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect table columns")
    }
}
