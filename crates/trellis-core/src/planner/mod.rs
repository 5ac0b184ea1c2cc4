//! High-level planner API over the SQLite catalog.
//!
//! [`Planner`] is the entry point used by the CLI and the MCP server. It owns
//! the catalog location and runs every operation on the blocking thread pool,
//! opening a fresh connection per call:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Planner      │    │   Scheduler /   │    │    Database     │
//! │ (course_ops,    │───▶│  SqliteCatalog  │───▶│   (via db/)     │
//! │  plan_ops)      │    │                 │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`builder`]: resolves the catalog path and initialises the schema
//! - [`course_ops`]: catalog maintenance (import, show, list, remove)
//! - [`plan_ops`]: plan generation
//!
//! ```rust
//! use trellis_core::{params::BuildPlan, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/trellis-example.db"))
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .generate_plan(&BuildPlan::new(["comp202", "comp250"], 6))
//!     .await?;
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

pub mod builder;
pub mod course_ops;
pub mod plan_ops;


pub use builder::PlannerBuilder;

use crate::db::SqliteCatalog;

/// Main planner interface over a catalog file.
pub struct Planner {
    pub(crate) db_path: PathBuf,
}

impl Planner {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Location of the catalog database.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Catalog gateway over the same database file.
    pub fn catalog(&self) -> SqliteCatalog {
        SqliteCatalog::new(self.db_path.clone())
    }
}
