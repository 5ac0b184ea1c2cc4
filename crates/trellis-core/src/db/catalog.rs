use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::task;

use super::Database;
use crate::{
    catalog::{CandidateQuery, CourseCatalog},
    error::{PlannerError, Result},
    models::{Course, CourseId},
};

/// [`CourseCatalog`] backed by the SQLite catalog file.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    db_path: PathBuf,
}

impl SqliteCatalog {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }
}

#[async_trait]
impl CourseCatalog for SqliteCatalog {
    async fn fetch_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>> {
        let db_path = self.db_path.clone();
        let ids = ids.to_vec();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_courses_by_ids(&ids)
        })
        .await
        .map_err(PlannerError::join)?
    }

    async fn fetch_candidates(&self, query: &CandidateQuery) -> Result<Vec<Course>> {
        let db_path = self.db_path.clone();
        let query = query.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.find_candidates(&query)
        })
        .await
        .map_err(PlannerError::join)?
    }
}
