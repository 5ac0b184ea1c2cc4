//! Catalog gateway consumed by the scheduler.
//!
//! The scheduler never talks to storage directly. It receives an explicit
//! [`CourseCatalog`] and issues at most two calls per plan: one batch lookup of
//! the requested ids and, when the plan falls short of its credit target, one
//! filtered candidate search. Two implementations ship with the crate:
//!
//! - [`MemoryCatalog`]: an in-memory, deterministic catalog for embedding and
//!   tests
//! - [`crate::db::SqliteCatalog`]: the SQLite-backed catalog used by the CLI
//!   and MCP server

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{AcademicLevel, Course, CourseId, CourseLevel},
};

/// Filters for the backfill candidate search.
///
/// Empty list filters mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateQuery {
    /// Only these ids are eligible
    pub included_ids: Vec<CourseId>,

    /// Ids that must not be returned
    pub excluded_ids: Vec<CourseId>,

    pub faculties: Vec<String>,

    pub departments: Vec<String>,

    pub excluded_levels: Vec<CourseLevel>,

    pub included_levels: Vec<CourseLevel>,

    pub academic_level: AcademicLevel,
}

impl CandidateQuery {
    /// Whether `course` satisfies every filter of the query.
    pub fn matches(&self, course: &Course) -> bool {
        self.included_ids.contains(&course.id)
            && !self.excluded_ids.contains(&course.id)
            && (self.faculties.is_empty() || self.faculties.contains(&course.faculty))
            && (self.departments.is_empty() || self.departments.contains(&course.department))
            && !self.excluded_levels.contains(&course.course_level)
            && (self.included_levels.is_empty()
                || self.included_levels.contains(&course.course_level))
            && self.academic_level.admits(course.academic_level)
    }
}

/// Read access to a course catalog.
///
/// Implementations report missing ids by leaving them out of the result and
/// report infrastructure failures as errors; the scheduler propagates those
/// errors unchanged.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// Batch lookup by id. Unknown ids are simply absent from the result.
    async fn fetch_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>>;

    /// Filtered candidate search used for backfill.
    async fn fetch_candidates(&self, query: &CandidateQuery) -> Result<Vec<Course>>;
}

#[async_trait]
impl<'a, T: CourseCatalog + ?Sized> CourseCatalog for &'a T {
    async fn fetch_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>> {
        (**self).fetch_by_ids(ids).await
    }

    async fn fetch_candidates(&self, query: &CandidateQuery) -> Result<Vec<Course>> {
        (**self).fetch_candidates(query).await
    }
}

#[async_trait]
impl<T: CourseCatalog + ?Sized> CourseCatalog for Arc<T> {
    async fn fetch_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>> {
        (**self).fetch_by_ids(ids).await
    }

    async fn fetch_candidates(&self, query: &CandidateQuery) -> Result<Vec<Course>> {
        (**self).fetch_candidates(query).await
    }
}

// Compile-time assertion: the gateway can be used as `dyn CourseCatalog`.
const _: () = {
    fn _assert_object_safe(_: &dyn CourseCatalog) {}
};

/// A catalog held entirely in memory, keyed by course id.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    courses: BTreeMap<CourseId, Course>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a course.
    pub fn insert(&mut self, course: Course) {
        self.courses.insert(course.id.clone(), course);
    }

    pub fn get(&self, id: &CourseId) -> Option<&Course> {
        self.courses.get(id)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl FromIterator<Course> for MemoryCatalog {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for course in iter {
            catalog.insert(course);
        }
        catalog
    }
}

#[async_trait]
impl CourseCatalog for MemoryCatalog {
    async fn fetch_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.courses.get(id))
            .cloned()
            .collect())
    }

    async fn fetch_candidates(&self, query: &CandidateQuery) -> Result<Vec<Course>> {
        Ok(self
            .courses
            .values()
            .filter(|course| query.matches(course))
            .cloned()
            .collect())
    }
}
