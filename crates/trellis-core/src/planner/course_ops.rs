//! Catalog maintenance operations for the Planner.

use log::info;
use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    display::{CourseDetails, Courses},
    error::{PlannerError, Result},
    models::Course,
    params::{CourseRef, ListCourses},
};

impl Planner {
    /// Inserts or replaces catalog records. Returns the number written.
    pub async fn import_courses(&self, courses: Vec<Course>) -> Result<usize> {
        if let Some(course) = courses.iter().find(|course| course.id.is_empty()) {
            return Err(PlannerError::invalid_input("id")
                .with_reason(format!("Course '{}' has an empty id", course.name)));
        }
        if let Some(course) = courses
            .iter()
            .find(|course| !course.credits.is_finite() || course.credits < 0.0)
        {
            return Err(PlannerError::invalid_input("credits").with_reason(format!(
                "Course {} has invalid credits: {}",
                course.id, course.credits
            )));
        }

        let db_path = self.db_path.clone();
        let written = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.upsert_courses(&courses)
        })
        .await
        .map_err(PlannerError::join)??;

        info!("imported {written} courses");
        Ok(written)
    }

    /// Retrieves a course by id.
    pub async fn get_course(&self, params: &CourseRef) -> Result<Option<Course>> {
        let db_path = self.db_path.clone();
        let id = params.course_id();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_course(&id)
        })
        .await
        .map_err(PlannerError::join)?
    }

    /// Retrieves a course with its catalog metadata for display.
    ///
    /// # Errors
    ///
    /// * `PlannerError::CourseNotFound` - When the id is not in the catalog
    pub async fn show_course(&self, params: &CourseRef) -> Result<CourseDetails> {
        let db_path = self.db_path.clone();
        let id = params.course_id();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let course = db
                .get_course(&id)?
                .ok_or_else(|| PlannerError::CourseNotFound {
                    id: id.to_string(),
                })?;
            let updated_at = db.course_updated_at(&id)?;
            Ok(CourseDetails { course, updated_at })
        })
        .await
        .map_err(PlannerError::join)?
    }

    /// Lists catalog courses ordered by id.
    pub async fn list_courses(&self, params: &ListCourses) -> Result<Courses> {
        let db_path = self.db_path.clone();
        let filter = params.clone();

        let courses = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_courses(&filter)
        })
        .await
        .map_err(PlannerError::join)??;

        Ok(Courses(courses))
    }

    /// Removes a course from the catalog.
    ///
    /// # Errors
    ///
    /// * `PlannerError::CourseNotFound` - When the id is not in the catalog
    pub async fn remove_course(&self, params: &CourseRef) -> Result<()> {
        let db_path = self.db_path.clone();
        let id = params.course_id();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            if db.delete_course(&id)? {
                Ok(())
            } else {
                Err(PlannerError::CourseNotFound { id: id.to_string() })
            }
        })
        .await
        .map_err(PlannerError::join)?
    }

    /// Number of courses in the catalog.
    pub async fn count_courses(&self) -> Result<u64> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.count_courses()
        })
        .await
        .map_err(PlannerError::join)?
    }
}
