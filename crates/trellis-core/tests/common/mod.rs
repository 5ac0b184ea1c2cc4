#![allow(dead_code)]

use trellis_core::{
    AcademicLevel, Course, CourseId, CourseLevel, MemoryCatalog, Planner, PlannerBuilder,
    models::Requisite,
};
use tempfile::TempDir;

/// Builder for catalog records used across the integration tests.
#[derive(Debug, Clone)]
pub struct CourseFixture(Course);

impl CourseFixture {
    /// A 3-credit undergraduate Science course whose level follows its id.
    pub fn new(id: &str) -> Self {
        let id = CourseId::from(id);
        let course_level = id
            .suffix()
            .chars()
            .next()
            .and_then(CourseLevel::from_digit)
            .unwrap_or(CourseLevel::Level000);
        Self(Course {
            name: format!("{} course", id.as_str().to_uppercase()),
            id,
            credits: 3.0,
            faculty: "Science".to_string(),
            department: "Computer Science".to_string(),
            course_level,
            academic_level: AcademicLevel::Ugrad,
            prerequisites: Requisite::default(),
            corequisites: Requisite::default(),
            restrictions: Requisite::default(),
            future_courses: Vec::new(),
            overview: None,
            terms: Vec::new(),
        })
    }

    pub fn credits(mut self, credits: f64) -> Self {
        self.0.credits = credits;
        self
    }

    pub fn department(mut self, department: &str) -> Self {
        self.0.department = department.to_string();
        self
    }

    pub fn prerequisites(mut self, parsed: &str) -> Self {
        self.0.prerequisites = Requisite::parsed(parsed);
        self
    }

    pub fn corequisites(mut self, parsed: &str) -> Self {
        self.0.corequisites = Requisite::parsed(parsed);
        self
    }

    pub fn restrictions(mut self, parsed: &str) -> Self {
        self.0.restrictions = Requisite::parsed(parsed);
        self
    }

    pub fn unlocks(mut self, ids: &[&str]) -> Self {
        self.0.future_courses = ids.iter().map(|id| CourseId::from(*id)).collect();
        self
    }

    pub fn academic_level(mut self, level: AcademicLevel) -> Self {
        self.0.academic_level = level;
        self
    }

    pub fn build(self) -> Course {
        self.0
    }
}

pub fn catalog(fixtures: Vec<CourseFixture>) -> MemoryCatalog {
    fixtures.into_iter().map(CourseFixture::build).collect()
}

/// Ids of one term, in placement order.
pub fn term_ids(plan: &trellis_core::Plan, index: usize) -> Vec<String> {
    plan.terms[index]
        .course_ids
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("catalog.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}
