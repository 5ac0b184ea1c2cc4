//! Core library for the trellis term planner.
//!
//! Trellis turns a list of required and elective courses into a
//! semester-by-semester plan that respects prerequisites, corequisites,
//! antirequisites and a per-term credit cap. The crate provides:
//!
//! - [`requisite`]: the parser for catalog requisite strings
//! - [`scheduler`]: the plan builder, generic over a [`CourseCatalog`]
//! - [`catalog`] and [`db`]: the catalog gateway with in-memory and SQLite
//!   implementations
//! - [`planner`]: the async facade used by the CLI and MCP server
//! - [`display`]: markdown rendering of catalog records and plans
//!
//! # Quick Start
//!
//! ```rust
//! use trellis_core::{
//!     catalog::MemoryCatalog,
//!     models::{AcademicLevel, Course, CourseId, CourseLevel, Requisite},
//!     params::BuildPlan,
//!     scheduler::Scheduler,
//! };
//!
//! # async fn example() -> trellis_core::Result<()> {
//! let course = |id: &str, prerequisites: &str| Course {
//!     id: CourseId::from(id),
//!     name: id.to_uppercase(),
//!     credits: 3.0,
//!     faculty: "Science".into(),
//!     department: "Computer Science".into(),
//!     course_level: CourseLevel::Level200,
//!     academic_level: AcademicLevel::Ugrad,
//!     prerequisites: Requisite::parsed(prerequisites),
//!     corequisites: Requisite::default(),
//!     restrictions: Requisite::default(),
//!     future_courses: Vec::new(),
//!     overview: None,
//!     terms: Vec::new(),
//! };
//!
//! let catalog: MemoryCatalog = [course("comp202", ""), course("comp250", "comp202")]
//!     .into_iter()
//!     .collect();
//!
//! let plan = Scheduler::new(catalog)
//!     .build(&BuildPlan::new(["comp202", "comp250"], 6))
//!     .await?;
//! assert_eq!(plan.terms.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod planner;
pub mod requisite;
pub mod scheduler;

pub use catalog::{CandidateQuery, CourseCatalog, MemoryCatalog};
pub use db::{Database, SqliteCatalog};
pub use display::{CourseDetails, Courses, ImportResult, LocalDateTime};
pub use error::{PlannerError, Result};
pub use models::{AcademicLevel, Course, CourseId, CourseLevel, Plan, PlanNotes, Term};
pub use params::{BuildPlan, CourseRef, ListCourses};
pub use planner::{Planner, PlannerBuilder};
pub use scheduler::Scheduler;
