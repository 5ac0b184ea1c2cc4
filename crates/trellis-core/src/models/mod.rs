//! Data models for courses, requisites and term plans.
//!
//! Catalog records ([`Course`]) are produced by a catalog gateway and are
//! read-only to the scheduler. Plans ([`Plan`], [`Term`]) are produced by the
//! scheduler and serialised verbatim as the planning tool's result, so their
//! field names are a compatibility contract:
//!
//! ```json
//! {
//!   "terms": {
//!     "term_1": { "id": "term_1", "name": "Term 1", "course_ids": ["comp202"], "total_credits": 3.0 }
//!   },
//!   "notes": {},
//!   "total_credits": 3.0
//! }
//! ```
//!
//! Display implementations for these models live in
//! [`crate::display::models`].

pub mod course;
pub mod level;
pub mod plan;
pub mod requisite;

#[cfg(test)]
mod tests;

pub use course::{Course, CourseId};
pub use level::{AcademicLevel, CourseLevel};
pub use plan::{Plan, PlanNotes, Term};
pub use requisite::{CreditGroup, Requisite};
