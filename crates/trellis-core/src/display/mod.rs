//! Display formatting for catalog and plan output.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds newtype wrappers for collections and operation results so
//! the same data can be rendered in different contexts. Every formatter emits
//! markdown, which the CLI renders with termimad and the MCP server returns
//! as text.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │   Formatted     │
//! │ (Course, Plan)  │───▶│ (Courses, ...)  │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: catalog listings ([`Courses`])
//! - [`results`]: operation results ([`CourseDetails`], [`ImportResult`])
//! - [`datetime`]: timestamp formatting
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::Courses;
pub use datetime::LocalDateTime;
pub use results::{CourseDetails, ImportResult};
