//! Requisite text attached to catalog records.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::CourseLevel;

/// A prerequisite, corequisite or restriction clause.
///
/// `raw` is the text shown to students; `parsed` is the catalog's normalised
/// form (lower-case course ids joined by `+ | - ( ) /` operators, plus credit
/// clauses such as `6-34-comp-math`) consumed by [`crate::requisite::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requisite {
    #[serde(default)]
    pub raw: String,
    #[serde(default)]
    pub parsed: String,
}

impl Requisite {
    pub fn new(raw: impl Into<String>, parsed: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            parsed: parsed.into(),
        }
    }

    /// A requisite whose raw and parsed forms are the same text.
    pub fn parsed(parsed: impl Into<String>) -> Self {
        let parsed = parsed.into();
        Self {
            raw: parsed.clone(),
            parsed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parsed.trim().is_empty()
    }
}

/// An aggregate requirement not tied to specific courses, e.g. "6 credits of
/// 300- or 400-level COMP or MATH courses".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditGroup {
    pub credits_requirement: u32,
    pub course_levels: BTreeSet<CourseLevel>,
    pub subject_codes: BTreeSet<String>,
}
