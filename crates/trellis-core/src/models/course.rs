//! Course identifiers and catalog records.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

use super::{AcademicLevel, CourseLevel, Requisite};

/// Canonical course identifier, e.g. `comp250` or `math133d1`.
///
/// Always lower-case with whitespace removed and capped at the catalog's
/// identifier width. The first four characters are the subject code; the rest
/// is the level/number suffix that drives plan ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CourseId(String);

impl CourseId {
    /// Width of identifiers in the catalog.
    pub const MAX_LEN: usize = 10;

    /// Length of the subject code prefix.
    pub const SUBJECT_LEN: usize = 4;

    /// Normalises free text (`"COMP 250"`) into a canonical id (`comp250`).
    pub fn normalize(raw: &str) -> Self {
        Self(
            raw.chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .take(Self::MAX_LEN)
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn split_index(&self) -> usize {
        self.0
            .char_indices()
            .nth(Self::SUBJECT_LEN)
            .map_or(self.0.len(), |(index, _)| index)
    }

    /// The four-letter subject code (`comp` for `comp250`).
    pub fn subject_code(&self) -> &str {
        &self.0[..self.split_index()]
    }

    /// Everything after the subject code (`250` for `comp250`).
    pub fn suffix(&self) -> &str {
        &self.0[self.split_index()..]
    }

    /// Ordering key used for every scheduling queue.
    ///
    /// Orders by suffix first so that courses interleave by level across
    /// subjects; the full id breaks ties between equal suffixes.
    pub fn sort_key(&self) -> (&str, &str) {
        (self.suffix(), &self.0)
    }
}

impl From<String> for CourseId {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl From<&str> for CourseId {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl From<CourseId> for String {
    fn from(id: CourseId) -> Self {
        id.0
    }
}

impl AsRef<str> for CourseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CourseId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "schema")]
impl schemars::JsonSchema for CourseId {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "CourseId".into()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        String::json_schema(g)
    }
}

/// A course record as returned by the catalog gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,

    pub name: String,

    /// Credit weight; fractional values occur for split courses
    pub credits: f64,

    pub faculty: String,

    pub department: String,

    pub course_level: CourseLevel,

    pub academic_level: AcademicLevel,

    #[serde(default)]
    pub prerequisites: Requisite,

    #[serde(default)]
    pub corequisites: Requisite,

    /// Antirequisites: courses that must never appear in the same plan
    #[serde(default)]
    pub restrictions: Requisite,

    /// Courses that list this one as a prerequisite
    #[serde(default)]
    pub future_courses: Vec<CourseId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,

    /// Terms the course is offered in (e.g. "Fall 2024")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub terms: Vec<String>,
}
