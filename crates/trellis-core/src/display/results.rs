//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use jiff::Timestamp;

use crate::models::Course;

/// A catalog record together with when it was last written.
#[derive(Debug, Clone)]
pub struct CourseDetails {
    pub course: Course,
    pub updated_at: Option<Timestamp>,
}

impl fmt::Display for CourseDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.course.fmt_course(f, self.updated_at.as_ref())
    }
}

/// Outcome of a catalog import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportResult {
    pub imported: usize,
    pub total: u64,
}

impl fmt::Display for ImportResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Imported {} courses. The catalog now holds {} courses.",
            self.imported, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_result_display() {
        let result = ImportResult {
            imported: 2,
            total: 10,
        };
        assert_eq!(
            result.to_string(),
            "Imported 2 courses. The catalog now holds 10 courses.\n"
        );
    }
}
