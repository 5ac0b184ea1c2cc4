//! Display implementations for domain models.
//!
//! Every implementation produces markdown for the terminal renderer and the
//! MCP text responses.

use std::fmt;

use jiff::Timestamp;

use super::datetime::LocalDateTime;
use crate::models::{AcademicLevel, Course, CourseLevel, CreditGroup, Plan, PlanNotes, Requisite, Term};

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AcademicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CreditGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} credits", self.credits_requirement)?;
        if !self.course_levels.is_empty() {
            let levels: Vec<&str> = self.course_levels.iter().map(CourseLevel::as_str).collect();
            write!(f, " of {}-level", levels.join("/"))?;
        }
        if !self.subject_codes.is_empty() {
            let subjects: Vec<String> = self
                .subject_codes
                .iter()
                .map(|code| code.to_uppercase())
                .collect();
            write!(f, " {}", subjects.join("/"))?;
        }
        write!(f, " courses")
    }
}

impl Course {
    /// Shared layout for a course with or without catalog metadata.
    pub(crate) fn fmt_course(
        &self,
        f: &mut fmt::Formatter<'_>,
        updated_at: Option<&Timestamp>,
    ) -> fmt::Result {
        writeln!(f, "# {}: {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(f, "- Credits: {}", self.credits)?;
        if !self.faculty.is_empty() {
            writeln!(f, "- Faculty: {}", self.faculty)?;
        }
        if !self.department.is_empty() {
            writeln!(f, "- Department: {}", self.department)?;
        }
        writeln!(f, "- Level: {} ({})", self.course_level, self.academic_level)?;
        if !self.terms.is_empty() {
            writeln!(f, "- Offered: {}", self.terms.join(", "))?;
        }
        if let Some(updated_at) = updated_at {
            writeln!(f, "- Updated: {}", LocalDateTime(updated_at))?;
        }

        if let Some(overview) = &self.overview {
            writeln!(f)?;
            writeln!(f, "{overview}")?;
        }

        fmt_requisite(f, "Prerequisites", &self.prerequisites)?;
        fmt_requisite(f, "Corequisites", &self.corequisites)?;
        fmt_requisite(f, "Restrictions", &self.restrictions)?;

        if !self.future_courses.is_empty() {
            writeln!(f, "\n## Unlocks")?;
            writeln!(f)?;
            for id in &self.future_courses {
                writeln!(f, "- {id}")?;
            }
        }

        Ok(())
    }
}

fn fmt_requisite(f: &mut fmt::Formatter<'_>, heading: &str, requisite: &Requisite) -> fmt::Result {
    if requisite.raw.trim().is_empty() {
        return Ok(());
    }
    writeln!(f, "\n## {heading}")?;
    writeln!(f)?;
    writeln!(f, "{}", requisite.raw.trim())
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_course(f, None)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} ({} credits)", self.name, self.total_credits)?;
        writeln!(f)?;

        if self.course_ids.is_empty() {
            writeln!(f, "No courses scheduled.")?;
        }
        for id in &self.course_ids {
            writeln!(f, "- {id}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PlanNotes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.invalid_course_ids.is_empty() {
            writeln!(f, "### Unknown courses")?;
            writeln!(f)?;
            for id in &self.invalid_course_ids {
                writeln!(f, "- {id}")?;
            }
            writeln!(f)?;
        }

        if !self.unplannable_course.is_empty() {
            writeln!(f, "### Unplannable courses")?;
            writeln!(f)?;
            for (id, reason) in &self.unplannable_course {
                writeln!(f, "- {id}: {reason}")?;
            }
            writeln!(f)?;
        }

        if !self.unresolved_credit_groups.is_empty() {
            writeln!(f, "### Unchecked credit requirements")?;
            writeln!(f)?;
            for (id, groups) in &self.unresolved_credit_groups {
                let groups: Vec<String> = groups.iter().map(ToString::to_string).collect();
                writeln!(f, "- {id}: {}", groups.join("; "))?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Plan")?;
        writeln!(f)?;
        writeln!(f, "- Terms: {}", self.terms.len())?;
        writeln!(f, "- Courses: {}", self.course_count())?;
        writeln!(f, "- Total credits: {}", self.total_credits)?;

        for term in &self.terms {
            writeln!(f)?;
            write!(f, "{term}")?;
        }

        if !self.notes.is_empty() {
            writeln!(f, "\n## Notes")?;
            writeln!(f)?;
            write!(f, "{}", self.notes)?;
        }

        Ok(())
    }
}
