//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::Course;

/// Newtype wrapper for displaying a catalog listing.
///
/// Each course renders as one compact line; an empty listing renders a
/// placeholder message.
///
/// ```rust
/// use trellis_core::{display::Courses, models::Course};
///
/// let course: Course = serde_json::from_str(
///     r#"{"id": "comp250", "name": "Intro to CS", "credits": 3.0,
///         "faculty": "Science", "department": "Computer Science",
///         "courseLevel": "200", "academicLevel": "UGRAD"}"#,
/// ).unwrap();
///
/// let output = Courses(vec![course]).to_string();
/// assert!(output.contains("**comp250** Intro to CS"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Courses(pub Vec<Course>);

impl Courses {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Course> {
        self.0.iter()
    }
}

impl Index<usize> for Courses {
    type Output = Course;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Courses {
    type Item = Course;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Courses {
    type Item = &'a Course;
    type IntoIter = std::slice::Iter<'a, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Courses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No courses found.");
        }

        for course in &self.0 {
            writeln!(
                f,
                "- **{}** {} ({} credits, {} level)",
                course.id, course.name, course.credits, course.course_level
            )?;
        }
        Ok(())
    }
}
