//! Course and academic level enumerations.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Hundred-level bucket of a course (`300` for `comp302`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum CourseLevel {
    #[serde(rename = "000")]
    Level000,
    #[serde(rename = "100")]
    Level100,
    #[serde(rename = "200")]
    Level200,
    #[serde(rename = "300")]
    Level300,
    #[serde(rename = "400")]
    Level400,
    #[serde(rename = "500")]
    Level500,
    #[serde(rename = "600")]
    Level600,
    #[serde(rename = "700")]
    Level700,
    #[serde(rename = "800")]
    Level800,
    #[serde(rename = "900")]
    Level900,
}

impl CourseLevel {
    pub const ALL: [CourseLevel; 10] = [
        CourseLevel::Level000,
        CourseLevel::Level100,
        CourseLevel::Level200,
        CourseLevel::Level300,
        CourseLevel::Level400,
        CourseLevel::Level500,
        CourseLevel::Level600,
        CourseLevel::Level700,
        CourseLevel::Level800,
        CourseLevel::Level900,
    ];

    /// Maps a single level digit (`'3'`) to its bucket.
    pub fn from_digit(digit: char) -> Option<Self> {
        digit
            .to_digit(10)
            .and_then(|d| Self::ALL.get(d as usize).copied())
    }

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Level000 => "000",
            CourseLevel::Level100 => "100",
            CourseLevel::Level200 => "200",
            CourseLevel::Level300 => "300",
            CourseLevel::Level400 => "400",
            CourseLevel::Level500 => "500",
            CourseLevel::Level600 => "600",
            CourseLevel::Level700 => "700",
            CourseLevel::Level800 => "800",
            CourseLevel::Level900 => "900",
        }
    }
}

impl FromStr for CourseLevel {
    type Err = String;

    /// Accepts either the bucket (`"300"`) or its leading digit (`"3"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let valid = s.len() == 1 || (s.len() == 3 && s.ends_with("00"));
        s.chars()
            .next()
            .filter(|_| valid)
            .and_then(Self::from_digit)
            .ok_or_else(|| format!("Invalid course level: {s}"))
    }
}

/// Academic level of a course or of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum AcademicLevel {
    /// Open to both undergraduate and graduate students
    All,

    /// Undergraduate
    #[default]
    Ugrad,

    /// Graduate
    Grad,
}

impl AcademicLevel {
    /// Whether a course at `course_level` is visible to a request at `self`.
    ///
    /// `All` on either side matches anything.
    pub fn admits(&self, course_level: AcademicLevel) -> bool {
        matches!(self, AcademicLevel::All)
            || matches!(course_level, AcademicLevel::All)
            || *self == course_level
    }

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AcademicLevel::All => "ALL",
            AcademicLevel::Ugrad => "UGRAD",
            AcademicLevel::Grad => "GRAD",
        }
    }
}

impl FromStr for AcademicLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(AcademicLevel::All),
            "ugrad" | "undergraduate" => Ok(AcademicLevel::Ugrad),
            "grad" | "graduate" => Ok(AcademicLevel::Grad),
            _ => Err(format!("Invalid academic level: {s}")),
        }
    }
}
