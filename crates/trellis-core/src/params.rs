//! Parameter structures for trellis operations
//!
//! These structures are shared by every interface (CLI, MCP) and carry only
//! serde derives, plus `JsonSchema` when the `schema` feature is enabled.
//! Interface layers wrap or convert into them:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! The field names of [`BuildPlan`] are the planning tool's request contract
//! and must not change.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    models::{AcademicLevel, CourseId, CourseLevel},
    scheduler::DEFAULT_PER_TERM_CREDITS,
    PlannerError, Result,
};

fn default_per_term_credits() -> u32 {
    DEFAULT_PER_TERM_CREDITS
}

/// Parameters for generating a base plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct BuildPlan {
    /// Course ids the program requires, e.g. `["comp202", "comp250"]`
    pub required_course_ids: Vec<CourseId>,

    /// Elective course ids the student picked
    #[serde(default)]
    pub complementary_course_ids: Vec<CourseId>,

    /// Stop scheduling once the plan reaches this many credits
    pub target_credits: u32,

    /// Faculties backfill candidates may come from; empty means any
    #[serde(default)]
    pub faculties: Vec<String>,

    /// Departments backfill candidates may come from; empty means any
    #[serde(default)]
    pub departments: Vec<String>,

    /// Credit cap per term
    #[serde(default = "default_per_term_credits")]
    pub per_term_credits: u32,

    /// Course levels backfill candidates may have; empty means any
    #[serde(default)]
    pub course_levels: Vec<CourseLevel>,

    /// Academic level of the program
    #[serde(default)]
    pub academic_level: AcademicLevel,
}

impl Default for BuildPlan {
    fn default() -> Self {
        Self {
            required_course_ids: Vec::new(),
            complementary_course_ids: Vec::new(),
            target_credits: 0,
            faculties: Vec::new(),
            departments: Vec::new(),
            per_term_credits: DEFAULT_PER_TERM_CREDITS,
            course_levels: Vec::new(),
            academic_level: AcademicLevel::default(),
        }
    }
}

impl BuildPlan {
    /// A request for the given required courses and credit target, with
    /// defaults for everything else.
    pub fn new<I, S>(required_course_ids: I, target_credits: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CourseId>,
    {
        Self {
            required_course_ids: required_course_ids.into_iter().map(Into::into).collect(),
            target_credits,
            ..Self::default()
        }
    }

    /// Checks the request before any catalog access.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When `per_term_credits` is zero
    pub fn validate(&self) -> Result<()> {
        if self.per_term_credits == 0 {
            return Err(PlannerError::invalid_input("per_term_credits")
                .with_reason("Per-term credit cap must be greater than zero"));
        }
        Ok(())
    }

    /// Required and complementary ids combined, without empties or repeats,
    /// in first-seen order.
    pub fn requested_course_ids(&self) -> Vec<CourseId> {
        let mut seen = std::collections::BTreeSet::new();
        self.required_course_ids
            .iter()
            .chain(self.complementary_course_ids.iter())
            .filter(|id| !id.is_empty() && seen.insert((*id).clone()))
            .cloned()
            .collect()
    }
}

/// Parameters for operations on a single course.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CourseRef {
    /// Course id; case and whitespace are ignored (`"COMP 250"`)
    pub id: String,
}

impl CourseRef {
    pub fn course_id(&self) -> CourseId {
        CourseId::normalize(&self.id)
    }
}

/// Parameters for listing catalog courses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListCourses {
    /// Only courses of this faculty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,

    /// Only courses of this department
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    /// Only courses at this level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_level: Option<CourseLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_plan_defaults_from_json() {
        let params: BuildPlan = serde_json::from_str(
            r#"{"required_course_ids": ["COMP 202", "comp250"], "target_credits": 6}"#,
        )
        .unwrap();

        assert_eq!(params.per_term_credits, DEFAULT_PER_TERM_CREDITS);
        assert_eq!(params.academic_level, AcademicLevel::Ugrad);
        assert!(params.faculties.is_empty());
        assert_eq!(params.required_course_ids[0].as_str(), "comp202");
    }

    #[test]
    fn test_build_plan_full_request_from_json() {
        let params: BuildPlan = serde_json::from_str(
            r#"{
                "required_course_ids": ["comp202"],
                "complementary_course_ids": ["math240"],
                "target_credits": 30,
                "faculties": ["Science"],
                "departments": ["Computer Science"],
                "per_term_credits": 12,
                "course_levels": ["300", "400"],
                "academic_level": "ALL"
            }"#,
        )
        .unwrap();

        assert_eq!(params.per_term_credits, 12);
        assert_eq!(
            params.course_levels,
            vec![CourseLevel::Level300, CourseLevel::Level400]
        );
        assert_eq!(params.academic_level, AcademicLevel::All);
    }

    #[test]
    fn test_validate_rejects_zero_cap() {
        let mut params = BuildPlan::new(["comp202"], 3);
        assert!(params.validate().is_ok());

        params.per_term_credits = 0;
        let error = params.validate().unwrap_err();
        assert!(error.is_invalid_input());
        assert!(error.to_string().contains("per_term_credits"));
    }

    #[test]
    fn test_requested_ids_are_deduplicated() {
        let mut params = BuildPlan::new(["comp250", "COMP250", "comp202", ""], 9);
        params.complementary_course_ids = vec![CourseId::from("comp202"), CourseId::from("math240")];

        let ids: Vec<String> = params
            .requested_course_ids()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(ids, vec!["comp250", "comp202", "math240"]);
    }

    #[test]
    fn test_course_ref_normalises() {
        let params = CourseRef {
            id: " Comp 302 ".to_string(),
        };
        assert_eq!(params.course_id().as_str(), "comp302");
    }
}
