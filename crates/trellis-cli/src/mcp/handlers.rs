//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use trellis_core::{params as core, Planner};

use super::errors::to_mcp_error;

// ============================================================================
// Generic Parameter Wrapper
// ============================================================================
//
// Core parameter types already derive `JsonSchema` through the `schema`
// feature; the wrapper gives rmcp a transparent deserialisation target so the
// tool schema is exactly the core type's schema.

/// Transparent MCP wrapper around a core parameter type.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type BuildPlan = McpParams<core::BuildPlan>;
pub type CourseRef = McpParams<core::CourseRef>;
pub type ListCourses = McpParams<core::ListCourses>;

pub type McpResult = Result<CallToolResult, ErrorData>;

/// Tool implementations backing [`super::TrellisMcpServer`].
pub struct McpHandlers {
    planner: Arc<Planner>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Planner>) -> Self {
        Self { planner }
    }

    /// Returns the plan twice: as JSON for programmatic use and as markdown.
    pub async fn generate_base_plan(&self, Parameters(params): Parameters<BuildPlan>) -> McpResult {
        debug!("generate_base_plan: {:?}", params);

        let plan = self
            .planner
            .generate_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to generate plan", &e))?;

        let json = serde_json::to_string_pretty(&plan)
            .map_err(|e| ErrorData::internal_error(format!("Failed to serialize plan: {e}"), None))?;

        Ok(CallToolResult::success(vec![
            Content::text(json),
            Content::text(plan.to_string()),
        ]))
    }

    pub async fn show_course(&self, Parameters(params): Parameters<CourseRef>) -> McpResult {
        debug!("show_course: {:?}", params);

        let details = self
            .planner
            .show_course(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to show course", &e))?;

        Ok(CallToolResult::success(vec![Content::text(
            details.to_string(),
        )]))
    }

    pub async fn list_courses(&self, Parameters(params): Parameters<ListCourses>) -> McpResult {
        debug!("list_courses: {:?}", params);

        let courses = self
            .planner
            .list_courses(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list courses", &e))?;

        Ok(CallToolResult::success(vec![Content::text(
            format!("# Courses\n\n{courses}"),
        )]))
    }
}
