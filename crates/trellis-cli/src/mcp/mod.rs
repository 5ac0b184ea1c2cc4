//! MCP server implementation for trellis
//!
//! Exposes plan generation and catalog lookups to AI assistants over the
//! Model Context Protocol on stdio.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};
use trellis_core::Planner;

pub mod errors;
pub mod handlers;

pub use handlers::{BuildPlan, CourseRef, ListCourses, McpResult};

const INSTRUCTIONS: &str = r#"Trellis builds semester-by-semester course plans from a course catalog.

## Tools
- `generate_base_plan`: place required and elective courses into terms. Prerequisites always land in an earlier term, corequisites share a term where possible, and courses whose antirequisites are already planned are reported as unplannable. Each term stays within `per_term_credits` (default 15). When the requested courses fall short of `target_credits`, one round of courses they unlock is added, filtered by `faculties`, `departments`, `course_levels` and `academic_level`.
- `show_course`: one catalog record with its raw and parsed requisites.
- `list_courses`: catalog courses, optionally filtered by faculty, department or level.

## Reading a plan
Terms are keyed `term_1`, `term_2`, ... in order. The `notes` object lists unknown course ids, unplannable courses with the conflicting antirequisites, and credit requirements (such as "6 credits of 300-level COMP") that the scheduler did not check.

Course ids are case- and whitespace-insensitive: "COMP 250" and "comp250" are the same course."#;

/// MCP server exposing the trellis planner
#[derive(Clone)]
pub struct TrellisMcpServer {
    planner: Arc<Planner>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TrellisMcpServer {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(planner),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(Arc::clone(&self.planner))
    }

    #[tool(
        name = "generate_base_plan",
        description = "Generate a term-by-term course plan. Requires required_course_ids and target_credits; optional complementary_course_ids, per_term_credits (default 15), and backfill filters faculties, departments, course_levels (\"300\"), academic_level (UGRAD, GRAD or ALL). Returns the plan as JSON followed by a markdown rendering. Unknown ids and antirequisite conflicts are reported in the plan notes, not as errors."
    )]
    async fn generate_base_plan(&self, params: Parameters<BuildPlan>) -> McpResult {
        self.handlers().generate_base_plan(params).await
    }

    #[tool(
        name = "show_course",
        description = "Show one catalog course by id (e.g. \"COMP 250\"): name, credits, faculty, department, levels, raw and parsed prerequisites, corequisites and restrictions, and the courses it unlocks."
    )]
    async fn show_course(&self, params: Parameters<CourseRef>) -> McpResult {
        self.handlers().show_course(params).await
    }

    #[tool(
        name = "list_courses",
        description = "List catalog courses ordered by id. Optional filters: faculty, department, course_level (\"000\" to \"900\")."
    )]
    async fn list_courses(&self, params: Parameters<ListCourses>) -> McpResult {
        self.handlers().list_courses(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for TrellisMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "trellis".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport until the client disconnects or a
/// termination signal arrives.
pub async fn run_stdio_server(server: TrellisMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
