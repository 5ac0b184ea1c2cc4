//! Trellis CLI Application
//!
//! Command-line interface and MCP server for the trellis term planner.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, TrellisMcpServer};
use renderer::TerminalRenderer;
use trellis_core::{params::ListCourses, PlannerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args { database_file, no_color, command } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize planner")?;

    info!("catalog at {}", planner.database_path().display());

    let renderer = TerminalRenderer::new(!no_color);

    match command {
        Some(Course { command }) => {
            Cli::new(planner, renderer)
                .handle_course_command(command)
                .await
        }
        Some(Plan { command }) => {
            Cli::new(planner, renderer)
                .handle_plan_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting trellis MCP server");
            run_stdio_server(TrellisMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(planner, renderer)
                .list_courses(&ListCourses::default())
                .await
        }
    }
}
