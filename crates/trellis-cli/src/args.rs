use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{CourseCommands, PlanCommands};

/// Trellis: semester-by-semester course plans from a course catalog
///
/// Trellis keeps a local SQLite course catalog and generates term plans that
/// respect prerequisites, corequisites, antirequisites and a per-term credit
/// cap. The same operations are available to AI assistants through the MCP
/// server started with `trellis serve`.
#[derive(Parser)]
#[command(version, about, name = "trellis")]
pub struct Args {
    /// Path to the SQLite catalog file. Defaults to
    /// $XDG_DATA_HOME/trellis/catalog.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the trellis CLI
///
/// - `course`: catalog maintenance (import, show, list, remove)
/// - `plan`: plan generation
/// - `serve`: start the MCP server for AI assistant integration
#[derive(Subcommand)]
pub enum Commands {
    /// Manage the course catalog
    #[command(alias = "c")]
    Course {
        #[command(subcommand)]
        command: CourseCommands,
    },
    /// Generate term plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Start the MCP server
    Serve,
}
