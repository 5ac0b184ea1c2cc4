//! Command definitions and handlers for the trellis CLI
//!
//! Argument structs carry the clap derives and convert into the core
//! parameter types, so `trellis-core` stays free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```

use std::{fs, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use log::debug;
use trellis_core::{
    display::ImportResult,
    models::{AcademicLevel, Course, CourseId, CourseLevel},
    params::{BuildPlan, CourseRef, ListCourses},
    scheduler::DEFAULT_PER_TERM_CREDITS,
    Planner,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Course commands
// ============================================================================

#[derive(Subcommand)]
pub enum CourseCommands {
    /// Import catalog records from a JSON file
    #[command(alias = "i")]
    Import(ImportCoursesArgs),
    /// Show one course with its requisites
    #[command(alias = "s")]
    Show(CourseArgs),
    /// List catalog courses
    #[command(aliases = ["l", "ls"])]
    List(ListCoursesArgs),
    /// Remove a course from the catalog
    #[command(alias = "rm")]
    Remove(CourseArgs),
}

/// Import catalog records
///
/// The file holds a JSON array of course records (camelCase keys, as
/// produced by the catalog export). Existing records with the same id are
/// replaced.
#[derive(Args)]
pub struct ImportCoursesArgs {
    /// Path to the JSON file
    pub file: PathBuf,
}

#[derive(Args)]
pub struct CourseArgs {
    /// Course id, e.g. COMP250 or "comp 250"
    pub id: String,
}

impl From<CourseArgs> for CourseRef {
    fn from(val: CourseArgs) -> Self {
        CourseRef { id: val.id }
    }
}

#[derive(Args, Default)]
pub struct ListCoursesArgs {
    /// Only courses of this faculty
    #[arg(long)]
    pub faculty: Option<String>,
    /// Only courses of this department
    #[arg(long)]
    pub department: Option<String>,
    /// Only courses at this level (3 or 300)
    #[arg(long, value_parser = CourseLevel::from_str)]
    pub level: Option<CourseLevel>,
}

impl From<ListCoursesArgs> for ListCourses {
    fn from(val: ListCoursesArgs) -> Self {
        ListCourses {
            faculty: val.faculty,
            department: val.department,
            course_level: val.level,
        }
    }
}

// ============================================================================
// Plan commands
// ============================================================================

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Generate a base plan from required and elective courses
    #[command(alias = "g")]
    Generate(GeneratePlanArgs),
}

/// Generate a base plan
///
/// Courses are placed term by term until the credit target is reached. If the
/// requested courses fall short, one round of courses they unlock is added.
#[derive(Args)]
pub struct GeneratePlanArgs {
    /// Required course ids (comma separated or repeated)
    #[arg(short, long, value_delimiter = ',', num_args = 1..)]
    pub required: Vec<String>,

    /// Elective course ids (comma separated or repeated)
    #[arg(short, long, value_delimiter = ',', num_args = 1..)]
    pub complementary: Vec<String>,

    /// Credit target for the plan
    #[arg(short, long)]
    pub target: u32,

    /// Faculties backfill courses may come from
    #[arg(long, value_delimiter = ',')]
    pub faculty: Vec<String>,

    /// Departments backfill courses may come from
    #[arg(long, value_delimiter = ',')]
    pub department: Vec<String>,

    /// Credit cap per term
    #[arg(long, default_value_t = DEFAULT_PER_TERM_CREDITS)]
    pub per_term: u32,

    /// Course levels backfill courses may have (3 or 300)
    #[arg(long, value_delimiter = ',', value_parser = CourseLevel::from_str)]
    pub level: Vec<CourseLevel>,

    /// Academic level of the program: ugrad, grad or all
    #[arg(long, default_value = "ugrad", value_parser = AcademicLevel::from_str)]
    pub academic_level: AcademicLevel,

    /// Print the plan as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl From<GeneratePlanArgs> for BuildPlan {
    fn from(val: GeneratePlanArgs) -> Self {
        BuildPlan {
            required_course_ids: val.required.into_iter().map(CourseId::from).collect(),
            complementary_course_ids: val.complementary.into_iter().map(CourseId::from).collect(),
            target_credits: val.target,
            faculties: val.faculty,
            departments: val.department,
            per_term_credits: val.per_term,
            course_levels: val.level,
            academic_level: val.academic_level,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs CLI commands against a planner and renders their output.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_course_command(&self, command: CourseCommands) -> Result<()> {
        match command {
            CourseCommands::Import(args) => self.import_courses(args).await,
            CourseCommands::Show(args) => {
                let details = self
                    .planner
                    .show_course(&args.into())
                    .await
                    .context("Failed to show course")?;
                self.renderer.render(&details.to_string())
            }
            CourseCommands::List(args) => self.list_courses(&args.into()).await,
            CourseCommands::Remove(args) => {
                let params: CourseRef = args.into();
                self.planner
                    .remove_course(&params)
                    .await
                    .context("Failed to remove course")?;
                self.renderer
                    .render(&format!("Removed course {}.\n", params.course_id()))
            }
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Generate(args) => {
                let json = args.json;
                let params: BuildPlan = args.into();
                debug!("generating plan: {params:?}");

                let plan = self
                    .planner
                    .generate_plan(&params)
                    .await
                    .context("Failed to generate plan")?;

                if json {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?
                    );
                    Ok(())
                } else {
                    self.renderer.render(&plan.to_string())
                }
            }
        }
    }

    pub async fn list_courses(&self, params: &ListCourses) -> Result<()> {
        let courses = self
            .planner
            .list_courses(params)
            .await
            .context("Failed to list courses")?;
        self.renderer.render(&courses.to_string())
    }

    async fn import_courses(&self, args: ImportCoursesArgs) -> Result<()> {
        let text = fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        let courses: Vec<Course> = serde_json::from_str(&text)
            .with_context(|| format!("Invalid course records in {}", args.file.display()))?;

        let imported = self
            .planner
            .import_courses(courses)
            .await
            .context("Failed to import courses")?;
        let total = self
            .planner
            .count_courses()
            .await
            .context("Failed to count courses")?;

        self.renderer
            .render(&ImportResult { imported, total }.to_string())
    }
}
