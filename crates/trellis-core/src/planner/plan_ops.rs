//! Plan generation for the Planner.

use super::Planner;
use crate::{error::Result, models::Plan, params::BuildPlan, scheduler::Scheduler};

impl Planner {
    /// Generates a base plan against the catalog.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the request fails validation
    /// * `PlannerError::Database` - When the catalog cannot be read
    pub async fn generate_plan(&self, params: &BuildPlan) -> Result<Plan> {
        Scheduler::new(self.catalog()).build(params).await
    }
}
