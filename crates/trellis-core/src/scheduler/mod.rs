//! Term-plan scheduler.
//!
//! [`Scheduler::build`] turns a [`BuildPlan`] request into a [`Plan`]:
//!
//! 1. the requested ids are fetched from the catalog in one batch; ids the
//!    catalog does not return are noted as invalid
//! 2. the found courses are ordered (see [`order_queue`]) and placed one at a
//!    time by [`PlanState::step`] until the credit target is reached
//! 3. if the queue runs dry first, one backfill round fetches courses unlocked
//!    by the scheduled ones and places them the same way
//!
//! The scheduler holds no state between builds and issues at most two catalog
//! calls per build.

mod ordering;
mod state;

#[cfg(test)]
mod tests;

use std::collections::{BTreeSet, VecDeque};

use log::{debug, info, warn};

pub use ordering::order_queue;
pub use state::{Placement, PlanState};

use crate::{
    catalog::{CandidateQuery, CourseCatalog},
    models::{Course, CourseId, CourseLevel, Plan},
    params::BuildPlan,
    Result,
};

/// Per-term credit cap used when a request does not give one.
pub const DEFAULT_PER_TERM_CREDITS: u32 = 15;

/// Levels never offered as backfill candidates.
pub const BACKFILL_EXCLUDED_LEVELS: [CourseLevel; 2] = [CourseLevel::Level000, CourseLevel::Level100];

/// Builds plans against a course catalog.
#[derive(Debug, Clone)]
pub struct Scheduler<C> {
    catalog: C,
}

impl<C: CourseCatalog> Scheduler<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Generates a plan for `request`.
    ///
    /// Unknown ids and antirequisite conflicts are reported in the plan's
    /// notes. The result is fully determined by the request and the catalog
    /// contents.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the request fails validation
    /// * Any error returned by the catalog, unchanged
    pub async fn build(&self, request: &BuildPlan) -> Result<Plan> {
        request.validate()?;

        let requested = request.requested_course_ids();
        if requested.is_empty() {
            debug!("empty plan request, skipping catalog");
            return Ok(Plan::new());
        }

        info!(
            "building plan for {} courses, target {} credits, {} per term",
            requested.len(),
            request.target_credits,
            request.per_term_credits
        );

        let requested_set: BTreeSet<&CourseId> = requested.iter().collect();
        let found: Vec<Course> = self
            .catalog
            .fetch_by_ids(&requested)
            .await?
            .into_iter()
            .filter(|course| requested_set.contains(&course.id))
            .collect();

        let found_ids: BTreeSet<&CourseId> = found.iter().map(|course| &course.id).collect();
        let mut invalid: Vec<CourseId> = requested
            .iter()
            .filter(|id| !found_ids.contains(id))
            .cloned()
            .collect();
        invalid.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let mut state = PlanState::new();
        if !invalid.is_empty() {
            warn!("{} requested courses not in catalog: {:?}", invalid.len(), invalid);
            state.note_invalid_ids(invalid);
        }

        let per_term_cap = f64::from(request.per_term_credits);
        let target = f64::from(request.target_credits);

        let mut queue: VecDeque<Course> = order_queue(found).into();
        let mut backfilled = false;

        while let Some(course) = queue.pop_front() {
            let (next, placement) = state.step(&course, per_term_cap);
            state = next;
            if let Placement::Unplannable { conflicts } = &placement {
                warn!("{} unplannable, conflicts with {:?}", course.id, conflicts);
            }

            if state.total_credits() >= target {
                break;
            }

            if queue.is_empty() && !backfilled {
                backfilled = true;
                queue = self.backfill(&state, request, target).await?.into();
            }
        }

        let plan = state.into_plan();
        info!(
            "plan built: {} courses over {} terms, {} credits",
            plan.course_count(),
            plan.terms.len(),
            plan.total_credits
        );
        Ok(plan)
    }

    /// Fetches and orders the single backfill round.
    async fn backfill(
        &self,
        state: &PlanState,
        request: &BuildPlan,
        target: f64,
    ) -> Result<Vec<Course>> {
        let included_ids: Vec<CourseId> = state.future_courses().iter().cloned().collect();
        if included_ids.is_empty() {
            debug!("no unlocked courses to backfill from");
            return Ok(Vec::new());
        }

        let query = CandidateQuery {
            included_ids,
            excluded_ids: state.settled_ids().into_iter().collect(),
            faculties: request.faculties.clone(),
            departments: request.departments.clone(),
            excluded_levels: BACKFILL_EXCLUDED_LEVELS.to_vec(),
            included_levels: request.course_levels.clone(),
            academic_level: request.academic_level,
        };

        let total = state.total_credits();
        let candidates: Vec<Course> = self
            .catalog
            .fetch_candidates(&query)
            .await?
            .into_iter()
            .filter(|course| course.credits + total <= target)
            .collect();

        info!(
            "backfill round: {} candidates for {} remaining credits",
            candidates.len(),
            target - total
        );
        Ok(order_queue(candidates))
    }
}
