//! The placement state machine.
//!
//! [`PlanState::step`] consumes one course and returns the next state together
//! with the [`Placement`] decision, so every scheduling rule can be exercised
//! without a catalog.

use std::{
    collections::{BTreeMap, BTreeSet},
    ops::Range,
};

use log::debug;

use crate::{
    models::{Course, CourseId, CreditGroup, Plan, Term},
    requisite::{self, ParsedRequisite},
};

/// Outcome of feeding one course to [`PlanState::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The course was appended to the term at `term_index` (0-based)
    Placed { term_index: usize, new_term: bool },

    /// The course cannot be placed and is dropped for the rest of the build.
    /// `conflicts` names the scheduled courses that block it.
    Unplannable { conflicts: BTreeSet<CourseId> },

    /// The course was already scheduled or already rejected
    Skipped,
}

/// In-progress plan plus the bookkeeping the placement rules need.
#[derive(Debug, Clone, Default)]
pub struct PlanState {
    plan: Plan,

    /// Restricted id -> scheduled courses that declare the restriction
    restricted_by: BTreeMap<CourseId, BTreeSet<CourseId>>,

    /// Prerequisite id -> scheduled courses that list it
    required_by: BTreeMap<CourseId, BTreeSet<CourseId>>,

    /// Courses unlocked by scheduled courses; backfill candidates
    future_courses: BTreeSet<CourseId>,

    unplannable: BTreeSet<CourseId>,
}

impl PlanState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn into_plan(self) -> Plan {
        self.plan
    }

    pub fn total_credits(&self) -> f64 {
        self.plan.total_credits
    }

    pub fn future_courses(&self) -> &BTreeSet<CourseId> {
        &self.future_courses
    }

    pub fn is_unplannable(&self, id: &CourseId) -> bool {
        self.unplannable.contains(id)
    }

    /// Every id the build has already dealt with: scheduled, rejected or
    /// unknown to the catalog.
    pub fn settled_ids(&self) -> BTreeSet<CourseId> {
        self.plan
            .scheduled_course_ids()
            .chain(self.unplannable.iter())
            .chain(self.plan.notes.invalid_course_ids.iter())
            .cloned()
            .collect()
    }

    /// Records requested ids the catalog could not resolve.
    pub fn note_invalid_ids(&mut self, ids: Vec<CourseId>) {
        self.plan.notes.invalid_course_ids.extend(ids);
    }

    /// Places `course` according to the scheduling rules.
    ///
    /// 1. A course conflicting with a scheduled antirequisite, in either
    ///    direction, is unplannable.
    /// 2. The search starts at the latest term holding one of its
    ///    prerequisites and skips terms that hold a prerequisite or lack
    ///    credit room.
    /// 3. A course that scheduled courses list as a prerequisite must land
    ///    before the earliest of them. If no existing term qualifies, it is
    ///    unplannable.
    /// 4. A term holding a corequisite wins; otherwise the first fitting term
    ///    is used; otherwise a new term is appended.
    pub fn step(mut self, course: &Course, per_term_cap: f64) -> (Self, Placement) {
        let placement = self.place(course, per_term_cap);
        (self, placement)
    }

    fn place(&mut self, course: &Course, per_term_cap: f64) -> Placement {
        if self.unplannable.contains(&course.id) || self.plan.is_scheduled(&course.id) {
            return Placement::Skipped;
        }

        let prerequisites = requisite::parse(&course.prerequisites);
        let corequisites = requisite::parse(&course.corequisites);
        let restrictions = requisite::parse(&course.restrictions);

        let conflicts = self.antirequisite_conflicts(&course.id, &restrictions.course_ids);
        if !conflicts.is_empty() {
            let names: Vec<&str> = conflicts.iter().map(CourseId::as_str).collect();
            self.plan.notes.unplannable_course.insert(
                course.id.clone(),
                format!("antirequisite already planned: {}", names.join(", ")),
            );
            self.unplannable.insert(course.id.clone());
            return Placement::Unplannable { conflicts };
        }

        let floor = self.prerequisite_floor(&prerequisites.course_ids);
        let ceiling = self.dependent_ceiling(&course.id);
        let selected = self.select_term(
            course.credits,
            floor..ceiling.unwrap_or(self.plan.terms.len()),
            &prerequisites.course_ids,
            &corequisites.course_ids,
            per_term_cap,
        );

        let term_index = match (selected, ceiling) {
            (Some(index), _) => index,
            (None, Some(_)) => {
                let dependents = self.required_by.get(&course.id).cloned().unwrap_or_default();
                let names: Vec<&str> = dependents.iter().map(CourseId::as_str).collect();
                self.plan.notes.unplannable_course.insert(
                    course.id.clone(),
                    format!("no term before dependent courses: {}", names.join(", ")),
                );
                self.unplannable.insert(course.id.clone());
                return Placement::Unplannable {
                    conflicts: dependents,
                };
            }
            (None, None) => {
                self.plan.terms.push(Term::numbered(self.plan.terms.len() + 1));
                self.plan.terms.len() - 1
            }
        };
        let new_term = selected.is_none();

        debug!(
            "placing {} ({} credits) in term {} (floor {}, new term: {})",
            course.id,
            course.credits,
            term_index + 1,
            floor + 1,
            new_term
        );

        let term = &mut self.plan.terms[term_index];
        term.course_ids.push(course.id.clone());
        term.total_credits += course.credits;
        self.plan.total_credits = self.plan.terms.iter().map(|term| term.total_credits).sum();

        self.future_courses
            .extend(course.future_courses.iter().cloned());
        for prerequisite in &prerequisites.course_ids {
            self.required_by
                .entry(prerequisite.clone())
                .or_default()
                .insert(course.id.clone());
        }
        for restricted in restrictions.course_ids {
            self.restricted_by
                .entry(restricted)
                .or_default()
                .insert(course.id.clone());
        }

        let credit_groups = unresolved_credit_groups(&prerequisites, &corequisites);
        if !credit_groups.is_empty() {
            self.plan
                .notes
                .unresolved_credit_groups
                .insert(course.id.clone(), credit_groups);
        }

        Placement::Placed {
            term_index,
            new_term,
        }
    }

    /// Scheduled courses that exclude `id` or that `id` excludes.
    fn antirequisite_conflicts(
        &self,
        id: &CourseId,
        restrictions: &BTreeSet<CourseId>,
    ) -> BTreeSet<CourseId> {
        let mut conflicts: BTreeSet<CourseId> = restrictions
            .iter()
            .filter(|restricted| *restricted != id && self.plan.is_scheduled(restricted))
            .cloned()
            .collect();
        if let Some(declared_by) = self.restricted_by.get(id) {
            conflicts.extend(declared_by.iter().cloned());
        }
        conflicts
    }

    /// Index of the most recent term holding any prerequisite, or 0.
    fn prerequisite_floor(&self, prerequisites: &BTreeSet<CourseId>) -> usize {
        self.plan
            .terms
            .iter()
            .rposition(|term| term.contains_any(prerequisites))
            .unwrap_or(0)
    }

    /// Index of the earliest term holding a scheduled course that lists `id`
    /// as a prerequisite.
    fn dependent_ceiling(&self, id: &CourseId) -> Option<usize> {
        self.required_by
            .get(id)?
            .iter()
            .filter_map(|dependent| self.plan.term_index_of(dependent))
            .min()
    }

    fn select_term(
        &self,
        credits: f64,
        eligible: Range<usize>,
        prerequisites: &BTreeSet<CourseId>,
        corequisites: &BTreeSet<CourseId>,
        per_term_cap: f64,
    ) -> Option<usize> {
        let mut fallback = None;

        for (index, term) in self.plan.terms.iter().enumerate() {
            if !eligible.contains(&index) {
                continue;
            }
            // An empty term takes any single course, even one above the cap.
            if !term.is_empty() && term.total_credits + credits > per_term_cap {
                continue;
            }
            if term.contains_any(prerequisites) {
                continue;
            }
            if term.contains_any(corequisites) {
                return Some(index);
            }
            fallback.get_or_insert(index);
        }

        fallback
    }
}

fn unresolved_credit_groups(
    prerequisites: &ParsedRequisite,
    corequisites: &ParsedRequisite,
) -> Vec<CreditGroup> {
    prerequisites
        .credit_groups
        .iter()
        .chain(corequisites.credit_groups.iter())
        .cloned()
        .collect()
}
