use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::*;
use crate::{
    catalog::MemoryCatalog,
    models::{AcademicLevel, Requisite},
    PlannerError,
};

fn course(id: &str, credits: f64) -> Course {
    let id = CourseId::from(id);
    let level = id
        .suffix()
        .chars()
        .next()
        .and_then(CourseLevel::from_digit)
        .unwrap_or(CourseLevel::Level000);
    Course {
        name: id.as_str().to_uppercase(),
        id,
        credits,
        faculty: "Science".to_string(),
        department: "Computer Science".to_string(),
        course_level: level,
        academic_level: AcademicLevel::Ugrad,
        prerequisites: Requisite::default(),
        corequisites: Requisite::default(),
        restrictions: Requisite::default(),
        future_courses: Vec::new(),
        overview: None,
        terms: Vec::new(),
    }
}

fn term_ids(plan: &Plan, index: usize) -> Vec<&str> {
    plan.terms[index]
        .course_ids
        .iter()
        .map(CourseId::as_str)
        .collect()
}

/// Wraps a catalog and counts the calls made to it.
#[derive(Default)]
struct CountingCatalog {
    inner: MemoryCatalog,
    by_ids: AtomicUsize,
    candidates: AtomicUsize,
}

#[async_trait]
impl CourseCatalog for CountingCatalog {
    async fn fetch_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>> {
        self.by_ids.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_by_ids(ids).await
    }

    async fn fetch_candidates(&self, query: &CandidateQuery) -> Result<Vec<Course>> {
        self.candidates.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_candidates(query).await
    }
}

struct FailingCatalog;

#[async_trait]
impl CourseCatalog for FailingCatalog {
    async fn fetch_by_ids(&self, _ids: &[CourseId]) -> Result<Vec<Course>> {
        Err(PlannerError::catalog("connection refused"))
    }

    async fn fetch_candidates(&self, _query: &CandidateQuery) -> Result<Vec<Course>> {
        Err(PlannerError::catalog("connection refused"))
    }
}

#[test]
fn test_step_places_into_first_term() {
    let (state, placement) = PlanState::new().step(&course("comp202", 3.0), 15.0);
    assert_eq!(
        placement,
        Placement::Placed {
            term_index: 0,
            new_term: false
        }
    );
    assert_eq!(state.total_credits(), 3.0);
    assert_eq!(term_ids(state.plan(), 0), vec!["comp202"]);
}

#[test]
fn test_step_respects_credit_cap() {
    let mut state = PlanState::new();
    for id in ["comp202", "comp206", "comp250"] {
        state = state.step(&course(id, 4.0), 8.0).0;
    }
    assert_eq!(state.plan().terms.len(), 2);
    assert_eq!(term_ids(state.plan(), 0), vec!["comp202", "comp206"]);
    assert_eq!(term_ids(state.plan(), 1), vec!["comp250"]);
}

#[test]
fn test_step_oversized_course_sits_alone() {
    let (state, _) = PlanState::new().step(&course("comp400", 18.0), 15.0);
    assert_eq!(state.plan().terms.len(), 1);

    let (state, placement) = state.step(&course("comp202", 3.0), 15.0);
    assert_eq!(
        placement,
        Placement::Placed {
            term_index: 1,
            new_term: true
        }
    );
    assert_eq!(state.plan().terms[0].total_credits, 18.0);
}

#[test]
fn test_step_prerequisite_forces_later_term() {
    let mut dependent = course("comp250", 3.0);
    dependent.prerequisites = Requisite::parsed("comp202");

    let (state, _) = PlanState::new().step(&course("comp202", 3.0), 15.0);
    let (state, placement) = state.step(&dependent, 15.0);

    assert_eq!(
        placement,
        Placement::Placed {
            term_index: 1,
            new_term: true
        }
    );
    assert_eq!(term_ids(state.plan(), 1), vec!["comp250"]);
}

#[test]
fn test_step_prefers_corequisite_term() {
    let mut state = PlanState::new();
    for id in ["comp202", "math133", "math140"] {
        state = state.step(&course(id, 6.0), 12.0).0;
    }
    // term_1: comp202, math133; term_2: math140
    assert_eq!(term_ids(state.plan(), 1), vec!["math140"]);

    // Fits both terms by credits; the corequisite pulls it into term_2.
    let mut lab = course("phys101", 0.0);
    lab.corequisites = Requisite::parsed("math140");
    let (state, placement) = state.step(&lab, 12.0);
    assert_eq!(
        placement,
        Placement::Placed {
            term_index: 1,
            new_term: false
        }
    );
    assert_eq!(term_ids(state.plan(), 1), vec!["math140", "phys101"]);
}

#[test]
fn test_step_antirequisite_in_either_direction() {
    let mut first = course("comp250", 3.0);
    first.restrictions = Requisite::parsed("comp251");
    let second = course("comp251", 3.0);

    let (state, _) = PlanState::new().step(&first, 15.0);
    let (state, placement) = state.step(&second, 15.0);

    assert_eq!(
        placement,
        Placement::Unplannable {
            conflicts: BTreeSet::from([CourseId::from("comp250")])
        }
    );
    assert!(state.is_unplannable(&CourseId::from("comp251")));
    assert!(!state.plan().is_scheduled(&CourseId::from("comp251")));
    assert!(state.plan().notes.unplannable_course[&CourseId::from("comp251")].contains("comp250"));
}

#[test]
fn test_step_prerequisite_goes_before_scheduled_dependent() {
    let mut dependent = course("comp302", 3.0);
    dependent.prerequisites = Requisite::parsed("comp202+comp250");

    let (state, _) = PlanState::new().step(&course("comp202", 3.0), 15.0);
    let (state, _) = state.step(&dependent, 15.0);
    assert_eq!(term_ids(state.plan(), 1), vec!["comp302"]);

    let (state, placement) = state.step(&course("comp250", 3.0), 15.0);
    assert_eq!(
        placement,
        Placement::Placed {
            term_index: 0,
            new_term: false
        }
    );
    assert_eq!(term_ids(state.plan(), 0), vec!["comp202", "comp250"]);
}

#[test]
fn test_step_prerequisite_without_earlier_term_is_unplannable() {
    let mut dependent = course("comp302", 3.0);
    dependent.prerequisites = Requisite::parsed("comp250");
    let mut prerequisite = course("comp250", 3.0);
    prerequisite.prerequisites = Requisite::parsed("comp202");

    let mut state = PlanState::new();
    for next in [course("comp202", 3.0), dependent] {
        state = state.step(&next, 15.0).0;
    }
    // comp302 shares term_1 with comp202, so comp250 has nowhere to go.
    assert_eq!(term_ids(state.plan(), 0), vec!["comp202", "comp302"]);

    let (state, placement) = state.step(&prerequisite, 15.0);
    assert_eq!(
        placement,
        Placement::Unplannable {
            conflicts: BTreeSet::from([CourseId::from("comp302")])
        }
    );
    assert!(!state.plan().is_scheduled(&CourseId::from("comp250")));
    assert!(state.plan().notes.unplannable_course[&CourseId::from("comp250")].contains("comp302"));
    assert_eq!(state.plan().terms.len(), 1);
}

#[test]
fn test_step_prerequisite_cycle_drops_the_later_course() {
    let mut first = course("comp301", 3.0);
    first.prerequisites = Requisite::parsed("comp302");
    let mut second = course("comp302", 3.0);
    second.prerequisites = Requisite::parsed("comp301");

    let (state, _) = PlanState::new().step(&first, 15.0);
    let (state, placement) = state.step(&second, 15.0);

    assert!(matches!(placement, Placement::Unplannable { .. }));
    assert_eq!(state.plan().course_count(), 1);
}

#[test]
fn test_step_plan_total_is_sum_of_term_totals() {
    let mut second = course("comp250", 0.2);
    second.prerequisites = Requisite::parsed("comp202");

    let mut state = PlanState::new();
    for next in [course("comp202", 0.1), second, course("comp206", 0.7)] {
        state = state.step(&next, 15.0).0;
    }

    let plan = state.plan();
    assert_eq!(term_ids(plan, 0), vec!["comp202", "comp206"]);
    let term_sum: f64 = plan.terms.iter().map(|term| term.total_credits).sum();
    assert_eq!(plan.total_credits, term_sum);
}

#[test]
fn test_step_skips_repeats() {
    let (state, _) = PlanState::new().step(&course("comp202", 3.0), 15.0);
    let (state, placement) = state.step(&course("comp202", 3.0), 15.0);
    assert_eq!(placement, Placement::Skipped);
    assert_eq!(state.total_credits(), 3.0);
}

#[test]
fn test_step_records_credit_groups_and_future_courses() {
    let mut base = course("comp302", 3.0);
    base.prerequisites = Requisite::parsed("comp250+6-2-math");
    base.future_courses = vec![CourseId::from("comp409")];

    let (state, _) = PlanState::new().step(&base, 15.0);
    let groups = &state.plan().notes.unresolved_credit_groups[&CourseId::from("comp302")];
    assert_eq!(groups[0].credits_requirement, 6);
    assert!(state.future_courses().contains(&CourseId::from("comp409")));
}

#[tokio::test]
async fn test_empty_request_skips_catalog() {
    let catalog = CountingCatalog::default();
    let scheduler = Scheduler::new(&catalog);

    let plan = scheduler.build(&BuildPlan::new(Vec::<String>::new(), 12)).await.unwrap();

    assert_eq!(plan, Plan::new());
    assert_eq!(catalog.by_ids.load(Ordering::SeqCst), 0);
    assert_eq!(catalog.candidates.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_zero_cap_is_rejected() {
    let scheduler = Scheduler::new(MemoryCatalog::new());
    let mut request = BuildPlan::new(["comp202"], 3);
    request.per_term_credits = 0;

    let error = scheduler.build(&request).await.unwrap_err();
    assert!(error.is_invalid_input());
}

#[tokio::test]
async fn test_catalog_errors_propagate() {
    let scheduler = Scheduler::new(FailingCatalog);
    let error = scheduler
        .build(&BuildPlan::new(["comp202"], 3))
        .await
        .unwrap_err();
    assert!(matches!(error, PlannerError::Catalog { .. }));
}

#[tokio::test]
async fn test_unknown_ids_are_sorted() {
    let catalog: MemoryCatalog = [course("comp202", 3.0)].into_iter().collect();
    let scheduler = Scheduler::new(catalog);

    let first = scheduler
        .build(&BuildPlan::new(["math998", "comp202", "comp999"], 30))
        .await
        .unwrap();
    let second = scheduler
        .build(&BuildPlan::new(["comp999", "comp202", "math998"], 30))
        .await
        .unwrap();

    assert_eq!(
        first.notes.invalid_course_ids,
        vec![CourseId::from("math998"), CourseId::from("comp999")]
    );
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn test_backfilled_prerequisite_never_follows_its_dependent() {
    let mut base = course("comp202", 3.0);
    base.future_courses = vec![CourseId::from("comp250")];
    let mut unlocked = course("comp250", 3.0);
    unlocked.prerequisites = Requisite::parsed("comp202");
    let mut dependent = course("comp302", 3.0);
    dependent.prerequisites = Requisite::parsed("comp250");

    let catalog: MemoryCatalog = [base, unlocked, dependent].into_iter().collect();
    let plan = Scheduler::new(catalog)
        .build(&BuildPlan::new(["comp202", "comp302"], 9))
        .await
        .unwrap();

    assert_eq!(term_ids(&plan, 0), vec!["comp202", "comp302"]);
    assert_eq!(plan.terms.len(), 1);
    assert!(!plan.is_scheduled(&CourseId::from("comp250")));
    assert!(plan.notes.unplannable_course[&CourseId::from("comp250")].contains("comp302"));
}

#[tokio::test]
async fn test_backfill_runs_once() {
    let mut base = course("comp202", 3.0);
    base.future_courses = vec![CourseId::from("comp250"), CourseId::from("comp206")];
    let mut follow_up = course("comp250", 3.0);
    follow_up.future_courses = vec![CourseId::from("comp251")];

    let catalog = CountingCatalog {
        inner: [base, follow_up, course("comp206", 3.0), course("comp251", 3.0)]
            .into_iter()
            .collect(),
        ..Default::default()
    };
    let scheduler = Scheduler::new(&catalog);

    let plan = scheduler
        .build(&BuildPlan::new(["comp202"], 30))
        .await
        .unwrap();

    // comp251 is only unlocked by a backfilled course and is never fetched.
    let scheduled: Vec<&str> = plan.scheduled_course_ids().map(CourseId::as_str).collect();
    assert_eq!(scheduled, vec!["comp202", "comp206", "comp250"]);
    assert_eq!(plan.total_credits, 9.0);
    assert_eq!(catalog.by_ids.load(Ordering::SeqCst), 1);
    assert_eq!(catalog.candidates.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_backfill_respects_remaining_credits() {
    let mut base = course("comp202", 3.0);
    base.future_courses = vec![CourseId::from("comp250"), CourseId::from("comp396")];

    let catalog: MemoryCatalog = [base, course("comp250", 3.0), course("comp396", 6.0)]
        .into_iter()
        .collect();
    let plan = Scheduler::new(catalog)
        .build(&BuildPlan::new(["comp202"], 8))
        .await
        .unwrap();

    let scheduled: Vec<&str> = plan.scheduled_course_ids().map(CourseId::as_str).collect();
    assert_eq!(scheduled, vec!["comp202", "comp250"]);
}

#[tokio::test]
async fn test_backfill_excludes_introductory_levels() {
    let mut base = course("comp202", 3.0);
    base.future_courses = vec![CourseId::from("comp100"), CourseId::from("comp250")];

    let catalog: MemoryCatalog = [base, course("comp100", 3.0), course("comp250", 3.0)]
        .into_iter()
        .collect();
    let plan = Scheduler::new(catalog)
        .build(&BuildPlan::new(["comp202"], 30))
        .await
        .unwrap();

    assert!(!plan.is_scheduled(&CourseId::from("comp100")));
    assert!(plan.is_scheduled(&CourseId::from("comp250")));
}

#[tokio::test]
async fn test_target_stops_scheduling() {
    let catalog: MemoryCatalog = ["comp202", "comp206", "comp250"]
        .into_iter()
        .map(|id| course(id, 3.0))
        .collect();
    let plan = Scheduler::new(catalog)
        .build(&BuildPlan::new(["comp202", "comp206", "comp250"], 6))
        .await
        .unwrap();

    assert_eq!(plan.total_credits, 6.0);
    assert!(!plan.is_scheduled(&CourseId::from("comp250")));
}
