//! Queue ordering for scheduling rounds.

use std::collections::BTreeSet;

use crate::{
    models::{Course, CourseId},
    requisite,
};

/// Orders one scheduling round.
///
/// Courses are sorted by [`CourseId::sort_key`] and de-duplicated by id. A
/// stable topological pass then moves each course behind any prerequisite
/// present in the same round: at every step the lowest-keyed course whose
/// in-round prerequisites are already emitted goes next. When a prerequisite
/// cycle leaves no such course, the lowest-keyed remaining course is taken.
pub fn order_queue(mut courses: Vec<Course>) -> Vec<Course> {
    courses.sort_by(|a, b| a.id.sort_key().cmp(&b.id.sort_key()));
    courses.dedup_by(|a, b| a.id == b.id);

    let in_round: BTreeSet<CourseId> = courses.iter().map(|c| c.id.clone()).collect();
    let mut pending: Vec<(Course, BTreeSet<CourseId>)> = courses
        .into_iter()
        .map(|course| {
            let blockers = requisite::parse(&course.prerequisites)
                .course_ids
                .into_iter()
                .filter(|id| *id != course.id && in_round.contains(id))
                .collect();
            (course, blockers)
        })
        .collect();

    let mut emitted = BTreeSet::new();
    let mut ordered = Vec::with_capacity(pending.len());

    while !pending.is_empty() {
        let next = pending
            .iter()
            .position(|(_, blockers)| blockers.is_subset(&emitted))
            .unwrap_or(0);
        let (course, _) = pending.remove(next);
        emitted.insert(course.id.clone());
        ordered.push(course);
    }

    ordered
}
