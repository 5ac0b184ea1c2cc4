use std::str::FromStr;

use serde_json::json;

use super::*;

#[test]
fn test_course_id_normalisation() {
    assert_eq!(CourseId::from(" COMP 250 ").as_str(), "comp250");
    assert_eq!(CourseId::from("Math133D1").as_str(), "math133d1");
    // Truncated to the catalog identifier width.
    assert_eq!(CourseId::from("comp250extra").as_str(), "comp250ext");
    assert!(CourseId::from("   ").is_empty());
}

#[test]
fn test_course_id_parts() {
    let id = CourseId::from("math133d1");
    assert_eq!(id.subject_code(), "math");
    assert_eq!(id.suffix(), "133d1");

    let short = CourseId::from("cs");
    assert_eq!(short.subject_code(), "cs");
    assert_eq!(short.suffix(), "");
}

#[test]
fn test_sort_key_orders_by_suffix_first() {
    let mut ids: Vec<CourseId> = ["math240", "comp250", "comp202", "math250", "phys101"]
        .into_iter()
        .map(CourseId::from)
        .collect();
    ids.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let ordered: Vec<&str> = ids.iter().map(CourseId::as_str).collect();
    assert_eq!(ordered, vec!["phys101", "comp202", "math240", "comp250", "math250"]);
}

#[test]
fn test_course_id_deserialises_normalised() {
    let ids: Vec<CourseId> = serde_json::from_value(json!(["COMP 202", "math240"])).unwrap();
    assert_eq!(ids[0].as_str(), "comp202");
    assert_eq!(serde_json::to_value(&ids[0]).unwrap(), json!("comp202"));
}

#[test]
fn test_course_level_parsing() {
    assert_eq!(CourseLevel::from_str("3").unwrap(), CourseLevel::Level300);
    assert_eq!(CourseLevel::from_str("400").unwrap(), CourseLevel::Level400);
    assert!(CourseLevel::from_str("350").is_err());
    assert!(CourseLevel::from_str("x").is_err());
    assert_eq!(CourseLevel::from_digit('0'), Some(CourseLevel::Level000));
    assert_eq!(CourseLevel::from_digit('a'), None);
}

#[test]
fn test_course_level_serde() {
    assert_eq!(serde_json::to_value(CourseLevel::Level500).unwrap(), json!("500"));
    let level: CourseLevel = serde_json::from_value(json!("100")).unwrap();
    assert_eq!(level, CourseLevel::Level100);
}

#[test]
fn test_academic_level_parsing_and_matching() {
    assert_eq!(AcademicLevel::from_str("Grad").unwrap(), AcademicLevel::Grad);
    assert_eq!(
        AcademicLevel::from_str("undergraduate").unwrap(),
        AcademicLevel::Ugrad
    );
    assert!(AcademicLevel::from_str("phd").is_err());
    assert_eq!(serde_json::to_value(AcademicLevel::Ugrad).unwrap(), json!("UGRAD"));

    assert!(AcademicLevel::Ugrad.admits(AcademicLevel::Ugrad));
    assert!(AcademicLevel::Ugrad.admits(AcademicLevel::All));
    assert!(AcademicLevel::All.admits(AcademicLevel::Grad));
    assert!(!AcademicLevel::Ugrad.admits(AcademicLevel::Grad));
}

#[test]
fn test_course_record_from_catalog_json() {
    let course: Course = serde_json::from_value(json!({
        "id": "COMP250",
        "name": "Introduction to Computer Science",
        "credits": 3.0,
        "faculty": "Science",
        "department": "Computer Science",
        "courseLevel": "200",
        "academicLevel": "UGRAD",
        "prerequisites": { "raw": "COMP 202", "parsed": "comp202" },
        "futureCourses": ["comp251"]
    }))
    .unwrap();

    assert_eq!(course.id.as_str(), "comp250");
    assert_eq!(course.prerequisites.parsed, "comp202");
    assert!(course.corequisites.is_empty());
    assert_eq!(course.future_courses, vec![CourseId::from("comp251")]);
    assert!(course.terms.is_empty());
}

#[test]
fn test_empty_plan_shape() {
    let value = serde_json::to_value(Plan::new()).unwrap();
    assert_eq!(
        value,
        json!({
            "terms": {
                "term_1": { "id": "term_1", "name": "Term 1", "course_ids": [], "total_credits": 0.0 }
            },
            "notes": {},
            "total_credits": 0.0
        })
    );
}

#[test]
fn test_plan_terms_keep_chronological_order() {
    let mut plan = Plan::new();
    for number in 2..=11 {
        plan.terms.push(Term::numbered(number));
    }

    let text = serde_json::to_string(&plan).unwrap();
    // term_10 must follow term_9, not term_1.
    let term_9 = text.find("\"term_9\"").unwrap();
    let term_10 = text.find("\"term_10\"").unwrap();
    assert!(term_9 < term_10);

    let back: Plan = serde_json::from_str(&text).unwrap();
    let ids: Vec<&str> = back.terms.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids.first(), Some(&"term_1"));
    assert_eq!(ids.last(), Some(&"term_11"));
}

#[test]
fn test_plan_notes_serialise_populated_categories() {
    let mut plan = Plan::new();
    plan.notes.invalid_course_ids.push(CourseId::from("comp999"));
    plan.notes
        .unplannable_course
        .insert(CourseId::from("comp335"), "antirequisite already planned: comp330".into());

    let value = serde_json::to_value(&plan).unwrap();
    assert_eq!(value["notes"]["invalid_course_ids"], json!(["comp999"]));
    assert_eq!(
        value["notes"]["unplannable_course"]["comp335"],
        json!("antirequisite already planned: comp330")
    );
    assert!(value["notes"].get("unresolved_credit_groups").is_none());
}

#[test]
fn test_plan_lookup_helpers() {
    let mut plan = Plan::new();
    plan.terms.push(Term::numbered(2));
    plan.terms[1].course_ids.push(CourseId::from("comp250"));

    let id = CourseId::from("comp250");
    assert_eq!(plan.term_index_of(&id), Some(1));
    assert!(plan.is_scheduled(&id));
    assert!(!plan.is_scheduled(&CourseId::from("comp202")));
    assert_eq!(plan.course_count(), 1);
}
