//! Plan and term model definitions.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{CourseId, CreditGroup};

/// One scheduling bucket (a semester) in a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// Stable key of the term inside the plan (`term_1`, `term_2`, ...)
    pub id: String,

    /// Human-readable label (`Term 1`)
    pub name: String,

    /// Courses assigned to the term, in placement order
    pub course_ids: Vec<CourseId>,

    /// Sum of the credits of `course_ids`
    pub total_credits: f64,
}

impl Term {
    /// Creates the empty term with the given 1-based number.
    pub fn numbered(number: usize) -> Self {
        Self {
            id: format!("term_{number}"),
            name: format!("Term {number}"),
            course_ids: Vec::new(),
            total_credits: 0.0,
        }
    }

    pub fn contains(&self, id: &CourseId) -> bool {
        self.course_ids.contains(id)
    }

    pub fn contains_any(&self, ids: &BTreeSet<CourseId>) -> bool {
        self.course_ids.iter().any(|id| ids.contains(id))
    }

    pub fn is_empty(&self) -> bool {
        self.course_ids.is_empty()
    }
}

/// Diagnostic entries accumulated while building a plan.
///
/// Serialised as the plan's `notes` map; empty categories are omitted so a
/// clean plan carries `"notes": {}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanNotes {
    /// Requested ids that the catalog does not know
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_course_ids: Vec<CourseId>,

    /// Courses dropped from the plan, with the reason (an antirequisite
    /// conflict, or no term left before a scheduled dependent)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub unplannable_course: BTreeMap<CourseId, String>,

    /// Aggregate credit requirements of scheduled courses; not enforced
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub unresolved_credit_groups: BTreeMap<CourseId, Vec<CreditGroup>>,
}

impl PlanNotes {
    pub fn is_empty(&self) -> bool {
        self.invalid_course_ids.is_empty()
            && self.unplannable_course.is_empty()
            && self.unresolved_credit_groups.is_empty()
    }
}

/// A generated sequence of terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Terms in chronological order, serialised as a map keyed by term id
    #[serde(with = "ordered_terms")]
    pub terms: Vec<Term>,

    #[serde(default)]
    pub notes: PlanNotes,

    pub total_credits: f64,
}

impl Plan {
    /// A plan holding a single empty first term.
    pub fn new() -> Self {
        Self {
            terms: vec![Term::numbered(1)],
            notes: PlanNotes::default(),
            total_credits: 0.0,
        }
    }

    /// Index of the term that holds `id`, if it is scheduled.
    pub fn term_index_of(&self, id: &CourseId) -> Option<usize> {
        self.terms.iter().position(|term| term.contains(id))
    }

    pub fn is_scheduled(&self, id: &CourseId) -> bool {
        self.term_index_of(id).is_some()
    }

    /// All scheduled ids in term order.
    pub fn scheduled_course_ids(&self) -> impl Iterator<Item = &CourseId> {
        self.terms.iter().flat_map(|term| term.course_ids.iter())
    }

    pub fn course_count(&self) -> usize {
        self.terms.iter().map(|term| term.course_ids.len()).sum()
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialises `Vec<Term>` as an insertion-ordered JSON object keyed by term
/// id, and reads it back in document order.
mod ordered_terms {
    use std::fmt;

    use serde::{
        de::{MapAccess, Visitor},
        Deserializer, Serializer,
    };

    use super::Term;

    pub fn serialize<S: Serializer>(terms: &[Term], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(terms.iter().map(|term| (&term.id, term)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Term>, D::Error> {
        struct TermsVisitor;

        impl<'de> Visitor<'de> for TermsVisitor {
            type Value = Vec<Term>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of term id to term")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut terms = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((_, term)) = map.next_entry::<String, Term>()? {
                    terms.push(term);
                }
                Ok(terms)
            }
        }

        deserializer.deserialize_map(TermsVisitor)
    }
}
