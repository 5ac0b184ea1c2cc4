//! Requisite string parser.
//!
//! Catalog requisites arrive as normalised strings mixing two kinds of
//! clauses:
//!
//! - boolean course expressions: `(comp250+comp206)/comp251`
//! - aggregate credit clauses: `6-34-comp-math` ("6 credits of 300- or
//!   400-level COMP or MATH courses"), also written per level as
//!   `6-3comp-4math`
//!
//! Parsing runs in two passes. The first pass scans for credit clauses and
//! lifts them out of the text; the second tokenizes what remains on the
//! operator characters `+ | - ( ) /` and keeps every non-operator token as a
//! course reference. The parser is total: any input, however malformed,
//! yields a (possibly empty) [`ParsedRequisite`].
//!
//! ```rust
//! use trellis_core::requisite;
//!
//! let parsed = requisite::parse_str("(comp250+comp206)/comp251|6-3-comp");
//! assert_eq!(parsed.course_ids.len(), 3);
//! assert_eq!(parsed.credit_groups[0].credits_requirement, 6);
//! ```

use std::collections::BTreeSet;

use nom::{
    branch::alt,
    bytes::complete::{take_till1, take_while_m_n},
    character::complete::{char, digit1, one_of, satisfy},
    combinator::{map, map_opt, map_res},
    multi::{many0, many1, separated_list1},
    sequence::{pair, preceded, separated_pair},
    IResult,
};

use crate::models::{CourseId, CourseLevel, CreditGroup, Requisite};

/// Characters that join course references in a parsed requisite.
pub const OPERATORS: &str = "+|-()/";

/// Result of parsing one requisite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRequisite {
    /// Every course id referenced anywhere in the expression
    pub course_ids: BTreeSet<CourseId>,

    /// Aggregate credit clauses, in order of appearance
    pub credit_groups: Vec<CreditGroup>,
}

impl ParsedRequisite {
    pub fn is_empty(&self) -> bool {
        self.course_ids.is_empty() && self.credit_groups.is_empty()
    }
}

/// A lexical unit of the course-expression pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Operator(char),
    Reference(&'a str),
}

/// Parses the `parsed` form of a requisite.
pub fn parse(requisite: &Requisite) -> ParsedRequisite {
    parse_str(&requisite.parsed)
}

/// Parses a normalised requisite string.
pub fn parse_str(text: &str) -> ParsedRequisite {
    let (rest, credit_groups) = extract_credit_groups(text);

    let course_ids = tokenize(&rest)
        .into_iter()
        .filter_map(|token| match token {
            Token::Reference(text) => Some(CourseId::normalize(text)),
            Token::Operator(_) => None,
        })
        .filter(|id| !id.is_empty())
        .collect();

    ParsedRequisite {
        course_ids,
        credit_groups,
    }
}

/// First pass: removes every credit clause from `text`.
///
/// Clauses are matched leftmost-first and never overlap; the text around a
/// removed clause is joined without a separator.
pub fn extract_credit_groups(text: &str) -> (String, Vec<CreditGroup>) {
    let mut rest = String::with_capacity(text.len());
    let mut groups = Vec::new();
    let mut input = text;

    while let Some(next) = input.chars().next() {
        match credit_group(input) {
            Ok((remaining, group)) => {
                groups.push(group);
                input = remaining;
            }
            Err(_) => {
                rest.push(next);
                input = &input[next.len_utf8()..];
            }
        }
    }

    (rest, groups)
}

/// Second pass: splits a course expression into operators and references.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let token = alt((
        map(one_of(OPERATORS), Token::Operator),
        map(take_till1(|c: char| OPERATORS.contains(c)), Token::Reference),
    ));

    // Both branches consume input and together accept any character, so
    // many0 only stops at end of input.
    let result: IResult<&str, Vec<Token<'_>>> = many0(token)(text);
    result.map_or_else(|_| Vec::new(), |(_, tokens)| tokens)
}

fn credit_count(input: &str) -> IResult<&str, u32> {
    map_res(take_while_m_n(1, 2, |c: char| c.is_ascii_digit()), |digits: &str| {
        digits.parse::<u32>()
    })(input)
}

fn subject_code(input: &str) -> IResult<&str, String> {
    map(
        take_while_m_n(4, 4, |c: char| c.is_ascii_alphabetic()),
        str::to_ascii_lowercase,
    )(input)
}

fn level_digit(input: &str) -> IResult<&str, CourseLevel> {
    map_opt(satisfy(|c: char| c.is_ascii_digit()), CourseLevel::from_digit)(input)
}

/// `34-comp-math`: a run of level digits shared by every subject.
fn pooled_levels(input: &str) -> IResult<&str, (Vec<CourseLevel>, Vec<String>)> {
    pair(
        map(digit1, |digits: &str| {
            digits
                .chars()
                .filter_map(CourseLevel::from_digit)
                .collect::<Vec<_>>()
        }),
        many1(preceded(char('-'), subject_code)),
    )(input)
}

/// `3comp-4math`: one level digit per subject.
fn levelled_subjects(input: &str) -> IResult<&str, (Vec<CourseLevel>, Vec<String>)> {
    map(
        separated_list1(char('-'), pair(level_digit, subject_code)),
        |pairs: Vec<(CourseLevel, String)>| pairs.into_iter().unzip(),
    )(input)
}

fn credit_group(input: &str) -> IResult<&str, CreditGroup> {
    map(
        separated_pair(credit_count, char('-'), alt((pooled_levels, levelled_subjects))),
        |(credits_requirement, (levels, subjects))| CreditGroup {
            credits_requirement,
            course_levels: levels.into_iter().collect(),
            subject_codes: subjects.into_iter().collect(),
        },
    )(input)
}
