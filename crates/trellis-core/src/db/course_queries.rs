//! Course catalog queries.

use std::collections::BTreeSet;

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Row, ToSql};

use crate::{
    catalog::CandidateQuery,
    error::{DatabaseResultExt, Result},
    models::{AcademicLevel, Course, CourseId, CourseLevel, Requisite},
    params::ListCourses,
};

const COURSE_COLUMNS: &str = "id, name, credits, faculty, department, course_level, academic_level, \
     prerequisites_raw, prerequisites_parsed, corequisites_raw, corequisites_parsed, \
     restrictions_raw, restrictions_parsed, future_courses, overview, terms";

const UPSERT_COURSE_SQL: &str = "INSERT INTO courses (id, name, credits, faculty, department, course_level, academic_level, \
     prerequisites_raw, prerequisites_parsed, corequisites_raw, corequisites_parsed, \
     restrictions_raw, restrictions_parsed, future_courses, overview, terms, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17) \
     ON CONFLICT(id) DO UPDATE SET name = excluded.name, credits = excluded.credits, \
     faculty = excluded.faculty, department = excluded.department, \
     course_level = excluded.course_level, academic_level = excluded.academic_level, \
     prerequisites_raw = excluded.prerequisites_raw, prerequisites_parsed = excluded.prerequisites_parsed, \
     corequisites_raw = excluded.corequisites_raw, corequisites_parsed = excluded.corequisites_parsed, \
     restrictions_raw = excluded.restrictions_raw, restrictions_parsed = excluded.restrictions_parsed, \
     future_courses = excluded.future_courses, overview = excluded.overview, terms = excluded.terms, \
     updated_at = excluded.updated_at";
const SELECT_UPDATED_AT_SQL: &str = "SELECT updated_at FROM courses WHERE id = ?1";
const DELETE_COURSE_SQL: &str = "DELETE FROM courses WHERE id = ?1";
const COUNT_COURSES_SQL: &str = "SELECT COUNT(*) FROM courses";

/// Keeps `IN (...)` lists well below SQLite's bound-parameter limit.
const ID_CHUNK_SIZE: usize = 500;

type SqlParams = Vec<Box<dyn ToSql>>;

impl super::Database {
    /// Inserts or replaces catalog records in one transaction. Returns the
    /// number of records written.
    pub fn upsert_courses(&mut self, courses: &[Course]) -> Result<usize> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        {
            let mut stmt = tx
                .prepare(UPSERT_COURSE_SQL)
                .db_context("Failed to prepare upsert")?;

            for course in courses {
                let future_courses = serde_json::to_string(&course.future_courses)?;
                let terms = serde_json::to_string(&course.terms)?;
                stmt.execute(params![
                    course.id.as_str(),
                    course.name,
                    course.credits,
                    course.faculty,
                    course.department,
                    course.course_level.as_str(),
                    course.academic_level.as_str(),
                    course.prerequisites.raw,
                    course.prerequisites.parsed,
                    course.corequisites.raw,
                    course.corequisites.parsed,
                    course.restrictions.raw,
                    course.restrictions.parsed,
                    future_courses,
                    course.overview,
                    terms,
                    now,
                ])
                .db_context("Failed to upsert course")?;
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(courses.len())
    }

    /// Retrieves a course by id.
    pub fn get_course(&self, id: &CourseId) -> Result<Option<Course>> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?1");
        self.connection
            .query_row(&sql, [id.as_str()], course_from_row)
            .optional()
            .db_context("Failed to query course")
    }

    /// When the stored record for `id` was last written.
    pub fn course_updated_at(&self, id: &CourseId) -> Result<Option<Timestamp>> {
        let value: Option<String> = self
            .connection
            .query_row(SELECT_UPDATED_AT_SQL, [id.as_str()], |row| row.get(0))
            .optional()
            .db_context("Failed to query course timestamp")?;

        value
            .map(|text| {
                text.parse::<Timestamp>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e))
                })
            })
            .transpose()
            .db_context("Failed to parse course timestamp")
    }

    /// Batch lookup. Unknown ids are absent from the result; the result is
    /// ordered by id.
    pub fn get_courses_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>> {
        let mut courses = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(ID_CHUNK_SIZE) {
            let mut conditions = Vec::new();
            let mut params_vec: SqlParams = Vec::new();
            push_in_condition(&mut conditions, &mut params_vec, "id IN", chunk);
            courses.extend(self.select_courses(&conditions, params_vec)?);
        }

        courses.sort_by(|a, b| a.id.cmp(&b.id));
        courses.dedup_by(|a, b| a.id == b.id);
        Ok(courses)
    }

    /// Backfill candidate search. Every list filter of `query` that is
    /// non-empty narrows the result, which is ordered by id.
    ///
    /// Excluded ids are removed from the included set before querying, and the
    /// remaining ids are bound in chunks of `ID_CHUNK_SIZE`. Faculty, department
    /// and level lists are bound whole.
    pub fn find_candidates(&self, query: &CandidateQuery) -> Result<Vec<Course>> {
        let excluded: BTreeSet<&CourseId> = query.excluded_ids.iter().collect();
        let eligible: Vec<&CourseId> = query
            .included_ids
            .iter()
            .filter(|id| !excluded.contains(id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if eligible.is_empty() {
            return Ok(Vec::new());
        }

        let excluded_levels: Vec<&str> = query.excluded_levels.iter().map(CourseLevel::as_str).collect();
        let included_levels: Vec<&str> = query.included_levels.iter().map(CourseLevel::as_str).collect();

        let mut courses = Vec::new();
        for chunk in eligible.chunks(ID_CHUNK_SIZE) {
            let mut conditions = Vec::new();
            let mut params_vec: SqlParams = Vec::new();

            push_in_condition(&mut conditions, &mut params_vec, "id IN", chunk);
            push_in_condition(&mut conditions, &mut params_vec, "faculty IN", &query.faculties);
            push_in_condition(&mut conditions, &mut params_vec, "department IN", &query.departments);
            push_in_condition(&mut conditions, &mut params_vec, "course_level NOT IN", &excluded_levels);
            push_in_condition(&mut conditions, &mut params_vec, "course_level IN", &included_levels);

            if query.academic_level != AcademicLevel::All {
                conditions.push("academic_level IN (?, 'ALL')".to_string());
                params_vec.push(Box::new(query.academic_level.as_str()));
            }

            courses.extend(self.select_courses(&conditions, params_vec)?);
        }

        courses.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(courses)
    }

    /// Lists courses ordered by id, optionally filtered.
    pub fn list_courses(&self, filter: &ListCourses) -> Result<Vec<Course>> {
        let mut conditions = Vec::new();
        let mut params_vec: SqlParams = Vec::new();

        if let Some(ref faculty) = filter.faculty {
            conditions.push("faculty = ?".to_string());
            params_vec.push(Box::new(faculty.clone()));
        }

        if let Some(ref department) = filter.department {
            conditions.push("department = ?".to_string());
            params_vec.push(Box::new(department.clone()));
        }

        if let Some(level) = filter.course_level {
            conditions.push("course_level = ?".to_string());
            params_vec.push(Box::new(level.as_str()));
        }

        self.select_courses(&conditions, params_vec)
    }

    /// Removes a course. Returns whether a record was deleted.
    pub fn delete_course(&self, id: &CourseId) -> Result<bool> {
        let affected = self
            .connection
            .execute(DELETE_COURSE_SQL, [id.as_str()])
            .db_context("Failed to delete course")?;
        Ok(affected > 0)
    }

    pub fn count_courses(&self) -> Result<u64> {
        self.connection
            .query_row(COUNT_COURSES_SQL, [], |row| row.get::<_, i64>(0))
            .map(|count| count as u64)
            .db_context("Failed to count courses")
    }

    fn select_courses(&self, conditions: &[String], params_vec: SqlParams) -> Result<Vec<Course>> {
        let mut query = format!("SELECT {COURSE_COLUMNS} FROM courses");
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| &**b).collect();

        let courses = stmt
            .query_map(&params_refs[..], course_from_row)
            .db_context("Failed to query courses")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read course row")?;

        Ok(courses)
    }
}

/// Appends `<column_op> (?, ?, ...)` for a non-empty value list.
fn push_in_condition<T>(
    conditions: &mut Vec<String>,
    params_vec: &mut SqlParams,
    column_op: &str,
    values: &[T],
) where
    T: AsRef<str>,
{
    if values.is_empty() {
        return;
    }

    let placeholders = vec!["?"; values.len()].join(", ");
    conditions.push(format!("{column_op} ({placeholders})"));
    params_vec.extend(
        values
            .iter()
            .map(|value| Box::new(value.as_ref().to_string()) as Box<dyn ToSql>),
    );
}

fn invalid_column(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        index,
        Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

fn json_column<T: serde::de::DeserializeOwned>(row: &Row<'_>, index: usize) -> rusqlite::Result<T> {
    let text: Option<String> = row.get(index)?;
    let text = text.unwrap_or_else(|| "[]".to_string());
    serde_json::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

fn course_from_row(row: &Row<'_>) -> rusqlite::Result<Course> {
    let course_level: String = row.get(5)?;
    let course_level = course_level
        .parse::<CourseLevel>()
        .map_err(|e| invalid_column(5, e))?;

    let academic_level: String = row.get(6)?;
    let academic_level = academic_level
        .parse::<AcademicLevel>()
        .map_err(|e| invalid_column(6, e))?;

    Ok(Course {
        id: CourseId::from(row.get::<_, String>(0)?),
        name: row.get(1)?,
        credits: row.get(2)?,
        faculty: row.get(3)?,
        department: row.get(4)?,
        course_level,
        academic_level,
        prerequisites: Requisite::new(row.get::<_, String>(7)?, row.get::<_, String>(8)?),
        corequisites: Requisite::new(row.get::<_, String>(9)?, row.get::<_, String>(10)?),
        restrictions: Requisite::new(row.get::<_, String>(11)?, row.get::<_, String>(12)?),
        future_courses: json_column(row, 13)?,
        overview: row.get(14)?,
        terms: json_column(row, 15)?,
    })
}
