//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the students table.

use crate::service::StudentPatch;

pub const STUDENTS_TABLE: &str = "students";

/// Columns returned for a student, in response order.
const STUDENT_COLUMNS: &[&str] = &["id", "name", "grade"];

/// Quote identifier for PostgreSQL; embedded quotes are doubled.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn column_list() -> String {
    STUDENT_COLUMNS
        .iter()
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// DDL for the students table; idempotent.
pub fn create_students_table() -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (id SERIAL PRIMARY KEY, name TEXT NOT NULL, grade TEXT NOT NULL)",
        quoted(STUDENTS_TABLE)
    )
}

/// SQL text plus text parameters in placeholder order. Callers bind `params` first, then any trailing
/// placeholders the statement documents (e.g. the id in `update_fields`).
#[derive(Debug, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<String>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: String) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// SELECT every student in storage order.
pub fn select_all() -> String {
    format!("SELECT {} FROM {}", column_list(), quoted(STUDENTS_TABLE))
}

/// SELECT by id; id is `$1`.
pub fn select_by_id() -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        column_list(),
        quoted(STUDENTS_TABLE),
        quoted("id")
    )
}

/// INSERT name ($1) and grade ($2), returning the generated id.
pub fn insert() -> String {
    format!(
        "INSERT INTO {} ({}, {}) VALUES ($1, $2) RETURNING {}",
        quoted(STUDENTS_TABLE),
        quoted("name"),
        quoted("grade"),
        quoted("id")
    )
}

/// Full replace: name ($1), grade ($2), id ($3).
pub fn replace() -> String {
    format!(
        "UPDATE {} SET {} = $1, {} = $2 WHERE {} = $3",
        quoted(STUDENTS_TABLE),
        quoted("name"),
        quoted("grade"),
        quoted("id")
    )
}

/// UPDATE touching only the columns the patch carries. The id placeholder is `$params.len() + 1`.
pub fn update_fields(patch: &StudentPatch) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (col, val) in [("name", patch.name()), ("grade", patch.grade())] {
        if let Some(v) = val {
            let n = q.push_param(v.to_string());
            sets.push(format!("{} = ${}", quoted(col), n));
        }
    }
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        quoted(STUDENTS_TABLE),
        sets.join(", "),
        quoted("id"),
        q.params.len() + 1
    );
    q
}

/// DELETE by id; id is `$1`.
pub fn delete() -> String {
    format!(
        "DELETE FROM {} WHERE {} = $1",
        quoted(STUDENTS_TABLE),
        quoted("id")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_sets_only_supplied_columns() {
        let q = update_fields(&StudentPatch::Grade("B".into()));
        assert_eq!(q.sql, r#"UPDATE "students" SET "grade" = $1 WHERE "id" = $2"#);
        assert_eq!(q.params, vec!["B".to_string()]);

        let q = update_fields(&StudentPatch::Name("Ana".into()));
        assert_eq!(q.sql, r#"UPDATE "students" SET "name" = $1 WHERE "id" = $2"#);
    }

    #[test]
    fn partial_update_with_both_columns_keeps_name_first() {
        let q = update_fields(&StudentPatch::Both {
            name: "Ana".into(),
            grade: "A".into(),
        });
        assert_eq!(
            q.sql,
            r#"UPDATE "students" SET "name" = $1, "grade" = $2 WHERE "id" = $3"#
        );
        assert_eq!(q.params, vec!["Ana".to_string(), "A".to_string()]);
    }

    #[test]
    fn values_never_appear_in_sql_text() {
        let q = update_fields(&StudentPatch::Name("Robert'); DROP TABLE students;--".into()));
        assert!(!q.sql.contains("DROP"));
    }

    #[test]
    fn identifiers_are_double_quoted() {
        assert_eq!(quoted("Students"), "\"Students\"");
        assert_eq!(quoted("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn fixed_statements_are_parameterized() {
        assert_eq!(insert(), r#"INSERT INTO "students" ("name", "grade") VALUES ($1, $2) RETURNING "id""#);
        assert_eq!(select_by_id(), r#"SELECT "id", "name", "grade" FROM "students" WHERE "id" = $1"#);
        assert_eq!(replace(), r#"UPDATE "students" SET "name" = $1, "grade" = $2 WHERE "id" = $3"#);
        assert_eq!(delete(), r#"DELETE FROM "students" WHERE "id" = $1"#);
    }
}
