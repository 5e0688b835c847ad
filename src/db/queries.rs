//! SQL fragments shared by every backend. Only portable SQL goes here; bind
//! placeholders come from `QueryBuilder`, so the same text runs on Postgres
//! and SQLite.

use sqlx::{Database, Encode, QueryBuilder, Type};

use crate::models::employee::{EmployeeSearch, SortDirection};

pub(crate) const EMPLOYEE_COLUMNS: &str =
    "employee_id, first_name, last_name, email, date_of_birth, is_active, created_date";

const SEARCHED_COLUMNS: [&str; 3] = ["first_name", "last_name", "email"];

/// Escapes `LIKE` wildcards so the search text matches literally.
pub(crate) fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Appends the substring filter over names and email, if the search has text.
pub(crate) fn push_filter<DB>(
    builder: &mut QueryBuilder<'static, DB>,
    search: &EmployeeSearch,
    case_sensitive: bool,
) where
    DB: Database,
    String: Encode<'static, DB> + Type<DB>,
{
    let Some(text) = &search.search_text else {
        return;
    };

    let pattern = format!("%{}%", escape_like(text));
    builder.push(" WHERE (");
    for (i, column) in SEARCHED_COLUMNS.iter().enumerate() {
        if i > 0 {
            builder.push(" OR ");
        }
        if case_sensitive {
            builder.push(column).push(" LIKE ").push_bind(pattern.clone());
        } else {
            builder
                .push("LOWER(")
                .push(column)
                .push(") LIKE LOWER(")
                .push_bind(pattern.clone())
                .push(")");
        }
        builder.push(" ESCAPE '\\'");
    }
    builder.push(")");
}

pub(crate) fn push_order<DB: Database>(builder: &mut QueryBuilder<'static, DB>, search: &EmployeeSearch) {
    match search.sort_column {
        Some(column) => {
            let nulls = match search.sort_direction {
                SortDirection::Ascending => "NULLS FIRST",
                SortDirection::Descending => "NULLS LAST",
            };
            builder
                .push(" ORDER BY ")
                .push(column.column_name())
                .push(" ")
                .push(search.sort_direction.as_sql())
                .push(" ")
                .push(nulls)
                .push(", employee_id ASC");
        }
        None => {
            builder.push(" ORDER BY employee_id ASC");
        }
    }
}

pub(crate) fn push_page<DB>(builder: &mut QueryBuilder<'static, DB>, search: &EmployeeSearch)
where
    DB: Database,
    i64: Encode<'static, DB> + Type<DB>,
{
    builder.push(" LIMIT ").push_bind(search.limit());
    builder.push(" OFFSET ").push_bind(search.offset());
}
