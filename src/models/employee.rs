use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub employee_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: bool,
    pub created_date: DateTime<Utc>,
}

/// Writable fields of an employee, used both for creation and as the patch
/// applied by an update.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: bool,
}

impl EmployeeInput {
    /// Overwrites every mutable field of `employee`. `employee_id` and
    /// `created_date` are left as they are.
    pub fn apply_to(&self, employee: &mut Employee) {
        employee.first_name = self.first_name.clone();
        employee.last_name = self.last_name.clone();
        employee.email = self.email.clone();
        employee.date_of_birth = self.date_of_birth;
        employee.is_active = self.is_active;
    }
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmployeeCounts {
    pub total: i64,
    pub active: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    FirstName,
    LastName,
    Email,
    DateOfBirth,
    IsActive,
    CreatedDate,
}

impl SortColumn {
    /// Matches against the allow-list, ignoring case. Anything else yields
    /// `None`, which callers treat as "order by id".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "firstname" => Some(SortColumn::FirstName),
            "lastname" => Some(SortColumn::LastName),
            "email" => Some(SortColumn::Email),
            "dateofbirth" => Some(SortColumn::DateOfBirth),
            "isactive" => Some(SortColumn::IsActive),
            "createddate" => Some(SortColumn::CreatedDate),
            _ => None,
        }
    }

    pub fn column_name(self) -> &'static str {
        match self {
            SortColumn::FirstName => "first_name",
            SortColumn::LastName => "last_name",
            SortColumn::Email => "email",
            SortColumn::DateOfBirth => "date_of_birth",
            SortColumn::IsActive => "is_active",
            SortColumn::CreatedDate => "created_date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("desc") => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// A normalized search/sort/paginate request.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeSearch {
    pub search_text: Option<String>,
    pub sort_column: Option<SortColumn>,
    pub sort_direction: SortDirection,
    pub page_number: i64,
    pub page_size: i64,
}

impl EmployeeSearch {
    pub fn new(
        search_text: Option<&str>,
        sort_column: Option<&str>,
        sort_direction: Option<&str>,
        page_number: i64,
        page_size: i64,
    ) -> Self {
        let search_text = search_text
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            search_text,
            sort_column: sort_column.and_then(SortColumn::parse),
            sort_direction: SortDirection::parse(sort_direction),
            page_number,
            page_size,
        }
    }

    pub fn offset(&self) -> i64 {
        if self.page_number <= 1 {
            0
        } else {
            (self.page_number - 1).saturating_mul(self.limit())
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size.max(0)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_count: i64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            total_count: self.total_count,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
