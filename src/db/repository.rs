use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sqlx::{Database, Pool, Postgres, QueryBuilder, Sqlite};

use super::queries::{push_filter, push_order, push_page, EMPLOYEE_COLUMNS};
use super::{EmployeeRepository, RepositoryError};
use crate::models::employee::{Employee, EmployeeCounts, EmployeeInput, EmployeeSearch, Page};

/// Employee storage over any sqlx pool. Postgres serves production; SQLite
/// (usually `sqlite::memory:`) serves database-free runs and tests. Both run
/// the same statements.
pub struct SqlEmployeeRepository<DB: Database> {
    pool: Pool<DB>,
    case_sensitive_search: bool,
}

pub type PgEmployeeRepository = SqlEmployeeRepository<Postgres>;
pub type SqliteEmployeeRepository = SqlEmployeeRepository<Sqlite>;

impl<DB: Database> SqlEmployeeRepository<DB> {
    pub fn new(pool: Pool<DB>, case_sensitive_search: bool) -> Self {
        Self {
            pool,
            case_sensitive_search,
        }
    }
}

macro_rules! impl_employee_repository {
    ($db:ty) => {
        #[async_trait]
        impl EmployeeRepository for SqlEmployeeRepository<$db> {
            async fn get_all(&self) -> Result<Vec<Employee>, RepositoryError> {
                let mut query = QueryBuilder::<$db>::new(format!(
                    "SELECT {} FROM employees ORDER BY employee_id",
                    EMPLOYEE_COLUMNS
                ));
                let employees = query.build_query_as::<Employee>().fetch_all(&self.pool).await?;
                Ok(employees)
            }

            async fn get_by_id(&self, id: i32) -> Result<Option<Employee>, RepositoryError> {
                let mut query = QueryBuilder::<$db>::new(format!(
                    "SELECT {} FROM employees WHERE employee_id = ",
                    EMPLOYEE_COLUMNS
                ));
                query.push_bind(id);
                let employee = query
                    .build_query_as::<Employee>()
                    .fetch_optional(&self.pool)
                    .await?;
                Ok(employee)
            }

            async fn add(&self, input: &EmployeeInput) -> Result<Employee, RepositoryError> {
                let mut query = QueryBuilder::<$db>::new(
                    "INSERT INTO employees \
                     (first_name, last_name, email, date_of_birth, is_active, created_date) ",
                );
                query.push_values(std::iter::once(input), |mut row, input| {
                    row.push_bind(input.first_name.clone())
                        .push_bind(input.last_name.clone())
                        .push_bind(input.email.clone())
                        .push_bind(input.date_of_birth)
                        .push_bind(input.is_active)
                        .push_bind(Utc::now());
                });
                query.push(format!(" RETURNING {}", EMPLOYEE_COLUMNS));

                let employee = query.build_query_as::<Employee>().fetch_one(&self.pool).await?;
                Ok(employee)
            }

            async fn update(&self, employee: &Employee) -> Result<Option<Employee>, RepositoryError> {
                let mut query = QueryBuilder::<$db>::new("UPDATE employees SET ");
                let mut fields = query.separated(", ");
                fields.push("first_name = ").push_bind_unseparated(employee.first_name.clone());
                fields.push("last_name = ").push_bind_unseparated(employee.last_name.clone());
                fields.push("email = ").push_bind_unseparated(employee.email.clone());
                fields.push("date_of_birth = ").push_bind_unseparated(employee.date_of_birth);
                fields.push("is_active = ").push_bind_unseparated(employee.is_active);
                query.push(" WHERE employee_id = ").push_bind(employee.employee_id);
                query.push(format!(" RETURNING {}", EMPLOYEE_COLUMNS));

                let updated = query
                    .build_query_as::<Employee>()
                    .fetch_optional(&self.pool)
                    .await?;
                Ok(updated)
            }

            async fn soft_delete(&self, id: i32) -> Result<(), RepositoryError> {
                let mut query = QueryBuilder::<$db>::new("UPDATE employees SET is_active = ");
                query.push_bind(false).push(" WHERE employee_id = ").push_bind(id);
                query.build().execute(&self.pool).await?;
                Ok(())
            }

            async fn email_exists(
                &self,
                email: &str,
                exclude_id: Option<i32>,
            ) -> Result<bool, RepositoryError> {
                let mut query =
                    QueryBuilder::<$db>::new("SELECT COUNT(*) FROM employees WHERE LOWER(email) = LOWER(");
                query.push_bind(email.to_string()).push(")");
                if let Some(id) = exclude_id {
                    query.push(" AND employee_id <> ").push_bind(id);
                }

                let matches = query.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
                Ok(matches > 0)
            }

            async fn search_and_paginate(
                &self,
                search: &EmployeeSearch,
            ) -> Result<Page<Employee>, RepositoryError> {
                let mut count = QueryBuilder::<$db>::new("SELECT COUNT(*) FROM employees");
                push_filter(&mut count, search, self.case_sensitive_search);
                debug!("Counting employees: {}", count.sql());
                let total_count = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

                let mut page =
                    QueryBuilder::<$db>::new(format!("SELECT {} FROM employees", EMPLOYEE_COLUMNS));
                push_filter(&mut page, search, self.case_sensitive_search);
                push_order(&mut page, search);
                push_page(&mut page, search);
                debug!("Fetching employee page: {}", page.sql());
                let items = page.build_query_as::<Employee>().fetch_all(&self.pool).await?;

                Ok(Page { total_count, items })
            }

            async fn counts(&self) -> Result<EmployeeCounts, RepositoryError> {
                let mut query = QueryBuilder::<$db>::new(
                    "SELECT COUNT(*) AS total, \
                     COUNT(CASE WHEN is_active THEN 1 END) AS active FROM employees",
                );
                let counts = query
                    .build_query_as::<EmployeeCounts>()
                    .fetch_one(&self.pool)
                    .await?;
                Ok(counts)
            }
        }
    };
}

impl_employee_repository!(Postgres);
impl_employee_repository!(Sqlite);
