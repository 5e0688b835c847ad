use log::info;
use std::sync::Arc;

use crate::db::EmployeeRepository;
use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeCounts, EmployeeInput, EmployeeSearch, Page};

/// Business rules over an [`EmployeeRepository`]: emails stay unique and
/// writes target existing rows.
#[derive(Clone)]
pub struct EmployeeService {
    repo: Arc<dyn EmployeeRepository>,
}

impl EmployeeService {
    pub fn new(repo: Arc<dyn EmployeeRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.repo.get_all().await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Employee>, AppError> {
        Ok(self.repo.get_by_id(id).await?)
    }

    pub async fn create(&self, input: EmployeeInput) -> Result<Employee, AppError> {
        if self.repo.email_exists(&input.email, None).await? {
            return Err(AppError::email_taken());
        }

        let employee = self.repo.add(&input).await?;
        info!("Created employee {}", employee.employee_id);
        Ok(employee)
    }

    pub async fn update(&self, id: i32, patch: EmployeeInput) -> Result<Employee, AppError> {
        let mut existing = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(AppError::employee_not_found)?;

        if self.repo.email_exists(&patch.email, Some(id)).await? {
            return Err(AppError::email_taken());
        }

        patch.apply_to(&mut existing);

        let updated = self
            .repo
            .update(&existing)
            .await?
            .ok_or_else(AppError::employee_not_found)?;
        info!("Updated employee {}", id);
        Ok(updated)
    }

    /// Soft-deletes the employee. Fails with `NotFound` for unknown ids.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if self.repo.get_by_id(id).await?.is_none() {
            return Err(AppError::employee_not_found());
        }

        self.repo.soft_delete(id).await?;
        info!("Deactivated employee {}", id);
        Ok(())
    }

    pub async fn get_counts(&self) -> Result<EmployeeCounts, AppError> {
        Ok(self.repo.counts().await?)
    }

    pub async fn search_and_paginate(&self, search: &EmployeeSearch) -> Result<Page<Employee>, AppError> {
        Ok(self.repo.search_and_paginate(search).await?)
    }
}
