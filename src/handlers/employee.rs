use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{ApiError, AppError};
use crate::models::employee::{Employee, EmployeeInput, EmployeeSearch};
use crate::services::employee::EmployeeService;
use crate::utils::validation::{not_blank, validate_payload};

pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Body of `POST /employees` and `PUT /employees/{id}`.
#[derive(Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    #[validate(
        required(message = "The firstName field is required."),
        custom = "not_blank",
        length(max = 50, message = "The firstName field must be at most 50 characters.")
    )]
    first_name: Option<String>,
    #[validate(
        required(message = "The lastName field is required."),
        custom = "not_blank",
        length(max = 50, message = "The lastName field must be at most 50 characters.")
    )]
    last_name: Option<String>,
    #[validate(
        required(message = "The email field is required."),
        email(message = "The email field is not a valid e-mail address."),
        length(max = 100, message = "The email field must be at most 100 characters.")
    )]
    email: Option<String>,
    date_of_birth: Option<NaiveDate>,
    is_active: Option<bool>,
}

impl EmployeePayload {
    /// Converts a validated payload. Missing `isActive` means active.
    fn into_input(self) -> EmployeeInput {
        EmployeeInput {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            date_of_birth: self.date_of_birth,
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    employee_id: i32,
    first_name: String,
    last_name: String,
    email: String,
    date_of_birth: Option<NaiveDate>,
    is_active: bool,
    created_date: DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        Self {
            employee_id: e.employee_id,
            first_name: e.first_name,
            last_name: e.last_name,
            email: e.email,
            date_of_birth: e.date_of_birth,
            is_active: e.is_active,
            created_date: e.created_date,
        }
    }
}

/// Paging values pass through unclamped: a size of zero or less yields an
/// empty page that still reports `totalCount`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeQueryParams {
    search: Option<String>,
    sort_column: Option<String>,
    sort_direction: Option<String>,
    page_number: Option<i64>,
    page_size: Option<i64>,
}

impl EmployeeQueryParams {
    fn to_search(&self) -> EmployeeSearch {
        EmployeeSearch::new(
            self.search.as_deref(),
            self.sort_column.as_deref(),
            self.sort_direction.as_deref(),
            self.page_number.unwrap_or(1),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

pub async fn get_employees(
    req: HttpRequest,
    service: web::Data<EmployeeService>,
    query: web::Query<EmployeeQueryParams>,
) -> Result<HttpResponse, ApiError> {
    let page = service
        .search_and_paginate(&query.to_search())
        .await
        .map_err(|err| err.at(req.path()))?;

    Ok(HttpResponse::Ok().json(page.map(EmployeeResponse::from)))
}

pub async fn get_employee(
    req: HttpRequest,
    service: web::Data<EmployeeService>,
    id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let employee = service
        .get_by_id(id.into_inner())
        .await
        .map_err(|err| err.at(req.path()))?
        .ok_or_else(|| AppError::employee_not_found().at(req.path()))?;

    Ok(HttpResponse::Ok().json(EmployeeResponse::from(employee)))
}

pub async fn create_employee(
    req: HttpRequest,
    service: web::Data<EmployeeService>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, ApiError> {
    validate_payload(&*payload).map_err(|err| err.at(req.path()))?;

    let created = service
        .create(payload.into_inner().into_input())
        .await
        .map_err(|err| err.at(req.path()))?;

    let location = format!("{}/{}", req.path().trim_end_matches('/'), created.employee_id);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(EmployeeResponse::from(created)))
}

pub async fn update_employee(
    req: HttpRequest,
    service: web::Data<EmployeeService>,
    id: web::Path<i32>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, ApiError> {
    validate_payload(&*payload).map_err(|err| err.at(req.path()))?;

    let updated = service
        .update(id.into_inner(), payload.into_inner().into_input())
        .await
        .map_err(|err| err.at(req.path()))?;

    Ok(HttpResponse::Ok().json(EmployeeResponse::from(updated)))
}

/// Always answers 204 for a well-formed id: deleting an unknown employee is
/// treated as already done.
pub async fn delete_employee(
    req: HttpRequest,
    service: web::Data<EmployeeService>,
    id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    match service.delete(id.into_inner()).await {
        Ok(()) | Err(AppError::NotFound(_)) => Ok(HttpResponse::NoContent().finish()),
        Err(err) => Err(err.at(req.path())),
    }
}

pub async fn get_counts(
    req: HttpRequest,
    service: web::Data<EmployeeService>,
) -> Result<HttpResponse, ApiError> {
    let counts = service
        .get_counts()
        .await
        .map_err(|err| err.at(req.path()))?;

    Ok(HttpResponse::Ok().json(counts))
}
