pub mod employee;

use actix_web::{web, HttpRequest};

use crate::errors::{ApiError, AppError};

/// Registers the employee routes together with extractor error handlers that
/// render rejected bodies, query strings and paths in the standard error shape.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| {
        AppError::BadRequest(err.to_string()).at(req.path()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, req| {
        AppError::BadRequest(err.to_string()).at(req.path()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, req| {
        AppError::BadRequest(err.to_string()).at(req.path()).into()
    }))
    .service(
        web::scope("/employees")
            .service(
                web::resource("")
                    .route(web::get().to(employee::get_employees))
                    .route(web::post().to(employee::create_employee)),
            )
            .service(web::resource("/counts").route(web::get().to(employee::get_counts)))
            .service(
                web::resource("/{id:\\d+}")
                    .route(web::get().to(employee::get_employee))
                    .route(web::put().to(employee::update_employee))
                    .route(web::delete().to(employee::delete_employee)),
            ),
    )
    .default_service(web::route().to(not_found));
}

async fn not_found(req: HttpRequest) -> Result<&'static str, ApiError> {
    Err(AppError::NotFound("Resource not found.".to_string()).at(req.path()))
}
