//! HTTP handlers of the person API and the mapping of service errors to JSON
//! responses.

use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::forms::FieldError;
use crate::services::ServiceError;

pub mod person;
pub mod search;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl ErrorResponse {
    fn new(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
            details: Vec::new(),
        }
    }
}

/// Converts a service failure into its HTTP response.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Validation(details) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_error",
            message: "One or more fields are invalid.".to_string(),
            details,
        }),
        ServiceError::BadRequest(message) => {
            HttpResponse::BadRequest().json(ErrorResponse::new("bad_request", message))
        }
        ServiceError::NotFound(message) => {
            HttpResponse::NotFound().json(ErrorResponse::new("not_found", message))
        }
        ServiceError::Conflict(message) => {
            HttpResponse::Conflict().json(ErrorResponse::new("conflict", message))
        }
        ServiceError::Internal(message) => {
            log::error!("Request failed: {message}");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error",
                "An unexpected error occurred.",
            ))
        }
    }
}

/// Registers every handler plus JSON error bodies for malformed input.
///
/// Search routes are registered before `/person/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(
            "bad_request",
            format!("Malformed request body: {err}"),
        ));
        InternalError::from_response(err, response).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        let response =
            HttpResponse::NotFound().json(ErrorResponse::new("not_found", "Resource not found."));
        InternalError::from_response(err, response).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(
            "bad_request",
            format!("Malformed query string: {err}"),
        ));
        InternalError::from_response(err, response).into()
    }))
    .service(search::search_by_name)
    .service(search::search_by_document)
    .service(search::search_by_birth_date)
    .service(search::multiple_phones)
    .service(search::multiple_addresses)
    .service(person::list_people)
    .service(person::create_person)
    .service(person::get_person)
    .service(person::update_person)
    .service(person::delete_person);
}
