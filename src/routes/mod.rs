use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::services::ServiceError;

pub mod businesses;
pub mod categories;

/// Translates a service failure into a JSON error response.
pub fn error_response(err: ServiceError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        ServiceError::NotFound(_) => HttpResponse::NotFound().json(body),
        ServiceError::Conflict(_) => HttpResponse::Conflict().json(body),
        ServiceError::InvalidArgument(_)
        | ServiceError::Form(_)
        | ServiceError::TypeConstraint(_) => HttpResponse::BadRequest().json(body),
        ServiceError::Internal => HttpResponse::InternalServerError().json(body),
    }
}

/// JSON extractor settings reporting malformed bodies in the error format.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = error_response(ServiceError::Form(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}
