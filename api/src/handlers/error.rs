//! Domain error to HTTP response translation.
//!
//! The mapping enforces the disclosure policy in one place: validation
//! errors answer with field maps, auth failures answer with their own
//! (opaque) message, and everything infrastructural collapses into a
//! generic 500 whose detail exists only in the server log.

use actix_web::HttpResponse;
use std::collections::HashMap;
use validator::ValidationErrors;

use ag_core::errors::{AuthError, DomainError, TokenError};

use crate::dto::auth::DetailResponse;

/// Convert a domain error into its HTTP response.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::ValidationErr(validation) => {
            let mut fields: HashMap<String, Vec<String>> = HashMap::new();
            fields.insert(
                validation.field().to_string(),
                vec![validation.to_string()],
            );
            HttpResponse::BadRequest().json(fields)
        }

        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(DetailResponse::new(message))
        }

        DomainError::Auth(auth) => match auth {
            AuthError::InvalidCredentials => {
                HttpResponse::Unauthorized().json(DetailResponse::new(auth.to_string()))
            }
            AuthError::InvalidResetToken => {
                HttpResponse::BadRequest().json(DetailResponse::new(auth.to_string()))
            }
            AuthError::UserAlreadyExists => {
                let mut fields: HashMap<String, Vec<String>> = HashMap::new();
                fields.insert("email".to_string(), vec![auth.to_string()]);
                HttpResponse::BadRequest().json(fields)
            }
            AuthError::RateLimitExceeded => {
                HttpResponse::TooManyRequests().json(DetailResponse::new(auth.to_string()))
            }
        },

        DomainError::Token(token) => match token {
            TokenError::TokenGenerationFailed => {
                log::error!("token generation failed");
                internal_error()
            }
            other => HttpResponse::Unauthorized().json(DetailResponse::new(other.to_string())),
        },

        DomainError::NotFound { resource } => {
            HttpResponse::NotFound().json(DetailResponse::new(format!("Not found: {}", resource)))
        }

        DomainError::Internal { message } => {
            log::error!("internal error: {}", message);
            internal_error()
        }
    }
}

/// Convert DTO validation failures into the same field-map shape the domain
/// validation errors use.
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    let mut fields: HashMap<String, Vec<String>> = HashMap::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        fields.insert(field.to_string(), messages);
    }

    HttpResponse::BadRequest().json(fields)
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError()
        .json(DetailResponse::new("An internal error occurred. Please try again later."))
}
