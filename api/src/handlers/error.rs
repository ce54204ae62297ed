//! Domain error to HTTP response mapping
//!
//! Every failed request ends here so status codes and error bodies stay
//! consistent across endpoints. Token failures are collapsed into a single
//! generic 401 so clients cannot tell an expired token from a forged one.

use actix_web::{error::InternalError, error::JsonPayloadError, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use bc_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use bc_shared::{error_codes, ErrorResponse};

/// Convert a domain error into the matching HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::AuthenticationFailed => HttpResponse::Unauthorized().json(
                ErrorResponse::new(error_codes::LOGIN_FAILED, "Invalid user id or password"),
            ),
            AuthError::InvalidRegistration(flags) => HttpResponse::BadRequest().json(
                ErrorResponse::new(error_codes::REGISTRATION_INVALID, "Registration data is invalid")
                    .add_detail("name_is_error", flags.name)
                    .add_detail("user_id_is_error", flags.user_id)
                    .add_detail("email_is_error", flags.email)
                    .add_detail("phone_number_is_error", flags.phone_number)
                    .add_detail("password_is_error", flags.password),
            ),
            AuthError::UserNotFound => HttpResponse::NotFound()
                .json(ErrorResponse::new(error_codes::NOT_FOUND, "User not found")),
            AuthError::UserAlreadyExists => HttpResponse::Conflict()
                .json(ErrorResponse::new(error_codes::CONFLICT, "User already exists")),
        },

        DomainError::Token(token_error) => match token_error {
            TokenError::TokenPersistenceFailed | TokenError::TokenGenerationFailed => {
                tracing::error!(error = %token_error, event = "token_issue_failed", "Could not issue session token");
                internal_error()
            }
            _ => unauthorized(),
        },

        DomainError::Unauthorized => unauthorized(),

        DomainError::Validation { message } => HttpResponse::BadRequest()
            .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())),

        DomainError::ValidationErr(validation_error) => {
            let field = match validation_error {
                ValidationError::RequiredField { field }
                | ValidationError::InvalidFormat { field }
                | ValidationError::InvalidLength { field, .. } => field.clone(),
            };
            HttpResponse::BadRequest().json(
                ErrorResponse::new(error_codes::VALIDATION_ERROR, validation_error.to_string())
                    .add_detail("field", field),
            )
        }

        DomainError::NotFound { resource } => HttpResponse::NotFound()
            .json(ErrorResponse::new(error_codes::NOT_FOUND, format!("{} not found", resource))),

        DomainError::Conflict { message } => HttpResponse::Conflict()
            .json(ErrorResponse::new(error_codes::CONFLICT, message.clone())),

        DomainError::Database(message) => {
            tracing::error!(error = %message, event = "database_error", "Database operation failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::DATABASE_ERROR,
                "A database error occurred",
            ))
        }

        DomainError::Cache(message) => {
            tracing::error!(error = %message, event = "cache_error", "Cache operation failed");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new(error_codes::CACHE_ERROR, "A storage error occurred"))
        }

        DomainError::Internal { message } => {
            tracing::error!(error = %message, event = "internal_error", "Internal error");
            internal_error()
        }
    }
}

/// 400 response listing the fields that failed DTO validation
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed");

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
        response = response.add_detail(field.to_string(), messages);
    }

    HttpResponse::BadRequest().json(response)
}

/// Turns unreadable JSON bodies into the standard 400 error body
pub fn json_error_handler(error: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %error, "Rejected malformed JSON body");

    let response = HttpResponse::BadRequest()
        .json(ErrorResponse::new(error_codes::BAD_REQUEST, error.to_string()));
    InternalError::from_response(error, response).into()
}

/// Generic 401 shared by every token failure
pub fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::UNAUTHORIZED,
        "Authentication required",
    ))
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        "An internal error occurred",
    ))
}
