use actix_web::{web, HttpResponse};
use validator::Validate;

use bc_core::repositories::{ChatRepository, MessageStore, SessionStore, UserRepository};

use crate::app::AppState;
use crate::dto::{LoginRequest, LoginResponse};
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/login
///
/// Issues a bearer token for the user. Logging in again supersedes the
/// previous token, which stops validating immediately.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "token": "eyJ...", "token_type": "Bearer", "expires_in": 1800 }
/// ```
///
/// ## Errors
/// - 400 Bad Request: empty user id or password
/// - 401 Unauthorized: unknown user or wrong password
/// - 500 Internal Server Error: the session could not be stored
pub async fn login<U, C, M, S>(
    state: web::Data<AppState<U, C, M, S>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ChatRepository + 'static,
    M: MessageStore + 'static,
    S: SessionStore + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let LoginRequest { user_id, password } = request.into_inner();

    match state.auth_service.login(&user_id, &password).await {
        Ok(result) => HttpResponse::Ok().json(LoginResponse::from(result)),
        Err(error) => handle_domain_error(&error),
    }
}
