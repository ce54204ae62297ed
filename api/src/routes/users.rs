use actix_web::{web, HttpResponse};

use bc_core::repositories::{ChatRepository, MessageStore, SessionStore, UserRepository};

use crate::app::AppState;
use crate::dto::{RegisterRequest, RegisterResponse};
use crate::handlers::handle_domain_error;

/// Handler for POST /api/v1/users/register
///
/// # Request Body
///
/// ```json
/// {
///     "user_id": "alice_01",
///     "email": "alice@example.com",
///     "name": "Alice",
///     "password": "correct horse",
///     "phone_number": "+14155550123"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// { "user_id": "alice_01" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: `details` carries one `*_is_error` flag per field;
///   a taken user id sets `user_id_is_error`
pub async fn register<U, C, M, S>(
    state: web::Data<AppState<U, C, M, S>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ChatRepository + 'static,
    M: MessageStore + 'static,
    S: SessionStore + 'static,
{
    match state.auth_service.register(request.into_inner().into()).await {
        Ok(user) => HttpResponse::Created().json(RegisterResponse {
            user_id: user.user_id,
        }),
        Err(error) => handle_domain_error(&error),
    }
}
