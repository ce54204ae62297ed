//! Chat endpoints; every handler requires an [`AuthContext`]

use actix_web::{web, HttpResponse};
use validator::Validate;

use bc_core::repositories::{ChatRepository, MessageStore, SessionStore, UserRepository};

use crate::app::AppState;
use crate::dto::{
    ChatListResponse, CreateChatRequest, CreateChatResponse, GetMessagesRequest, MessageView,
    MessagesResponse, SendMessageRequest, SendMessageResponse,
};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::middleware::AuthContext;

/// Handler for POST /api/v1/chat/create
///
/// Opens a chat between the caller and `to_user_id`.
///
/// ## Errors
/// - 400 Bad Request: missing target or a chat with oneself
/// - 404 Not Found: the target user does not exist
/// - 409 Conflict: the two users already share a chat
pub async fn create_chat<U, C, M, S>(
    state: web::Data<AppState<U, C, M, S>>,
    auth: AuthContext,
    request: web::Json<CreateChatRequest>,
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

    match state
        .chat_service
        .create_chat(&auth.user_id, &request.to_user_id)
        .await
    {
        Ok(chat_id) => HttpResponse::Ok().json(CreateChatResponse { chat_id }),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /api/v1/chat/send
///
/// 404 when the chat does not exist or the caller is not a member.
pub async fn send_message<U, C, M, S>(
    state: web::Data<AppState<U, C, M, S>>,
    auth: AuthContext,
    request: web::Json<SendMessageRequest>,
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

    match state
        .chat_service
        .send_message(&auth.user_id, &request.chat_id, &request.message)
        .await
    {
        Ok(message) => HttpResponse::Ok().json(SendMessageResponse {
            message_id: message.message_id,
            sent_at: message.sent_at,
        }),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /api/v1/chat/get
pub async fn get_messages<U, C, M, S>(
    state: web::Data<AppState<U, C, M, S>>,
    auth: AuthContext,
    request: web::Json<GetMessagesRequest>,
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

    match state
        .chat_service
        .get_messages(&auth.user_id, &request.chat_id)
        .await
    {
        Ok(messages) => HttpResponse::Ok().json(MessagesResponse {
            messages: messages.into_iter().map(MessageView::from).collect(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/chat/list
pub async fn list_chats<U, C, M, S>(
    state: web::Data<AppState<U, C, M, S>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ChatRepository + 'static,
    M: MessageStore + 'static,
    S: SessionStore + 'static,
{
    match state.chat_service.list_chats(&auth.user_id).await {
        Ok(chat_ids) => HttpResponse::Ok().json(ChatListResponse { chat_ids }),
        Err(error) => handle_domain_error(&error),
    }
}
