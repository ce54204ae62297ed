//! Application state and factory
//!
//! This module wires the services into shared state and builds the
//! Actix-web application used by both the binary and the integration tests.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use bc_core::repositories::{ChatRepository, MessageStore, SessionStore, UserRepository};
use bc_core::services::{AuthService, AuthServiceConfig, ChatService, SessionManager};
use bc_shared::{error_codes, AppConfig, ErrorResponse};

use crate::handlers::json_error_handler;
use crate::middleware::{create_cors, SecurityMiddleware, SessionAuth, SessionAuthenticator};
use crate::routes::{auth, chat, users};

/// Services shared by every request handler
pub struct AppState<U, C, M, S>
where
    U: UserRepository,
    C: ChatRepository,
    M: MessageStore,
    S: SessionStore,
{
    pub auth_service: Arc<AuthService<U, S>>,
    pub chat_service: Arc<ChatService<C, U, M>>,
    pub session_manager: Arc<SessionManager<S>>,
}

impl<U, C, M, S> AppState<U, C, M, S>
where
    U: UserRepository,
    C: ChatRepository,
    M: MessageStore,
    S: SessionStore,
{
    /// Build the services around one session manager
    ///
    /// The same manager backs login and the chat middleware, so a token
    /// issued here validates there.
    pub fn new(
        user_repository: Arc<U>,
        chat_repository: Arc<C>,
        message_store: Arc<M>,
        session_manager: Arc<SessionManager<S>>,
        auth_config: AuthServiceConfig,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(
            user_repository.clone(),
            session_manager.clone(),
            auth_config,
        ));
        let chat_service = Arc::new(ChatService::new(
            chat_repository,
            user_repository,
            message_store,
        ));

        Self {
            auth_service,
            chat_service,
            session_manager,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, C, M, S>(
    app_state: web::Data<AppState<U, C, M, S>>,
    config: &AppConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    C: ChatRepository + 'static,
    M: MessageStore + 'static,
    S: SessionStore + 'static,
{
    let authenticator: Arc<dyn SessionAuthenticator> = app_state.session_manager.clone();

    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(authenticator))
        .app_data(json_config)
        // Middleware order: the last wrap runs first
        .wrap(SecurityMiddleware::for_environment(config.environment))
        .wrap(create_cors(&config.cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/users")
                        .route("/register", web::post().to(users::register::<U, C, M, S>)),
                )
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth::login::<U, C, M, S>)),
                )
                .service(
                    web::scope("/chat")
                        .wrap(SessionAuth::new())
                        .route("/create", web::post().to(chat::create_chat::<U, C, M, S>))
                        .route("/send", web::post().to(chat::send_message::<U, C, M, S>))
                        .route("/get", web::post().to(chat::get_messages::<U, C, M, S>))
                        .route("/list", web::get().to(chat::list_chats::<U, C, M, S>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "bchat-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
