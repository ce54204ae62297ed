//! Bearer-token session middleware for the chat endpoints.
//!
//! Reads the token from the `Authorization` header, resolves it to a user id
//! through the process-wide session manager and injects an [`AuthContext`]
//! into the request. Any failure ends the request with one generic 401.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use bc_core::repositories::SessionStore;
use bc_core::services::SessionManager;

use crate::handlers::error::unauthorized;

/// Authenticated caller injected into requests behind [`SessionAuth`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Public user id carried as the token subject
    pub user_id: String,
}

/// Object-safe view of the session manager used by the middleware
///
/// The middleware is not generic over the session store, so the manager is
/// registered as `web::Data<Arc<dyn SessionAuthenticator>>`.
#[async_trait]
pub trait SessionAuthenticator: Send + Sync {
    /// Subject of `token` when it is accepted, `None` otherwise
    async fn authenticate(&self, token: &str) -> Option<String>;
}

#[async_trait]
impl<S: SessionStore + 'static> SessionAuthenticator for SessionManager<S> {
    async fn authenticate(&self, token: &str) -> Option<String> {
        SessionManager::authenticate(self, token).await
    }
}

/// Session authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionAuth;

impl SessionAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Session authentication middleware service
pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    tracing::debug!(path = %req.path(), "Missing or malformed Authorization header");
                    return Ok(reject(req));
                }
            };

            let authenticator = match req.app_data::<web::Data<Arc<dyn SessionAuthenticator>>>() {
                Some(authenticator) => authenticator.clone(),
                None => {
                    tracing::error!("Session authenticator is not registered in app data");
                    return Ok(reject(req));
                }
            };

            let user_id = match authenticator.authenticate(&token).await {
                Some(user_id) => user_id,
                None => {
                    tracing::debug!(path = %req.path(), event = "token_rejected", "Rejected bearer token");
                    return Ok(reject(req));
                }
            };

            req.extensions_mut().insert(AuthContext { user_id });

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Extracts the token from `Authorization: Bearer {token}`
pub fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

// Every rejection gets the same body; the cause is only logged
fn reject<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
    req.into_response(unauthorized()).map_into_right_body()
}

/// Extractor for the authenticated caller
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
