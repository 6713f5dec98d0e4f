//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: infrastructure wiring (repositories, notification sink)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get, routing::post};

use staffhq_auth::{Hs256TokenVerifier, TokenVerifier};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(jwt_secret: String) -> Router {
    let verifier: Arc<dyn TokenVerifier> =
        Arc::new(Hs256TokenVerifier::new(jwt_secret.as_bytes()));
    build_app_with(verifier, Arc::new(AppServices::in_memory()))
}

/// Build the router against explicit collaborators (tests inject fakes here).
pub fn build_app_with(verifier: Arc<dyn TokenVerifier>, services: Arc<AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        verifier,
        users: Arc::clone(&services.users),
        companies: Arc::clone(&services.companies),
    };

    // Protected routes: require auth + tenant context.
    let protected = routes::router()
        .layer(Extension(Arc::clone(&services)))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    // Public surface: health probe and company sign-up.
    Router::new()
        .route("/health", get(routes::system::health))
        .route("/companies/register", post(routes::companies::register))
        .layer(Extension(services))
        .merge(protected)
}
