//! Contains all the routes that this application can handle.

mod api;

// re-export errors
pub use api::waitlist::WaitlistError;

use crate::{web::Error, AppState};

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Used as the method fallback on routes that only accept a single method.
async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed
}

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes(app_state))
        .route("/health-check", get(health_check))
}

/// API - Routes nested under "/api" path
fn api_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/waitlist",
            post(api::waitlist_join).fallback(method_not_allowed),
        )
        .with_state(app_state)
}
