//! HTTP surface.

pub mod auth;
pub mod user;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use marquee_core::mailer::Mailer;
use marquee_core::repository::AccountRepository;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::state::AppState;

/// Build the full application router.
pub fn router<R, M>(state: AppState<R, M>) -> Router
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/", get(root))
        .nest("/api/auth", auth::routes())
        .nest("/api/user", user::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "API WORKING"
}

/// Credentialed CORS for the configured frontend origins.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let mut allowed = Vec::new();
    for origin in origins {
        match origin.parse::<HeaderValue>() {
            Ok(value) => allowed.push(value),
            Err(_) => warn!(origin = %origin, "Ignoring invalid CORS origin"),
        }
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
