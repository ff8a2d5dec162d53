use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use hc_common::types::Subscriber;

use crate::{dispatch, error::PublisherError, state::AppState};

/// Largest accepted request body
pub const MAX_REQUEST_SIZE: usize = 1024 * 1024;

/// Create the Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/subscribers", post(register_subscriber))
        .route("/push", post(trigger_push))
        .layer(
            ServiceBuilder::new()
                .layer(RequestBodyLimitLayer::new(MAX_REQUEST_SIZE))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

/// Liveness probe, 200 with an empty body
async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Handle subscriber registrations.
///
/// Any payload that fails to decode as a registration gets a 400; a decoded
/// URL is stored and flushed before the 200 goes out.
async fn register_subscriber(
    State(state): State<AppState>,
    payload: Result<Json<Subscriber>, JsonRejection>,
) -> impl IntoResponse {
    let Json(subscriber) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            let err = PublisherError::Decode(rejection.body_text());
            warn!(%err, "rejected registration");
            return (StatusCode::BAD_REQUEST, err.to_string());
        }
    };

    match state.registry.register(&subscriber.webhook_url).await {
        Ok(inserted) => {
            info!(
                url = %subscriber.webhook_url,
                already_registered = !inserted,
                "subscriber registered"
            );
            (StatusCode::OK, String::new())
        }
        Err(err) => {
            error!(%err, "failed to persist registration");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

/// Fan the push notification out to every registered subscriber.
///
/// The response body lists the attempted URLs one per line; subscribers
/// that failed delivery are listed too, since they were attempted before
/// being dropped.
async fn trigger_push(State(state): State<AppState>) -> impl IntoResponse {
    match dispatch::push_all(&state.registry, &state.notifier).await {
        Ok(targets) => (StatusCode::OK, targets.join("\n")),
        Err(err) => {
            error!(%err, "push cycle failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
