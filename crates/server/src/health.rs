//! The minimal health/debug HTTP surface from §10.6: liveness and
//! readiness only, no matching/business endpoints — tender ingestion is
//! broker-driven exclusively.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

/// Flipped once the broker channel and DB pool are both established at
/// startup; read by `GET /health/ready`.
#[derive(Clone, Default)]
pub struct ReadinessState {
    db_ready: Arc<AtomicBool>,
    broker_ready: Arc<AtomicBool>,
}

impl ReadinessState {
    pub fn mark_db_ready(&self) {
        self.db_ready.store(true, Ordering::SeqCst);
    }

    pub fn mark_broker_ready(&self) {
        self.broker_ready.store(true, Ordering::SeqCst);
    }

    fn is_ready(&self) -> bool {
        self.db_ready.load(Ordering::SeqCst) && self.broker_ready.load(Ordering::SeqCst)
    }
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

pub fn router(state: ReadinessState) -> Router {
    Router::new()
        .route("/health", get(liveness))
        .route("/health/ready", get(readiness))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn liveness() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn readiness(
    axum::extract::State(state): axum::extract::State<ReadinessState>,
) -> (axum::http::StatusCode, Json<HealthBody>) {
    if state.is_ready() {
        (axum::http::StatusCode::OK, Json(HealthBody { status: "ready" }))
    } else {
        (axum::http::StatusCode::SERVICE_UNAVAILABLE, Json(HealthBody { status: "not_ready" }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readiness_requires_both_flags() {
        let state = ReadinessState::default();
        assert!(!state.is_ready());
        state.mark_db_ready();
        assert!(!state.is_ready());
        state.mark_broker_ready();
        assert!(state.is_ready());
    }
}
