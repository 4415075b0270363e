//! Probe API served on the webhook listener.
//!
//! Admission review handling is not part of this server yet; until it is,
//! the listener answers Kubernetes readiness and liveness probes.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Debug, Clone)]
struct ApiState {
    build: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Readiness {
    pub status: &'static str,
    pub build: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Liveness {
    pub status: &'static str,
    pub build: &'static str,
    pub version: &'static str,
}

/// Routes served by the webhook listener.
pub fn api(build: &'static str) -> Router {
    Router::new()
        .route("/readiness", get(readiness))
        .route("/liveness", get(liveness))
        .with_state(ApiState { build })
}

async fn readiness(State(state): State<ApiState>) -> Json<Readiness> {
    Json(Readiness {
        status: "ok",
        build: state.build,
    })
}

async fn liveness(State(state): State<ApiState>) -> Json<Liveness> {
    Json(Liveness {
        status: "ok",
        build: state.build,
        version: env!("CARGO_PKG_VERSION"),
    })
}
