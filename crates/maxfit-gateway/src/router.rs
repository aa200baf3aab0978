//! Axum router wiring.
//!
//! Dashboard pages sit behind the plan-access gate; the profile API checks
//! its own session; ops endpoints are open.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;
use crate::gate::middleware::require_plan_access;
use crate::ops;
use crate::services::{assistant, profile, programs};

pub fn build_router(state: AppState) -> Router {
    let dashboard = Router::new()
        .route("/dashboard", get(assistant::dashboard))
        .route("/dashboard/ai-assistant", get(assistant::call_config))
        .route("/dashboard/workout-plan", get(programs::workout_plan))
        .route("/dashboard/nutrition-plan", get(programs::nutrition_plan))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_plan_access,
        ));

    Router::new()
        .merge(dashboard)
        .route("/api/users/update-name", post(profile::update_name))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
