use axum::{extract::State, Extension, Json};
use serde::Serialize;

use maxfit_core::assistant::{CallConfig, CallProfile};
use maxfit_core::tier::SubscriptionTier;

use crate::app_state::AppState;
use crate::context::SessionUser;
use crate::services::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub user: SessionUser,
    /// Dashboard sections this user's plan opens.
    pub sections: Vec<Section>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub route: &'static str,
    pub allowed: bool,
    pub required_tier: Option<SubscriptionTier>,
}

const SECTIONS: [&str; 3] = [
    "/dashboard/ai-assistant",
    "/dashboard/workout-plan",
    "/dashboard/nutrition-plan",
];

/// `GET /dashboard`
pub async fn dashboard(
    State(app): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Json<DashboardSummary> {
    let policy = app.policy();
    let sections = SECTIONS
        .into_iter()
        .map(|route| Section {
            route,
            allowed: policy.is_allowed(user.tier, route),
            required_tier: policy.required_tier(route),
        })
        .collect();
    Json(DashboardSummary { user, sections })
}

/// `GET /dashboard/ai-assistant`: call configuration for the voice SDK.
pub async fn call_config(
    State(app): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<CallConfig>, ApiError> {
    let profile = CallProfile {
        email: Some(user.email),
        first_name: Some(user.first_name),
        last_name: Some(user.last_name),
        language: Some(user.language),
        gender: user.gender,
    };
    let cfg = app.cfg().assistant.resolve(&profile)?;
    tracing::debug!(
        workflow = %cfg.workflow_id,
        language = %cfg.language,
        "assistant call configured"
    );
    Ok(Json(cfg))
}
