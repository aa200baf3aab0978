use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;

use maxfit_core::error::MaxFitError;
use maxfit_core::profile::ProfileUpdateRequest;

use crate::app_state::AppState;
use crate::context::session::bearer_token;
use crate::services::ApiError;
use crate::store::UserRecord;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub language: String,
}

impl From<UserRecord> for ProfileView {
    fn from(u: UserRecord) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            language: u.language,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub success: bool,
    pub user: ProfileView,
    pub message: &'static str,
}

/// `POST /api/users/update-name`
///
/// Requires a session; a user may only update their own profile.
pub async fn update_name(
    State(app): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ProfileUpdateRequest>, JsonRejection>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let res = update_name_inner(&app, &headers, body).await;
    let outcome = match &res {
        Ok(_) => "ok",
        Err(e) => e.0.client_code().as_str(),
    };
    app.metrics().profile_updates.inc(&[("outcome", outcome)]);
    res
}

async fn update_name_inner(
    app: &AppState,
    headers: &HeaderMap,
    body: Result<Json<ProfileUpdateRequest>, JsonRejection>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let token = bearer_token(headers).ok_or(MaxFitError::AuthFailed)?;
    let session = app
        .sessions()
        .resolve(token)
        .await?
        .ok_or(MaxFitError::AuthFailed)?;

    let Json(req) =
        body.map_err(|e| MaxFitError::BadRequest(format!("invalid request body: {e}")))?;
    let update = req.validate()?;

    if update.email != session.email {
        return Err(MaxFitError::NotAllowed("cannot update another user's profile".into()).into());
    }

    let user = app
        .users()
        .find_by_email(&update.email)
        .await?
        .ok_or_else(|| MaxFitError::NotFound("User not found".into()))?;

    let updated = app.users().update_profile(&user.id, &update).await?;
    tracing::info!(user = %updated.id, language = %updated.language, "profile updated");

    Ok(Json(UpdateResponse {
        success: true,
        user: updated.into(),
        message: "Profile updated successfully",
    }))
}
