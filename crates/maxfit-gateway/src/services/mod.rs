//! HTTP services behind the router.
//!
//! - `profile`: `POST /api/users/update-name`
//! - `programs`: workout and nutrition dashboards
//! - `assistant`: dashboard summary and voice call setup

pub mod assistant;
pub mod profile;
pub mod programs;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use maxfit_core::error::{ClientCode, MaxFitError};

/// Error wrapper that renders as `{ "error": <message>, "code": <CODE> }`.
#[derive(Debug)]
pub struct ApiError(pub MaxFitError);

impl From<MaxFitError> for ApiError {
    fn from(e: MaxFitError) -> Self {
        Self(e)
    }
}

fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
        ClientCode::AuthFailed => StatusCode::UNAUTHORIZED,
        ClientCode::NotFound => StatusCode::NOT_FOUND,
        ClientCode::NotAllowed => StatusCode::FORBIDDEN,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let message = match &self.0 {
            MaxFitError::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                "Internal server error".to_string()
            }
            other => other.detail(),
        };
        (
            status_for(code),
            Json(json!({ "error": message, "code": code.as_str() })),
        )
            .into_response()
    }
}
