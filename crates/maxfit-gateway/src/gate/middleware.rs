//! HTTP binding of the gate.
//!
//! Each request is its own mount: the bearer token resolves to a session
//! snapshot, the request path is the router location, and a redirect issued by
//! the gate becomes a `303 See Other` to the fallback route.

use std::sync::Mutex;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use maxfit_core::error::{MaxFitError, Result};

use crate::app_state::AppState;
use crate::context::session::bearer_token;
use crate::context::{SessionSnapshot, SessionSource};
use crate::gate::{DenyReason, Gate, GateState, Navigator};
use crate::services::ApiError;

struct RequestSession {
    snapshot: SessionSnapshot,
    lookup_error: Option<String>,
}

impl SessionSource for RequestSession {
    fn snapshot(&self) -> Result<SessionSnapshot> {
        match &self.lookup_error {
            Some(e) => Err(MaxFitError::Internal(e.clone())),
            None => Ok(self.snapshot.clone()),
        }
    }
}

struct RequestNavigator {
    path: String,
    redirect: Mutex<Option<String>>,
}

impl Navigator for RequestNavigator {
    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn navigate(&self, path: &str) {
        if let Ok(mut g) = self.redirect.lock() {
            *g = Some(path.to_string());
        }
    }
}

async fn request_session(app: &AppState, token: Option<String>) -> RequestSession {
    let Some(token) = token else {
        return RequestSession {
            snapshot: SessionSnapshot::signed_out(),
            lookup_error: None,
        };
    };
    match app.sessions().resolve(&token).await {
        Ok(user) => RequestSession {
            snapshot: user
                .map(SessionSnapshot::signed_in)
                .unwrap_or_else(SessionSnapshot::signed_out),
            lookup_error: None,
        },
        Err(e) => RequestSession {
            snapshot: SessionSnapshot::signed_out(),
            lookup_error: Some(e.to_string()),
        },
    }
}

/// Axum middleware guarding plan-restricted pages.
pub async fn require_plan_access(
    State(app): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    // Owned before awaiting: the request body is not `Sync`.
    let token = bearer_token(req.headers()).map(str::to_string);
    let session = request_session(&app, token).await;
    let nav = RequestNavigator {
        path: req.uri().path().to_string(),
        redirect: Mutex::new(None),
    };

    let state = Gate::new(app.policy(), app.fallback_route(), &session, &nav).evaluate();
    let metrics = app.metrics();

    match state {
        GateState::Allowed => {
            metrics.gate_decisions.inc(&[("outcome", "allow")]);
            if let Some(user) = session.snapshot.user {
                req.extensions_mut().insert(user);
            }
            next.run(req).await
        }
        GateState::Denied { reason, redirected } => {
            metrics
                .gate_decisions
                .inc(&[("outcome", "deny"), ("reason", reason.as_str())]);
            let target = nav.redirect.lock().ok().and_then(|mut g| g.take());
            match (redirected, target) {
                (true, Some(to)) => Redirect::to(&to).into_response(),
                _ => match reason {
                    DenyReason::SignedOut => ApiError(MaxFitError::AuthFailed).into_response(),
                    DenyReason::Plan => ApiError(MaxFitError::NotAllowed(
                        "plan does not include this page".into(),
                    ))
                    .into_response(),
                },
            }
        }
        GateState::Pending => (StatusCode::SERVICE_UNAVAILABLE, "session pending").into_response(),
    }
}
