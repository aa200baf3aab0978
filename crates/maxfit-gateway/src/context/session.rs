use std::sync::Arc;

use axum::http::{header, HeaderMap};
use dashmap::DashMap;
use serde::Serialize;

use maxfit_core::error::Result;
use maxfit_core::tier::SubscriptionTier;

use crate::store::{UserRecord, UserStore};

/// Authenticated user as seen by the gate and the dashboard handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub language: String,
    pub gender: Option<String>,
    pub plan: String,
    pub tier: SubscriptionTier,
}

impl From<UserRecord> for SessionUser {
    fn from(u: UserRecord) -> Self {
        Self {
            tier: SubscriptionTier::from_plan(&u.plan),
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            language: u.language,
            gender: u.gender,
            plan: u.plan,
        }
    }
}

/// Point-in-time view of the session: `{ user, loading }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub user: Option<SessionUser>,
    pub loading: bool,
}

impl SessionSnapshot {
    pub fn loading() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }
}

/// Supplies the current session. A failed lookup is reported as `Err`; the
/// gate treats it as signed out.
pub trait SessionSource {
    fn snapshot(&self) -> Result<SessionSnapshot>;
}

impl<T: SessionSource + ?Sized> SessionSource for &T {
    fn snapshot(&self) -> Result<SessionSnapshot> {
        (**self).snapshot()
    }
}

impl SessionSource for SessionSnapshot {
    fn snapshot(&self) -> Result<SessionSnapshot> {
        Ok(self.clone())
    }
}

/// Bearer token -> user email, backed by the user store for profile data.
pub struct SessionStore {
    tokens: DashMap<String, String>,
    users: Arc<dyn UserStore>,
}

impl SessionStore {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self {
            tokens: DashMap::new(),
            users,
        }
    }

    pub fn insert_token(&self, token: String, email: String) {
        self.tokens.insert(token, email);
    }

    /// Resolve a token to a fresh user view. Re-reads the user store so a plan
    /// change is visible on the next request.
    pub async fn resolve(&self, token: &str) -> Result<Option<SessionUser>> {
        let Some(email) = self.tokens.get(token).map(|e| e.value().clone()) else {
            return Ok(None);
        };
        Ok(self.users.find_by_email(&email).await?.map(SessionUser::from))
    }
}

/// Extract `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
