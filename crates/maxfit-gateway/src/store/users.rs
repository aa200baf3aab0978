use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use maxfit_core::error::{MaxFitError, Result};
use maxfit_core::profile::ProfileUpdate;

use crate::config::UserSeed;

/// Stored user document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub language: String,
    pub gender: Option<String>,
    /// Billing plan as reported by the account system.
    pub plan: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;
    async fn update_profile(&self, id: &str, update: &ProfileUpdate) -> Result<UserRecord>;
    async fn set_plan(&self, id: &str, plan: &str) -> Result<UserRecord>;
}

/// In-memory user collection keyed by email.
pub struct MemoryUserStore {
    by_email: DashMap<String, UserRecord>,
    seq: AtomicU64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            by_email: DashMap::new(),
            seq: AtomicU64::new(1),
        }
    }

    pub fn from_seeds(seeds: &[UserSeed]) -> Self {
        let store = Self::new();
        for s in seeds {
            store.insert(UserRecord {
                id: String::new(),
                email: s.email.clone(),
                first_name: s.first_name.clone(),
                last_name: s.last_name.clone(),
                language: s.language.clone(),
                gender: s.gender.clone(),
                plan: s.plan.clone(),
            });
        }
        store
    }

    /// Insert a user, assigning an id when the record has none.
    pub fn insert(&self, mut user: UserRecord) -> UserRecord {
        if user.id.is_empty() {
            user.id = format!("user-{}", self.seq.fetch_add(1, Ordering::Relaxed));
        }
        self.by_email.insert(user.email.clone(), user.clone());
        user
    }

    fn update_by_id<F>(&self, id: &str, f: F) -> Result<UserRecord>
    where
        F: FnOnce(&mut UserRecord),
    {
        let mut entry = self
            .by_email
            .iter_mut()
            .find(|e| e.value().id == id)
            .ok_or_else(|| MaxFitError::NotFound("User not found".into()))?;
        f(entry.value_mut());
        Ok(entry.value().clone())
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(self.by_email.get(email).map(|r| r.value().clone()))
    }

    async fn update_profile(&self, id: &str, update: &ProfileUpdate) -> Result<UserRecord> {
        self.update_by_id(id, |u| {
            u.first_name = update.first_name.clone();
            u.last_name = update.last_name.clone();
            u.language = update.language.as_str().to_string();
        })
    }

    async fn set_plan(&self, id: &str, plan: &str) -> Result<UserRecord> {
        self.update_by_id(id, |u| u.plan = plan.to_string())
    }
}
