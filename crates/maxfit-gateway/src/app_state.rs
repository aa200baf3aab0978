//! Shared application state for the MaxFit gateway.
//!
//! Compiles the access policy once, seeds the user, session and program
//! stores, and hands out cheap `Arc` clones to handlers and the gate.

use std::sync::Arc;

use maxfit_core::access::AccessPolicy;
use maxfit_core::error::{MaxFitError, Result};

use crate::config::GatewayConfig;
use crate::context::SessionStore;
use crate::obs::GatewayMetrics;
use crate::policy;
use crate::store::{MemoryProgramStore, MemoryUserStore, ProgramStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    policy: Arc<AccessPolicy>,
    users: Arc<dyn UserStore>,
    sessions: SessionStore,
    programs: Arc<dyn ProgramStore>,
    metrics: GatewayMetrics,
}

impl AppState {
    /// Build application state from config, seeding in-memory stores.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let programs: Arc<dyn ProgramStore> = match &cfg.programs_file {
            Some(path) => Arc::new(MemoryProgramStore::load_from_file(path).map_err(|e| {
                MaxFitError::BadRequest(format!("programs_file {path}: {}", e.detail()))
            })?),
            None => Arc::new(MemoryProgramStore::new()),
        };
        let users = Arc::new(MemoryUserStore::from_seeds(&cfg.users));
        Self::with_stores(cfg, users, programs)
    }

    /// Build application state over caller-provided stores.
    pub fn with_stores(
        cfg: GatewayConfig,
        users: Arc<dyn UserStore>,
        programs: Arc<dyn ProgramStore>,
    ) -> Result<Self> {
        let policy = policy::compile_policy(&cfg.access).map_err(|e| {
            MaxFitError::BadRequest(format!("access policy compile failed: {}", e.detail()))
        })?;

        for rule in policy.rules() {
            tracing::debug!(
                route = rule.pattern.as_str(),
                min_tier = %rule.min_tier,
                "access rule"
            );
        }

        let sessions = SessionStore::new(Arc::clone(&users));
        for u in &cfg.users {
            sessions.insert_token(u.token.clone(), u.email.clone());
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                policy: Arc::new(policy),
                users,
                sessions,
                programs,
                metrics: GatewayMetrics::default(),
            }),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn policy(&self) -> Arc<AccessPolicy> {
        Arc::clone(&self.inner.policy)
    }

    pub fn fallback_route(&self) -> &str {
        &self.inner.cfg.server.fallback_route
    }

    pub fn users(&self) -> Arc<dyn UserStore> {
        Arc::clone(&self.inner.users)
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    pub fn programs(&self) -> Arc<dyn ProgramStore> {
        Arc::clone(&self.inner.programs)
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.inner.metrics
    }
}
