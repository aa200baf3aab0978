//! Plan-access gate.
//!
//! Bridges the pure [`AccessPolicy`] decision into the navigation side effect:
//! - while the session is loading, nothing is rendered and nothing is decided;
//! - once a user is known, the policy is consulted once per (user, tier, route);
//! - a denial (or a missing/failed session) issues a single redirect to the
//!   fallback route and never renders the guarded content.
//!
//! Session and navigation are injected so the gate runs the same way behind
//! the HTTP middleware and in tests.

pub mod middleware;

use std::sync::Arc;

use maxfit_core::access::AccessPolicy;
use maxfit_core::route::normalize_path;
use maxfit_core::tier::SubscriptionTier;

use crate::context::{SessionSnapshot, SessionSource};

/// Router collaborator: current location plus imperative navigation.
pub trait Navigator {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str);
}

impl<T: Navigator + ?Sized> Navigator for &T {
    fn current_path(&self) -> String {
        (**self).current_path()
    }
    fn navigate(&self, path: &str) {
        (**self).navigate(path)
    }
}

/// What the gate shows for the current (session, route).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// Session still resolving: render nothing, decide nothing.
    Pending,
    Allowed,
    /// Content hidden. `redirected` is false when the user already sits on
    /// the fallback route and there is nowhere safer to send them.
    Denied { reason: DenyReason, redirected: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    SignedOut,
    Plan,
}

impl DenyReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DenyReason::SignedOut => "signed_out",
            DenyReason::Plan => "plan",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EvalKey {
    user_id: Option<String>,
    tier: SubscriptionTier,
    route: String,
}

#[derive(Debug, Clone)]
struct Evaluation {
    key: EvalKey,
    state: GateState,
}

pub struct Gate<S, N> {
    policy: Arc<AccessPolicy>,
    fallback: String,
    session: S,
    navigator: N,
    last: Option<Evaluation>,
}

impl<S: SessionSource, N: Navigator> Gate<S, N> {
    pub fn new(policy: Arc<AccessPolicy>, fallback: &str, session: S, navigator: N) -> Self {
        Self {
            policy,
            fallback: normalize_path(fallback),
            session,
            navigator,
            last: None,
        }
    }

    fn read_session(&self) -> SessionSnapshot {
        match self.session.snapshot() {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "session lookup failed; treating as signed out");
                SessionSnapshot::signed_out()
            }
        }
    }

    /// Evaluate the current session and route. Re-evaluates only when the
    /// user, their tier, or the route changed since the last call; an
    /// unchanged denied state does not redirect again.
    pub fn evaluate(&mut self) -> GateState {
        let snap = self.read_session();
        if snap.loading {
            return GateState::Pending;
        }

        let route = normalize_path(&self.navigator.current_path());
        let key = EvalKey {
            user_id: snap.user.as_ref().map(|u| u.id.clone()),
            tier: snap
                .user
                .as_ref()
                .map(|u| u.tier)
                .unwrap_or(SubscriptionTier::Unknown),
            route,
        };

        if let Some(last) = &self.last {
            if last.key == key {
                return last.state.clone();
            }
        }

        let state = match &snap.user {
            None => self.deny(DenyReason::SignedOut, &key.route),
            Some(user) => {
                let d = self.policy.decide(user.tier, &key.route);
                if d.allowed {
                    GateState::Allowed
                } else {
                    tracing::info!(
                        user = %user.id,
                        tier = %user.tier,
                        route = %key.route,
                        rule = ?d.rule,
                        required = ?d.required,
                        "plan access denied"
                    );
                    self.deny(DenyReason::Plan, &key.route)
                }
            }
        };

        self.last = Some(Evaluation {
            key,
            state: state.clone(),
        });
        state
    }

    fn deny(&self, reason: DenyReason, route: &str) -> GateState {
        let redirected = route != self.fallback;
        if redirected {
            self.navigator.navigate(&self.fallback);
        }
        GateState::Denied { reason, redirected }
    }

    /// Render `children` only when access is granted.
    pub fn guard<T>(&mut self, children: T) -> Option<T> {
        match self.evaluate() {
            GateState::Allowed => Some(children),
            _ => None,
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}
