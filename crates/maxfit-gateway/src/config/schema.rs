use std::net::SocketAddr;

use maxfit_core::access::DefaultAccess;
use maxfit_core::assistant::VoiceCatalog;
use maxfit_core::error::{MaxFitError, Result};
use maxfit_core::tier::SubscriptionTier;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub access: AccessSection,

    #[serde(default)]
    pub assistant: VoiceCatalog,

    #[serde(default)]
    pub users: Vec<UserSeed>,

    /// JSON file mapping user email -> generated programs.
    #[serde(default)]
    pub programs_file: Option<String>,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MaxFitError::UnsupportedVersion);
        }

        self.server.validate()?;

        // The fallback must be reachable by everyone, or denials would loop.
        let policy = crate::policy::compile_policy(&self.access)?;
        if !policy.is_allowed(SubscriptionTier::Unknown, &self.server.fallback_route) {
            return Err(MaxFitError::BadRequest(format!(
                "server.fallback_route {} must not be restricted",
                self.server.fallback_route
            )));
        }

        for (i, u) in self.users.iter().enumerate() {
            if u.email.trim().is_empty() || u.token.trim().is_empty() {
                return Err(MaxFitError::BadRequest(format!(
                    "users[{i}]: email and token must not be empty"
                )));
            }
            if self.users[..i].iter().any(|o| o.email == u.email) {
                return Err(MaxFitError::BadRequest(format!(
                    "users[{i}]: duplicate email {}",
                    u.email
                )));
            }
            if self.users[..i].iter().any(|o| o.token == u.token) {
                return Err(MaxFitError::BadRequest(format!(
                    "users[{i}]: duplicate token"
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Where denied or signed-out users are sent.
    #[serde(default = "default_fallback_route")]
    pub fallback_route: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            fallback_route: default_fallback_route(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|_| {
            MaxFitError::BadRequest(format!(
                "server.listen must be a valid socket address: {}",
                self.listen
            ))
        })?;
        if !self.fallback_route.starts_with('/') {
            return Err(MaxFitError::BadRequest(
                "server.fallback_route must start with '/'".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_fallback_route() -> String {
    "/dashboard".into()
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessSection {
    /// Outcome for routes no rule covers.
    #[serde(default)]
    pub default: DefaultAccess,

    #[serde(default)]
    pub rules: Vec<RouteRuleConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteRuleConfig {
    pub route: String,
    pub min_tier: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserSeed {
    pub email: String,
    /// Bearer token that resolves to this user.
    pub token: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub gender: Option<String>,
}

fn default_language() -> String {
    "english".into()
}
