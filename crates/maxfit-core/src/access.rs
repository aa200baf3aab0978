//! Plan-access policy: a pure decision over (tier, route).
//!
//! The policy is a static table of route patterns, each with a minimum tier.
//! Lookup picks the most specific matching pattern (most segments) and
//! compares tiers ordinally. A path no rule matches falls back to the
//! configured [`DefaultAccess`]. Evaluation has no side effects and reads no
//! state beyond the compiled table, so identical inputs always give identical
//! decisions.

use serde::Deserialize;

use crate::error::{MaxFitError, Result};
use crate::route::RoutePattern;
use crate::tier::SubscriptionTier;

/// Outcome for paths that no rule covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultAccess {
    #[default]
    Allow,
    Deny,
}

/// One protected route.
#[derive(Debug, Clone)]
pub struct RouteRule {
    pub pattern: RoutePattern,
    pub min_tier: SubscriptionTier,
}

impl RouteRule {
    pub fn new(pattern: &str, min_tier: SubscriptionTier) -> Result<Self> {
        Ok(Self {
            pattern: RoutePattern::parse(pattern)?,
            min_tier,
        })
    }
}

/// Result of a policy evaluation. Carries the matched rule for logging only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    pub allowed: bool,
    /// Pattern of the rule that decided, `None` when the default applied.
    pub rule: Option<String>,
    pub required: Option<SubscriptionTier>,
}

/// Compiled, immutable policy table.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<RouteRule>, // sorted: most specific first
    default: DefaultAccess,
}

impl AccessPolicy {
    pub fn new(mut rules: Vec<RouteRule>, default: DefaultAccess) -> Result<Self> {
        for (i, a) in rules.iter().enumerate() {
            if rules[..i].iter().any(|b| b.pattern.same_target(&a.pattern)) {
                return Err(MaxFitError::BadRequest(format!(
                    "duplicate access rule for route: {}",
                    a.pattern.as_str()
                )));
            }
        }
        rules.sort_by(|a, b| b.pattern.specificity().cmp(&a.pattern.specificity()));
        Ok(Self { rules, default })
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn default_access(&self) -> DefaultAccess {
        self.default
    }

    pub fn decide(&self, tier: SubscriptionTier, route: &str) -> AccessDecision {
        match self.rules.iter().find(|r| r.pattern.matches(route)) {
            Some(rule) => AccessDecision {
                allowed: tier.satisfies(rule.min_tier),
                rule: Some(rule.pattern.as_str().to_string()),
                required: Some(rule.min_tier),
            },
            None => AccessDecision {
                allowed: self.default == DefaultAccess::Allow,
                rule: None,
                required: None,
            },
        }
    }

    pub fn is_allowed(&self, tier: SubscriptionTier, route: &str) -> bool {
        self.decide(tier, route).allowed
    }

    /// Minimum tier needed for `route`, or `None` when the default applies.
    pub fn required_tier(&self, route: &str) -> Option<SubscriptionTier> {
        self.rules
            .iter()
            .find(|r| r.pattern.matches(route))
            .map(|r| r.min_tier)
    }
}
