//! Access rule compilation.
//!
//! Turns `access.rules` entries (`route` + `min_tier`) into the core
//! [`AccessPolicy`] table. Every entry is checked strictly: a typo in a tier
//! name or a malformed route fails startup instead of silently opening or
//! closing a page.

use maxfit_core::access::{AccessPolicy, RouteRule};
use maxfit_core::error::{MaxFitError, Result};
use maxfit_core::tier::SubscriptionTier;

use crate::config::schema::{AccessSection, RouteRuleConfig};

pub fn compile_rules(raw: &[RouteRuleConfig]) -> Result<Vec<RouteRule>> {
    let mut out = Vec::with_capacity(raw.len());
    for (i, r) in raw.iter().enumerate() {
        let tier = SubscriptionTier::parse_strict(&r.min_tier).map_err(|_| {
            MaxFitError::BadRequest(format!(
                "access.rules[{i}]: invalid min_tier: {} (expected unknown|free|basic|premium)",
                r.min_tier
            ))
        })?;
        let rule = RouteRule::new(&r.route, tier)
            .map_err(|e| MaxFitError::BadRequest(format!("access.rules[{i}]: {}", e.detail())))?;
        out.push(rule);
    }
    Ok(out)
}

pub fn compile_policy(section: &AccessSection) -> Result<AccessPolicy> {
    AccessPolicy::new(compile_rules(&section.rules)?, section.default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(route: &str, min_tier: &str) -> RouteRuleConfig {
        RouteRuleConfig {
            route: route.into(),
            min_tier: min_tier.into(),
        }
    }

    #[test]
    fn compiles_valid_rules() {
        let rules = compile_rules(&[rule("/dashboard/ai-assistant", "premium")]).unwrap();
        assert_eq!(rules[0].min_tier, SubscriptionTier::Premium);
        assert_eq!(rules[0].pattern.as_str(), "/dashboard/ai-assistant");
    }

    #[test]
    fn rejects_unknown_tier_name() {
        let err = compile_rules(&[rule("/x", "platinum")]).unwrap_err();
        assert!(err.detail().contains("access.rules[0]"));
        assert!(err.detail().contains("expected unknown|free|basic|premium"));
    }

    #[test]
    fn accepts_unknown_as_min_tier() {
        let rules = compile_rules(&[rule("/public", "unknown")]).unwrap();
        assert_eq!(rules[0].min_tier, SubscriptionTier::Unknown);
    }

    #[test]
    fn rejects_relative_route() {
        assert!(compile_rules(&[rule("dashboard", "free")]).is_err());
    }
}
