//! Subscription tiers and their total order.
//!
//! Tiers are ranked `Unknown < Free < Basic < Premium`. `Unknown` is what an
//! unrecognised plan string resolves to, so it fails every restricted route.

use std::fmt;

use serde::Serialize;

use crate::error::{MaxFitError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Unknown,
    Free,
    Basic,
    Premium,
}

impl SubscriptionTier {
    /// Every tier, lowest first.
    pub const ALL: [SubscriptionTier; 4] = [
        SubscriptionTier::Unknown,
        SubscriptionTier::Free,
        SubscriptionTier::Basic,
        SubscriptionTier::Premium,
    ];

    /// Resolve a billing plan string. Never fails: anything unrecognised is `Unknown`.
    pub fn from_plan(plan: &str) -> Self {
        match plan.trim().to_ascii_lowercase().as_str() {
            "free" => SubscriptionTier::Free,
            "basic" => SubscriptionTier::Basic,
            "premium" => SubscriptionTier::Premium,
            _ => SubscriptionTier::Unknown,
        }
    }

    /// Strict parse used for configuration, where a typo must not silently
    /// become `Unknown`.
    pub fn parse_strict(s: &str) -> Result<Self> {
        match Self::from_plan(s) {
            SubscriptionTier::Unknown if s.trim() != "unknown" => {
                Err(MaxFitError::BadRequest(format!("unknown tier: {s}")))
            }
            t => Ok(t),
        }
    }

    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Ordinal comparison: this tier grants at least `required`.
    pub fn satisfies(self, required: SubscriptionTier) -> bool {
        self.rank() >= required.rank()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionTier::Unknown => "unknown",
            SubscriptionTier::Free => "free",
            SubscriptionTier::Basic => "basic",
            SubscriptionTier::Premium => "premium",
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_strings_are_case_insensitive() {
        assert_eq!(SubscriptionTier::from_plan("Premium"), SubscriptionTier::Premium);
        assert_eq!(SubscriptionTier::from_plan(" basic "), SubscriptionTier::Basic);
    }

    #[test]
    fn unrecognised_plan_is_unknown() {
        assert_eq!(SubscriptionTier::from_plan("gold"), SubscriptionTier::Unknown);
        assert_eq!(SubscriptionTier::from_plan(""), SubscriptionTier::Unknown);
    }

    #[test]
    fn strict_parse_rejects_typos() {
        assert!(SubscriptionTier::parse_strict("premum").is_err());
        assert_eq!(
            SubscriptionTier::parse_strict("unknown").ok(),
            Some(SubscriptionTier::Unknown)
        );
    }

    #[test]
    fn order_is_total() {
        assert!(SubscriptionTier::Premium.satisfies(SubscriptionTier::Basic));
        assert!(SubscriptionTier::Basic.satisfies(SubscriptionTier::Basic));
        assert!(!SubscriptionTier::Free.satisfies(SubscriptionTier::Basic));
        assert!(!SubscriptionTier::Unknown.satisfies(SubscriptionTier::Free));
    }
}
