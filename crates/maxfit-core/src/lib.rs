//! MaxFit core: plan-access model, error types, and program data shapes.
//!
//! This crate holds the pure pieces shared by the gateway and its tests: the
//! subscription tier order, route pattern matching, the `AccessPolicy`
//! decision function, profile validation, fitness program normalization, and
//! the assistant transcript reducer. It carries no HTTP or runtime
//! dependencies so every decision can be tested without a server.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `MaxFitError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod access;
pub mod assistant;
pub mod error;
pub mod profile;
pub mod program;
pub mod route;
pub mod tier;

/// Shared result type.
pub use error::{MaxFitError, Result};

pub use access::{AccessDecision, AccessPolicy, DefaultAccess, RouteRule};
pub use tier::SubscriptionTier;
