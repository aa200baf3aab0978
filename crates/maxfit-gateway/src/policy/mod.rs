//! Policy layer (plan-access rules).
//!
//! Compiles access configuration into the immutable core policy table that
//! the gate and the HTTP middleware consult at runtime.

pub mod rules;

pub use rules::{compile_policy, compile_rules};
