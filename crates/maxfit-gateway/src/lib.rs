//! MaxFit gateway library entry.
//!
//! This crate wires config, the plan-access gate, session resolution, stores,
//! and dashboard services into an axum application. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod gate;
pub mod obs;
pub mod ops;
pub mod policy;
pub mod router;
pub mod services;
pub mod store;
