//! Top-level facade crate for MaxFit.
//!
//! Re-exports the access model and the gateway library so users can depend on a single crate.

pub mod core {
    pub use maxfit_core::*;
}

pub mod gateway {
    pub use maxfit_gateway::*;
}
