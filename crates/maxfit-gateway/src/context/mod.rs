//! Session context types shared across layers.
//!
//! The gate never reaches for ambient state: the current user is handed to it
//! through [`SessionSource`], so the same gate runs against the HTTP session
//! store and against test fakes.

pub mod session;

pub use session::{SessionSnapshot, SessionSource, SessionStore, SessionUser};
