//! Persistence seams for users and generated programs.
//!
//! The CMS is an external service; handlers only see these traits. The
//! in-memory implementations back the dev server and the tests.

pub mod programs;
pub mod users;

pub use programs::{MemoryProgramStore, ProgramStore};
pub use users::{MemoryUserStore, UserRecord, UserStore};
