//! dc-admin-state - Pure client-side state for the admin console.
//!
//! Nothing in this crate performs network I/O: the runner state machine,
//! the pagination window, and the auth token store are all plain data that
//! the transport and console layers drive.

pub mod auth;
pub mod pager;
pub mod runner;

pub use auth::AuthStore;
pub use pager::Pager;
pub use runner::{RunnerOutcome, RunnerState};
