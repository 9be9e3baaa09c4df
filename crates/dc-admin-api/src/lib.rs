//! dc-admin-api - Wire types for the digital-community admin backend.
//!
//! Everything the backend speaks: the uniform response envelope, the static
//! endpoint catalog, and the record/payload types for each resource.

pub mod catalog;
pub mod envelope;
pub mod models;
pub mod requests;

pub use catalog::*;
pub use envelope::*;
pub use models::*;
pub use requests::*;
