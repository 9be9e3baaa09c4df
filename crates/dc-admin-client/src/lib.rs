//! dc-admin-client - HTTP client layer for the digital-community backend.
//!
//! A single transport (base URL + bearer injection + fixed timeout) feeds
//! two call paths: the typed [`ApiService`] used by the console pages, and
//! the deliberately untyped playground invocation that accepts
//! operator-supplied JSON against any catalog entry.

pub mod error;
pub mod playground;
pub mod service;
pub mod transport;

pub use error::ApiError;
pub use playground::{invoke_endpoint, PlaygroundInput, UploadSource};
pub use service::ApiService;
pub use transport::{Transport, TransportConfig};
