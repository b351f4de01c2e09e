//! Immutable configuration and parameter types.
//!
//! Everything a caller hands to the client lives here: the long-lived
//! [`ClientConfig`], the per-call [`RequestOptions`] and the loosely-typed
//! parameter shapes they carry.

pub mod config;
pub mod options;
pub mod upload;

pub use config::{ClientConfig, Timeouts};
pub use options::{BasicAuth, Body, DEFAULT_TIMEOUT, Headers, Params, RequestOptions};
pub use upload::{FileUpload, UploadSource};
