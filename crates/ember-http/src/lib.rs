//! Loosely-typed HTTP requests on top of `reqwest`, with raw wire diagnostics.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and parameter types
//! - [`core`](crate::core) - Pure transformations (query merging, header layering,
//!   multipart encoding, wire-text reconstruction)
//! - [`effects`] - Upload streams, transports and the exchange itself
//!
//! # Key Features
//!
//! - **Loose Parameters**: query, headers and bodies accept text, mappings
//!   or serializable records
//! - **Multipart Uploads**: files or readers, opened just in time and closed
//!   exactly once
//! - **Per-Call Transports**: proxy, TLS verification, redirect and cookie
//!   policy chosen per request, sharing one DNS cache
//! - **Raw Diagnostics**: the request and response as wire-format text
//!
//! # Example
//!
//! ```no_run
//! use std::collections::BTreeMap;
//!
//! use ember_http::{Client, ClientConfig, RequestOptions};
//!
//! # async fn run() -> ember_http::Result<()> {
//! let client = Client::new(ClientConfig::default().preset_header("Accept", "*/*"));
//! let mut resp = client
//!     .post(
//!         "https://httpbin.org/post",
//!         RequestOptions::default().body(BTreeMap::from([("name", "ember")])),
//!     )
//!     .await?;
//!
//! println!("{}", resp.raw_http_request());
//! println!("{}", resp.raw_http_response().await?);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use crate::core::{Cookie, HeaderSet};
pub use data::{
    BasicAuth, Body, ClientConfig, DEFAULT_TIMEOUT, FileUpload, Headers, Params, RequestOptions, Timeouts, UploadSource,
};
pub use effects::{Client, DnsCache, OutgoingRequest, Response, Transport};
pub use error::{Error, Result};
pub use reqwest::{Method, StatusCode, Version};
