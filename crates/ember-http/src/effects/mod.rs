//! I/O at the edge: upload streams, transports, DNS and the network
//! exchange itself. Everything here builds on the pure transforms in
//! [`crate::core`].

mod client;
mod dns;
mod request;
mod response;
mod transport;
mod upload;

pub use client::Client;
pub use dns::DnsCache;
pub use request::{OutgoingRequest, REQUEST_PROTO, assemble, basic_auth_value};
pub use response::{BoxStream, Response};
pub use transport::{Transport, TransportSettings};
pub use upload::{MultipartBody, build_multipart, default_field_name};
