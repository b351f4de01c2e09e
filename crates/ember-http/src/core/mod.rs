//! Pure transformations: parameter normalization, multipart encoding and
//! wire-format reconstruction. Nothing in here touches the network or the
//! filesystem.

pub mod body;
pub mod cookie;
pub mod headers;
pub mod multipart;
pub mod query;
pub mod wire;

pub use body::encode_body;
pub use cookie::{Cookie, parse_set_cookie};
pub use headers::{DEFAULT_USER_AGENT, HeaderSet, parse_header_text};
pub use multipart::MultipartWriter;
pub use query::build_query;
