//! Upload files as `multipart/form-data`.
//!
//! ```sh
//! cargo run -p ember-http --example upload -- https://httpbin.org/post Cargo.toml README.md
//! ```

use ember_http::{Client, FileUpload, RequestOptions};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ember_http::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let url = args
        .next()
        .unwrap_or_else(|| "https://httpbin.org/post".to_string());

    let mut options = RequestOptions::default().multipart_field("source", "ember-http");
    for path in args {
        options = options.upload(FileUpload::path(path));
    }

    let mut resp = Client::default().post(&url, options).await?;
    println!("{}", resp.status());
    println!("{}", resp.text().await?);
    Ok(())
}
