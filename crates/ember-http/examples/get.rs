//! Fetch a URL and print the exchange as wire text.
//!
//! ```sh
//! RUST_LOG=ember_http=debug cargo run -p ember-http --example get -- https://example.com
//! ```

use ember_http::{Client, RequestOptions};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ember_http::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://example.com".to_string());

    let client = Client::default();
    let mut resp = client
        .get(&url, RequestOptions::default().params("from=ember-http"))
        .await?;

    println!("{}", resp.raw_http_request());
    println!("{}", resp.raw_http_response().await?);
    Ok(())
}
