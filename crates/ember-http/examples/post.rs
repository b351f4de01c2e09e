//! Post a form through an optional proxy with basic auth and a cookie jar.
//!
//! ```sh
//! cargo run -p ember-http --example post -- https://httpbin.org/post [proxy]
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use ember_http::{Client, ClientConfig, RequestOptions, Timeouts};
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

    let mut config = ClientConfig::default()
        .dns_cache_ttl(Duration::from_secs(300))
        .timeouts(Timeouts::default().keep_alive(Duration::from_secs(10)))
        .preset_header("Accept", "application/json");
    if let Some(proxy) = args.next() {
        config = config.proxy(proxy);
    }

    let client = Client::new(config);
    let mut resp = client
        .post(
            &url,
            RequestOptions::default()
                .body(BTreeMap::from([("name", "ember"), ("lang", "rust")]))
                .basic_auth("demo", "secret")
                .use_cookie_jar(true)
                .timeout(Duration::from_secs(15)),
        )
        .await?;

    println!("{} {}", resp.status(), resp.url());
    for cookie in resp.cookies() {
        println!("cookie {}={}", cookie.name, cookie.value);
    }
    println!("{}", resp.text().await?);
    Ok(())
}
