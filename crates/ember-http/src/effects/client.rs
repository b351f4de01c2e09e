//! The client entry point.

use reqwest::Method;

use super::dns::DnsCache;
use super::request::{OutgoingRequest, assemble};
use super::response::Response;
use super::transport::Transport;
use crate::data::{ClientConfig, RequestOptions};
use crate::error::Result;

/// Issues requests built from [`RequestOptions`] under one [`ClientConfig`].
///
/// Every call gets its own transport configured from the client-wide
/// settings plus that call's flags. The DNS cache, when enabled, is created
/// here once and shared by every transport, so cloning a `Client` also
/// shares it.
///
/// # Example
///
/// ```no_run
/// use ember_http::{Client, RequestOptions};
///
/// # async fn run() -> ember_http::Result<()> {
/// let client = Client::default();
/// let mut resp = client
///     .get("https://example.com/search", RequestOptions::default().params("q=rust"))
///     .await?;
/// println!("{} {}", resp.status(), resp.text().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
    dns:    Option<DnsCache>,
}

impl Default for Client {
    fn default() -> Self { Self::new(ClientConfig::default()) }
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        let dns = config.dns_cache_ttl.map(DnsCache::new);
        Self { config, dns }
    }

    pub fn config(&self) -> &ClientConfig { &self.config }

    pub fn dns_cache(&self) -> Option<&DnsCache> { self.dns.as_ref() }

    /// Assemble the request without sending it.
    pub async fn build_request(&self, method: Method, url: &str, mut options: RequestOptions) -> Result<OutgoingRequest> {
        assemble(method, url, &mut options, &self.config.preset_headers).await
    }

    /// Assemble, send and wrap one exchange.
    pub async fn request(&self, method: Method, url: &str, mut options: RequestOptions) -> Result<Response> {
        let outgoing = assemble(method, url, &mut options, &self.config.preset_headers).await?;
        tracing::debug!(method = %outgoing.method, url = %outgoing.url, "dispatching request");

        let response = match options.http_client.take() {
            Some(client) => {
                let mut request = outgoing.to_reqwest(&client)?;
                // The caller's client keeps its own timeout unless this call sets one.
                if let Some(timeout) = options.timeout {
                    *request.timeout_mut() = Some(timeout);
                }
                client.execute(request).await?
            }
            None => {
                let transport = Transport::build(&self.config, &options, self.dns.as_ref())?;
                let request = outgoing.to_reqwest(transport.client())?;
                let response = transport.client().execute(request).await;
                transport.release();
                response?
            }
        };

        Ok(Response::from_reqwest(outgoing, response))
    }

    pub async fn get(&self, url: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::GET, url, options).await
    }

    pub async fn post(&self, url: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::POST, url, options).await
    }

    pub async fn put(&self, url: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::PUT, url, options).await
    }

    pub async fn delete(&self, url: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::DELETE, url, options).await
    }

    pub async fn head(&self, url: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::HEAD, url, options).await
    }

    pub async fn patch(&self, url: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::PATCH, url, options).await
    }

    pub async fn options(&self, url: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::OPTIONS, url, options).await
    }
}
