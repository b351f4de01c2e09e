//! Per-call transport construction.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::redirect::Policy;

use super::dns::DnsCache;
use crate::data::{ClientConfig, RequestOptions};
use crate::error::{Error, Result};

/// Per-call flags resolved from the client configuration and the call's
/// options, applied to the transport builder as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    pub proxy:                Option<String>,
    pub accept_invalid_certs: bool,
    pub compression:          bool,
    pub follow_redirects:     bool,
    pub cookie_store:         bool,
    pub timeout:              Duration,
}

impl TransportSettings {
    pub fn resolve(config: &ClientConfig, options: &RequestOptions) -> Self {
        Self {
            proxy:                config.proxy.clone(),
            accept_invalid_certs: options.insecure_skip_verify,
            compression:          !options.disable_compression,
            follow_redirects:     !options.disable_redirect,
            cookie_store:         options.use_cookie_jar,
            timeout:              options.effective_timeout(),
        }
    }
}

/// A connection pool configured for exactly one call.
///
/// Dropping the transport closes its idle connections; [`Transport::release`]
/// does the same at an explicit point.
#[derive(Debug)]
pub struct Transport {
    client:   reqwest::Client,
    settings: TransportSettings,
}

impl Transport {
    /// Configure a transport from client-wide settings plus the per-call
    /// flags in `options`.
    pub fn build(config: &ClientConfig, options: &RequestOptions, dns: Option<&DnsCache>) -> Result<Self> {
        let settings = TransportSettings::resolve(config, options);
        let timeouts = &config.timeouts;
        let mut builder = reqwest::Client::builder()
            .connect_timeout(timeouts.connect())
            .tcp_keepalive(timeouts.keep_alive)
            .pool_idle_timeout(timeouts.effective_idle())
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(settings.accept_invalid_certs);

        if config.max_idle_conns > 0 {
            builder = builder.pool_max_idle_per_host(config.max_idle_conns);
        }

        if let Some(proxy) = &settings.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| Error::Configuration(format!("invalid proxy {proxy:?}: {e}")))?;
            builder = builder.proxy(proxy);
        }

        if !settings.compression {
            builder = builder.no_gzip().no_brotli().no_deflate();
        }

        builder = builder.redirect(if settings.follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        });

        if settings.cookie_store {
            let jar = options
                .cookie_jar
                .clone()
                .unwrap_or_else(|| Arc::new(Jar::default()));
            builder = builder.cookie_provider(jar);
        }

        if let Some(dns) = dns {
            builder = builder.dns_resolver(Arc::new(dns.clone()));
        }

        let client = builder
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build transport: {e}")))?;
        Ok(Self { client, settings })
    }

    pub fn client(&self) -> &reqwest::Client { &self.client }

    pub fn settings(&self) -> &TransportSettings { &self.settings }

    /// Give up the pool. In-flight response bodies keep their own
    /// connection until they are read or dropped.
    pub fn release(self) {}
}

impl Drop for Transport {
    fn drop(&mut self) {
        tracing::debug!("transport released");
    }
}
