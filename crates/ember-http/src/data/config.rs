use std::time::Duration;

/// Connection timing knobs for the transport.
///
/// Dial, TLS-handshake and idle timeouts fall back to the keep-alive
/// duration when they are not set explicitly, so a single `keep_alive`
/// value drives all four unless the caller splits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub keep_alive:    Duration,
    pub dial:          Option<Duration>,
    pub tls_handshake: Option<Duration>,
    pub idle:          Option<Duration>,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            keep_alive:    Duration::from_secs(30),
            dial:          None,
            tls_handshake: None,
            idle:          None,
        }
    }
}

impl Timeouts {
    #[must_use]
    pub fn keep_alive(mut self, keep_alive: Duration) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    #[must_use]
    pub fn dial(mut self, dial: Duration) -> Self {
        self.dial = Some(dial);
        self
    }

    #[must_use]
    pub fn tls_handshake(mut self, tls_handshake: Duration) -> Self {
        self.tls_handshake = Some(tls_handshake);
        self
    }

    #[must_use]
    pub fn idle(mut self, idle: Duration) -> Self {
        self.idle = Some(idle);
        self
    }

    pub fn effective_dial(&self) -> Duration { self.dial.unwrap_or(self.keep_alive) }

    pub fn effective_tls_handshake(&self) -> Duration { self.tls_handshake.unwrap_or(self.keep_alive) }

    pub fn effective_idle(&self) -> Duration { self.idle.unwrap_or(self.keep_alive) }

    /// Upper bound for establishing a connection, TLS included.
    pub fn connect(&self) -> Duration {
        self.effective_dial()
            .saturating_add(self.effective_tls_handshake())
    }
}

/// Long-lived settings shared by every request issued through one
/// [`Client`](crate::Client).
///
/// # Examples
///
/// ```
/// use ember_http::{ClientConfig, Timeouts};
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .proxy("http://127.0.0.1:8080")
///     .dns_cache_ttl(Duration::from_secs(300))
///     .max_idle_conns(4)
///     .timeouts(Timeouts::default().keep_alive(Duration::from_secs(5)))
///     .preset_header("User-Agent", "test");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Proxy every request is routed through.
    pub proxy: Option<String>,

    /// Enables the shared DNS cache with this time-to-live.
    pub dns_cache_ttl: Option<Duration>,

    /// Idle connections kept per host. Zero keeps the transport default.
    pub max_idle_conns: usize,

    pub timeouts: Timeouts,

    /// Headers applied to every request below the per-call headers.
    pub preset_headers: Vec<(String, String)>,
}

impl ClientConfig {
    #[must_use]
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    #[must_use]
    pub fn dns_cache_ttl(mut self, ttl: Duration) -> Self {
        self.dns_cache_ttl = Some(ttl);
        self
    }

    #[must_use]
    pub fn max_idle_conns(mut self, max_idle_conns: usize) -> Self {
        self.max_idle_conns = max_idle_conns;
        self
    }

    #[must_use]
    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Add one preset header. Later calls with the same name win.
    #[must_use]
    pub fn preset_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.preset_headers.push((key.into(), value.into()));
        self
    }
}
