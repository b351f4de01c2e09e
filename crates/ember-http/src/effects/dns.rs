//! TTL-scoped DNS cache plugged into the transport's resolver hook.

use std::collections::HashMap;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use reqwest::dns::{Addrs, Name, Resolve, Resolving};

#[derive(Debug, Clone, Copy)]
struct CachedAddr {
    ip:          IpAddr,
    resolved_at: Instant,
}

#[derive(Debug)]
struct Inner {
    ttl:     Duration,
    entries: RwLock<HashMap<String, CachedAddr>>,
}

/// Resolves each host once and serves the first address until `ttl`
/// elapses. Clones share one cache, so a single instance can back every
/// transport a client builds.
#[derive(Debug, Clone)]
pub struct DnsCache {
    inner: Arc<Inner>,
}

impl DnsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                ttl,
                entries: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub fn ttl(&self) -> Duration { self.inner.ttl }

    /// Pin `host` to `ip` for one TTL.
    pub fn insert(&self, host: impl Into<String>, ip: IpAddr) {
        let entry = CachedAddr {
            ip,
            resolved_at: Instant::now(),
        };
        self.inner
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(host.into(), entry);
    }

    /// One address for `host`, from the cache when still fresh.
    pub async fn fetch_one(&self, host: &str) -> io::Result<IpAddr> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(ip);
        }
        if let Some(ip) = self.cached(host) {
            tracing::trace!(host, %ip, "dns cache hit");
            return Ok(ip);
        }

        let ip = tokio::net::lookup_host((host, 0))
            .await?
            .next()
            .map(|addr| addr.ip())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no address found for {host}")))?;
        tracing::trace!(host, %ip, "dns cache miss");

        self.insert(host, ip);
        Ok(ip)
    }

    fn cached(&self, host: &str) -> Option<IpAddr> {
        let entries = self
            .inner
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        entries
            .get(host)
            .filter(|entry| entry.resolved_at.elapsed() < self.inner.ttl)
            .map(|entry| entry.ip)
    }
}

impl Resolve for DnsCache {
    fn resolve(&self, name: Name) -> Resolving {
        let cache = self.clone();
        Box::pin(async move {
            let ip = cache.fetch_one(name.as_str()).await?;
            // The connector fills in the port of the request URL.
            let addrs: Addrs = Box::new(std::iter::once(SocketAddr::new(ip, 0)));
            Ok(addrs)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;

    #[tokio::test]
    async fn test_pinned_entry_is_served() {
        let cache = DnsCache::new(Duration::from_secs(60));
        let ip = IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3));
        cache.insert("pinned.invalid", ip);

        assert_eq!(cache.fetch_one("pinned.invalid").await.unwrap(), ip);
    }

    #[test]
    fn test_entries_expire() {
        let cache = DnsCache::new(Duration::ZERO);
        cache.insert("gone.invalid", IpAddr::V4(Ipv4Addr::LOCALHOST));

        assert_eq!(cache.cached("gone.invalid"), None);
    }

    #[tokio::test]
    async fn test_ip_literal_bypasses_cache() {
        let cache = DnsCache::new(Duration::from_secs(60));
        let ip = cache.fetch_one("127.0.0.1").await.unwrap();

        assert_eq!(ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(cache.cached("127.0.0.1"), None);
    }

    #[tokio::test]
    async fn test_localhost_is_cached_after_lookup() {
        let cache = DnsCache::new(Duration::from_secs(60));
        let ip = cache.fetch_one("localhost").await.unwrap();

        assert!(ip.is_loopback());
        assert_eq!(cache.cached("localhost"), Some(ip));
    }

    #[tokio::test]
    async fn test_shared_between_clones() {
        let cache = DnsCache::new(Duration::from_secs(60));
        let clone = cache.clone();
        clone.insert("shared.invalid", IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.fetch_one("shared.invalid").await.unwrap() })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap(), IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)));
        }
    }
}
