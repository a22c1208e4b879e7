//! # Redirect Resolver
//!
//! Follows HTTP redirects from a landing URL (file hosts, link wrappers)
//! until it reaches a direct video file.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::redirect::Policy;
use tracing::{debug, info, warn};
use url::{Host, Url};

use crate::error::{LinkError, Result};
use crate::store::parse_target;

/// File extensions treated as direct media.
pub const MEDIA_EXTENSIONS: &[&str] = &[".mp4", ".mkv", ".mov"];

/// Redirect resolver configuration.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Maximum number of redirects to follow.
    pub max_hops: usize,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Fetch loopback, private and link-local hosts too.
    pub allow_private_hosts: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_hops: 10,
            timeout: Duration::from_secs(30),
            user_agent: concat!("sagashi/", env!("CARGO_PKG_VERSION")).to_string(),
            allow_private_hosts: false,
        }
    }
}

impl ResolverConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the redirect limit.
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Allow or refuse requests to private hosts.
    pub fn with_allow_private_hosts(mut self, allow: bool) -> Self {
        self.allow_private_hosts = allow;
        self
    }
}

fn is_private_ipv4(ip: Ipv4Addr) -> bool {
    ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        // 100.64.0.0/10, carrier-grade NAT
        || (ip.octets()[0] == 100 && (ip.octets()[1] & 0xc0) == 64)
}

fn is_private_ipv6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    ip.is_loopback()
        || ip.is_unspecified()
        // fc00::/7 unique local, fe80::/10 link-local
        || (first & 0xfe00) == 0xfc00
        || (first & 0xffc0) == 0xfe80
        || ip.to_ipv4_mapped().is_some_and(is_private_ipv4)
}

/// Returns `true` if the URL host is `localhost` or a loopback, private or
/// link-local IP literal.
///
/// Host names are not resolved, so a public name pointing at a private
/// address is not caught here.
#[must_use]
pub fn is_private_host(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.trim_end_matches('.').to_ascii_lowercase();
            domain == "localhost" || domain.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => is_private_ipv4(ip),
        Some(Host::Ipv6(ip)) => is_private_ipv6(ip),
        None => true,
    }
}

/// Returns `true` if the URL path names a video file.
///
/// ```rust
/// use sagashi_links::is_direct_media_url;
/// use url::Url;
///
/// let url = Url::parse("https://cdn.example/files/EP01.MP4?token=abc").unwrap();
/// assert!(is_direct_media_url(&url));
/// ```
#[must_use]
pub fn is_direct_media_url(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    MEDIA_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Follows redirects without a browser, one hop at a time.
#[derive(Debug, Clone)]
pub struct RedirectResolver {
    client: reqwest::Client,
    config: ResolverConfig,
}

impl RedirectResolver {
    /// Create a resolver with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::Http` if the client cannot be built.
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    /// Get the resolver configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves `url` to a direct media URL.
    ///
    /// A URL that already names a media file is returned without any request.
    /// Otherwise each hop is fetched with redirects disabled; the first
    /// `Location` that names a media file, or the first response served with
    /// a `video/*` content type, ends the chain.
    ///
    /// # Errors
    ///
    /// - `LinkError::InvalidUrl` if `url` or a `Location` header is not a usable URL
    /// - `LinkError::ForbiddenHost` if a hop targets a private host and
    ///   `allow_private_hosts` is off
    /// - `LinkError::TooManyRedirects` if the chain exceeds `max_hops`
    /// - `LinkError::NotFound` if the chain ends on anything else
    /// - `LinkError::Http` on transport failure
    pub async fn resolve(&self, url: &str) -> Result<Url> {
        let mut current = parse_target(url)?;

        for hop in 0..=self.config.max_hops {
            if is_direct_media_url(&current) {
                info!(%current, hops = hop, "resolved direct media url");
                return Ok(current);
            }
            if hop == self.config.max_hops {
                break;
            }
            if !self.config.allow_private_hosts && is_private_host(&current) {
                warn!(%current, "refusing to fetch private host");
                return Err(LinkError::ForbiddenHost(
                    current.host_str().unwrap_or_default().to_string(),
                ));
            }

            let response = self.client.get(current.clone()).send().await?;
            let status = response.status();

            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .ok_or(LinkError::NotFound)?;
                let next = current
                    .join(location)
                    .map_err(|_| LinkError::InvalidUrl(location.to_string()))?;
                debug!(hop, %status, from = %current, to = %next, "following redirect");
                current = next;
                continue;
            }

            let is_video = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("video/"));

            if status.is_success() && is_video {
                info!(%current, hops = hop, "resolved media by content type");
                return Ok(current);
            }

            debug!(%status, %current, "redirect chain ended without media");
            return Err(LinkError::NotFound);
        }

        Err(LinkError::TooManyRedirects(self.config.max_hops))
    }
}
