//! Server configuration, read from flags with environment fallbacks.

use std::time::Duration;

use clap::{ArgAction, Parser};
use sagashi_core::scoring::DEFAULT_THRESHOLD;
use sagashi_core::{MatchPolicy, SlugPolicy};
use sagashi_links::{LinkStoreConfig, ResolverConfig};
use url::Url;

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:7860";

/// Default longest query or candidate title, in chars.
pub const DEFAULT_MAX_TITLE_CHARS: usize = 512;

/// Default largest candidate or link list per request.
pub const DEFAULT_MAX_CANDIDATES: usize = 10_000;

/// How often expired short links are purged.
pub const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// HTTP server configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "sagashi-server")]
#[command(about = "Fuzzy title matching and short-link HTTP API")]
#[command(version)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(short, long, env = "SAGASHI_LISTEN", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    /// Public base URL used when building short links (defaults to the request Host)
    #[arg(long, env = "SAGASHI_PUBLIC_URL")]
    pub public_url: Option<Url>,

    /// Minimum similarity a title match must exceed
    #[arg(short, long, env = "SAGASHI_THRESHOLD", default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Longest query or candidate title accepted, in chars
    #[arg(long, env = "SAGASHI_MAX_TITLE_CHARS", default_value_t = DEFAULT_MAX_TITLE_CHARS)]
    pub max_title_chars: usize,

    /// Largest candidate or link list accepted per request
    #[arg(long, env = "SAGASHI_MAX_CANDIDATES", default_value_t = DEFAULT_MAX_CANDIDATES)]
    pub max_candidates: usize,

    /// Short link lifetime in seconds
    #[arg(long, env = "SAGASHI_LINK_TTL_SECS", default_value_t = 86_400)]
    pub link_ttl_secs: u64,

    /// Maximum number of live short links
    #[arg(long, env = "SAGASHI_LINK_CAPACITY", default_value_t = 10_000)]
    pub link_capacity: usize,

    /// Maximum redirects followed by /resolve
    #[arg(long, env = "SAGASHI_RESOLVE_MAX_HOPS", default_value_t = 10)]
    pub resolve_max_hops: usize,

    /// Per-request timeout for /resolve in seconds
    #[arg(long, env = "SAGASHI_RESOLVE_TIMEOUT_SECS", default_value_t = 30)]
    pub resolve_timeout_secs: u64,

    /// Let /resolve fetch loopback, private and link-local hosts
    #[arg(
        long,
        env = "SAGASHI_RESOLVE_ALLOW_PRIVATE",
        default_value_t = false,
        action = ArgAction::Set
    )]
    pub resolve_allow_private: bool,

    /// Allow cross-origin requests
    #[arg(long, env = "SAGASHI_CORS", default_value_t = true, action = ArgAction::Set)]
    pub cors_enabled: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "SAGASHI_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            public_url: None,
            threshold: DEFAULT_THRESHOLD,
            max_title_chars: DEFAULT_MAX_TITLE_CHARS,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            link_ttl_secs: 86_400,
            link_capacity: 10_000,
            resolve_max_hops: 10,
            resolve_timeout_secs: 30,
            resolve_allow_private: false,
            cors_enabled: true,
            log_filter: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Title match policy.
    ///
    /// # Errors
    ///
    /// Returns `SagashiError::InvalidPolicy` if the threshold is NaN.
    pub fn match_policy(&self) -> sagashi_core::Result<MatchPolicy> {
        MatchPolicy::try_with_threshold(self.threshold)
    }

    /// Slug ranking policy.
    pub fn slug_policy(&self) -> SlugPolicy {
        SlugPolicy::default()
    }

    /// Short link store settings.
    pub fn link_store_config(&self) -> LinkStoreConfig {
        LinkStoreConfig::new()
            .with_ttl(Duration::from_secs(self.link_ttl_secs))
            .with_capacity(self.link_capacity)
    }

    /// Redirect resolver settings.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::new()
            .with_max_hops(self.resolve_max_hops)
            .with_timeout(Duration::from_secs(self.resolve_timeout_secs))
            .with_allow_private_hosts(self.resolve_allow_private)
    }

    /// Request size limits for the matching endpoints.
    pub fn input_limits(&self) -> InputLimits {
        InputLimits {
            max_title_chars: self.max_title_chars.max(1),
            max_candidates: self.max_candidates.max(1),
        }
    }
}

/// Bounds on matching input, keeping per-request scoring cost small.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimits {
    pub max_title_chars: usize,
    pub max_candidates: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_title_chars: DEFAULT_MAX_TITLE_CHARS,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::parse_from([
            "sagashi-server",
            "--listen-addr",
            "127.0.0.1:9000",
            "--threshold",
            "0.5",
            "--public-url",
            "https://media.example",
            "--cors-enabled",
            "false",
            "--max-title-chars",
            "64",
            "--resolve-allow-private",
            "true",
        ]);

        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.threshold, 0.5);
        assert_eq!(
            config.public_url.as_ref().map(Url::as_str),
            Some("https://media.example/")
        );
        assert!(!config.cors_enabled);
        assert_eq!(config.input_limits().max_title_chars, 64);
        assert!(config.resolver_config().allow_private_hosts);
    }

    #[test]
    fn derived_settings() {
        let config = ServerConfig {
            link_ttl_secs: 120,
            link_capacity: 5,
            resolve_max_hops: 3,
            ..ServerConfig::default()
        };

        assert_eq!(config.link_store_config().ttl, Duration::from_secs(120));
        assert_eq!(config.link_store_config().capacity, 5);
        assert_eq!(config.resolver_config().max_hops, 3);
        assert!(!config.resolver_config().allow_private_hosts);
        assert_eq!(config.input_limits(), InputLimits::default());
        assert_eq!(config.match_policy().unwrap().threshold, 0.3);
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let config = ServerConfig {
            threshold: f64::NAN,
            ..ServerConfig::default()
        };
        assert!(config.match_policy().is_err());
    }
}
