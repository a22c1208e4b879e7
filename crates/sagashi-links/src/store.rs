//! # Short Link Store
//!
//! Maps random tokens to redirect targets. Every entry expires after a fixed
//! TTL and the store never holds more than `capacity` entries.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use rand::RngCore;
use tracing::debug;
use url::Url;

use crate::error::{LinkError, Result};

/// Default lifetime of a short link.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default maximum number of live links.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Default number of random bytes per token (16 hex chars).
pub const DEFAULT_TOKEN_BYTES: usize = 8;

/// Short link store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStoreConfig {
    /// How long a link stays resolvable.
    pub ttl: Duration,
    /// Maximum number of live links.
    pub capacity: usize,
    /// Random bytes per token; the token is their hex encoding.
    pub token_bytes: usize,
}

impl Default for LinkStoreConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            capacity: DEFAULT_CAPACITY,
            token_bytes: DEFAULT_TOKEN_BYTES,
        }
    }
}

impl LinkStoreConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the link lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the capacity (at least 1).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Set the token size in bytes, clamped to `[4, 32]`.
    pub fn with_token_bytes(mut self, token_bytes: usize) -> Self {
        self.token_bytes = token_bytes.clamp(4, 32);
        self
    }
}

/// A freshly created short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub token: String,
    pub target: Url,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
struct Entry {
    target: Url,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Parses `target` as an absolute `http`/`https` URL.
///
/// # Errors
///
/// Returns `LinkError::InvalidUrl` for anything else.
pub fn parse_target(target: &str) -> Result<Url> {
    let url = Url::parse(target.trim()).map_err(|_| LinkError::InvalidUrl(target.to_string()))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(LinkError::InvalidUrl(target.to_string())),
    }
}

fn generate_token(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);
    buf.iter().map(|b| format!("{b:02x}")).collect()
}

/// Thread-safe, expiring token → URL map.
#[derive(Debug, Default)]
pub struct ShortLinkStore {
    config: LinkStoreConfig,
    entries: RwLock<HashMap<String, Entry>>,
}

impl ShortLinkStore {
    /// Create an empty store.
    pub fn new(config: LinkStoreConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Get the store configuration.
    pub fn config(&self) -> &LinkStoreConfig {
        &self.config
    }

    /// Stores `target` under a new random token.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::InvalidUrl` if `target` is not an absolute
    /// `http`/`https` URL.
    pub fn shorten(&self, target: &str) -> Result<ShortLink> {
        self.shorten_at(target, Instant::now())
    }

    /// [`shorten`](Self::shorten) with an explicit clock reading.
    ///
    /// When the store is full, expired entries are purged first; if that
    /// frees nothing, the entry closest to expiry is evicted.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::InvalidUrl` if `target` is not an absolute
    /// `http`/`https` URL.
    pub fn shorten_at(&self, target: &str, now: Instant) -> Result<ShortLink> {
        let target = parse_target(target)?;
        let mut entries = self.entries.write();

        if entries.len() >= self.config.capacity {
            entries.retain(|_, entry| !entry.is_expired(now));
        }
        while entries.len() >= self.config.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.expires_at)
                .map(|(token, _)| token.clone());
            match oldest {
                Some(token) => {
                    debug!(%token, "store full, evicting link closest to expiry");
                    entries.remove(&token);
                }
                None => break,
            }
        }

        let token = loop {
            let candidate = generate_token(self.config.token_bytes);
            if !entries.contains_key(&candidate) {
                break candidate;
            }
        };

        let expires_at = now + self.config.ttl;
        entries.insert(
            token.clone(),
            Entry {
                target: target.clone(),
                expires_at,
            },
        );

        debug!(%token, %target, "short link created");
        Ok(ShortLink {
            token,
            target,
            expires_at,
        })
    }

    /// Looks up a live token.
    pub fn resolve(&self, token: &str) -> Option<Url> {
        self.resolve_at(token, Instant::now())
    }

    /// [`resolve`](Self::resolve) with an explicit clock reading.
    ///
    /// An expired entry is removed and reported as missing.
    pub fn resolve_at(&self, token: &str, now: Instant) -> Option<Url> {
        {
            let entries = self.entries.read();
            match entries.get(token) {
                None => return None,
                Some(entry) if !entry.is_expired(now) => return Some(entry.target.clone()),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write();
        if entries.get(token).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(token);
            debug!(token, "short link expired");
        }
        None
    }

    /// Drops every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    /// [`purge_expired`](Self::purge_expired) with an explicit clock reading.
    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Number of stored entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
