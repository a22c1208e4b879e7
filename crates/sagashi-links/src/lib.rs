//! # Sagashi Links
//!
//! Short-lived redirect links and browserless resolution of redirect
//! chains down to a direct media URL.
//!
//! ```rust
//! use sagashi_links::{LinkStoreConfig, ShortLinkStore};
//!
//! let store = ShortLinkStore::new(LinkStoreConfig::default());
//! let link = store.shorten("https://cdn.example/ep01.mp4").unwrap();
//!
//! assert_eq!(link.token.len(), 16);
//! assert_eq!(store.resolve(&link.token), Some(link.target));
//! ```
pub mod error;
pub mod resolver;
pub mod store;

pub use error::{LinkError, Result};
pub use resolver::{
    is_direct_media_url, is_private_host, RedirectResolver, ResolverConfig, MEDIA_EXTENSIONS,
};
pub use store::{parse_target, LinkStoreConfig, ShortLink, ShortLinkStore};
