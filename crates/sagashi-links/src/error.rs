use thiserror::Error;

/// Errors that can occur while shortening or resolving links.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The target is not an absolute `http` or `https` URL.
    #[error("invalid url: {0:?}")]
    InvalidUrl(String),

    /// The URL points at a loopback, private or link-local host.
    #[error("refusing to fetch private host: {0}")]
    ForbiddenHost(String),

    /// The redirect chain was longer than the configured hop limit.
    #[error("gave up after {0} redirects")]
    TooManyRedirects(usize),

    /// The redirect chain ended without reaching a direct media URL.
    #[error("no direct media url found after redirects")]
    NotFound,

    /// The HTTP client failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for link operations.
pub type Result<T> = std::result::Result<T, LinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        assert_eq!(
            LinkError::InvalidUrl("ftp://x".into()).to_string(),
            "invalid url: \"ftp://x\""
        );
        assert_eq!(LinkError::TooManyRedirects(10).to_string(), "gave up after 10 redirects");
        assert_eq!(
            LinkError::ForbiddenHost("127.0.0.1".into()).to_string(),
            "refusing to fetch private host: 127.0.0.1"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LinkError>();
    }
}
