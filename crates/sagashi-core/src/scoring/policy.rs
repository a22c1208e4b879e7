use serde::{Deserialize, Serialize};

use crate::error::{Result, SagashiError};

/// Default acceptance threshold for a title match.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Default slug marker for entries that are not the series itself.
pub const DEFAULT_EXCLUDED_MARKER: &str = "-movie";

/// Acceptance policy for fuzzy title matches.
///
/// A best candidate is accepted only when its score is strictly greater
/// than `threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPolicy {
    pub threshold: f64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl MatchPolicy {
    /// Create a policy with the default threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the acceptance threshold, clamped to `[0.0, 1.0]`.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Builds a policy from a caller-supplied threshold, rejecting NaN.
    ///
    /// # Errors
    ///
    /// Returns `SagashiError::InvalidPolicy` if `threshold` is NaN.
    pub fn try_with_threshold(threshold: f64) -> Result<Self> {
        if threshold.is_nan() {
            return Err(SagashiError::InvalidPolicy("threshold is NaN".into()));
        }
        Ok(Self::new().with_threshold(threshold))
    }

    /// Returns `true` if `score` clears the threshold.
    #[must_use]
    pub fn accepts(&self, score: f64) -> bool {
        score > self.threshold
    }
}

/// Filtering rules applied before slug ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugPolicy {
    /// Slugs containing any of these markers are dropped.
    pub excluded_markers: Vec<String>,
}

impl Default for SlugPolicy {
    fn default() -> Self {
        Self {
            excluded_markers: vec![DEFAULT_EXCLUDED_MARKER.to_string()],
        }
    }
}

impl SlugPolicy {
    /// Create a policy with the default exclusions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the excluded markers. Markers are compared lowercased.
    pub fn with_excluded_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_markers = markers
            .into_iter()
            .map(|m| m.into().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
        self
    }

    /// Returns `true` if `slug` carries an excluded marker.
    #[must_use]
    pub fn excludes(&self, slug: &str) -> bool {
        self.excluded_markers.iter().any(|m| slug.contains(m.as_str()))
    }
}
