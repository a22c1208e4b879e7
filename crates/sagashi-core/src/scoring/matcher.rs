//! # Title Matcher
//!
//! Picks the known title closest to a user query under a [`MatchPolicy`].

use tracing::debug;

use crate::error::{Result, SagashiError};
use crate::scoring::policy::MatchPolicy;
use crate::scoring::similarity::similarity;
use crate::types::Candidate;

/// Trims `query` and rejects it if nothing is left.
///
/// # Errors
///
/// Returns `SagashiError::EmptyQuery` for empty or whitespace-only input.
pub fn checked_query(query: &str) -> Result<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(SagashiError::EmptyQuery);
    }
    Ok(trimmed)
}

/// Scores candidate titles against a query and applies the acceptance policy.
#[derive(Debug, Clone, Default)]
pub struct TitleMatcher {
    policy: MatchPolicy,
}

impl TitleMatcher {
    /// Create a matcher with the given policy.
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    /// Get the matcher policy.
    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Scores every label, preserving input order.
    pub fn score_all<I, S>(&self, query: &str, labels: I) -> Vec<Candidate>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| {
                let label = label.as_ref();
                Candidate::new(label, similarity(query, label))
            })
            .collect()
    }

    /// Scores every label and sorts by score, highest first.
    ///
    /// Equal scores keep their input order.
    pub fn rank<I, S>(&self, query: &str, labels: I) -> Vec<Candidate>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ranked = self.score_all(query, labels);
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// Returns the best-scoring label if it clears the threshold.
    ///
    /// On a tie for the top score the first label seen wins.
    ///
    /// ```rust
    /// use sagashi_core::scoring::TitleMatcher;
    ///
    /// let matcher = TitleMatcher::default();
    /// let best = matcher
    ///     .best_match("naruto", ["Naruto", "Naruto Shippuden", "Naruto Movie"])
    ///     .unwrap();
    ///
    /// assert_eq!(best.label, "Naruto");
    /// assert_eq!(best.score, 1.0);
    /// ```
    pub fn best_match<I, S>(&self, query: &str, labels: I) -> Option<Candidate>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.best_match_by(query, labels, |label| label.as_ref())
            .map(|(_, candidate)| candidate)
    }

    /// Like [`best_match`](Self::best_match) over arbitrary records, returning
    /// the winning record alongside its candidate.
    pub fn best_match_by<T, I, F>(&self, query: &str, items: I, label: F) -> Option<(T, Candidate)>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> &str,
    {
        let mut best: Option<(T, f64)> = None;

        for item in items {
            let score = similarity(query, label(&item));
            let better = match &best {
                Some((_, top)) => score > *top,
                None => true,
            };
            if better {
                best = Some((item, score));
            }
        }

        let (item, score) = best?;
        let candidate = Candidate::new(label(&item), score);

        if self.policy.accepts(score) {
            debug!(query, best = %candidate, "title match accepted");
            Some((item, candidate))
        } else {
            debug!(
                query,
                best = %candidate,
                threshold = self.policy.threshold,
                "best title below threshold"
            );
            None
        }
    }
}
