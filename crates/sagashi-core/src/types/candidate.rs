use std::fmt;

use serde::{Deserialize, Serialize};

/// A candidate label paired with its similarity to the query.
///
/// Produced fresh for every query and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// The candidate title as supplied by the caller.
    pub label: String,

    /// Similarity to the query in `[0.0, 1.0]`.
    pub score: f64,
}

impl Candidate {
    /// Creates a new candidate.
    #[must_use]
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({:.3})", self.label, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_display() {
        let c = Candidate::new("One Piece", 8.0 / 9.0);
        assert_eq!(c.to_string(), "\"One Piece\" (0.889)");
    }

    #[test]
    fn candidate_serializes_label_and_score() {
        let c = Candidate::new("Naruto", 1.0);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["label"], "Naruto");
        assert_eq!(json["score"], 1.0);
    }
}
