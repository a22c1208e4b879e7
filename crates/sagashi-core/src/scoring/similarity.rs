//! Levenshtein edit distance and the normalized similarity score built on it.

/// Returns the Levenshtein distance between `a` and `b`, counted in chars.
///
/// Only one row of the dynamic-programming table is kept, sized by the
/// shorter input.
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (longer, shorter) = if a.len() >= b.len() { (&a, &b) } else { (&b, &a) };

    if shorter.is_empty() {
        return longer.len();
    }

    let mut row: Vec<usize> = (0..=shorter.len()).collect();

    for (i, &lc) in longer.iter().enumerate() {
        // row[j] holds the previous row until overwritten; diag is its old value.
        let mut diag = row[0];
        row[0] = i + 1;

        for (j, &sc) in shorter.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if lc == sc {
                diag
            } else {
                1 + diag.min(above).min(row[j])
            };
            diag = above;
        }
    }

    row[shorter.len()]
}

/// Case-insensitive similarity of two strings in `[0.0, 1.0]`.
///
/// Both inputs are lowercased, then the edit distance is normalized by the
/// length of the longer one: `(len - distance) / len`. Two empty strings are
/// identical and score `1.0`.
///
/// ```rust
/// use sagashi_core::scoring::similarity;
///
/// assert_eq!(similarity("Naruto", "naruto"), 1.0);
/// assert_eq!(similarity("Naruto", "Naruto Shippuden"), 0.375);
/// ```
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    let longer_len = a.chars().count().max(b.chars().count());
    if longer_len == 0 {
        return 1.0;
    }

    let distance = edit_distance(&a, &b);
    (longer_len - distance) as f64 / longer_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &[&str] = &[
        "",
        "a",
        "Naruto",
        "naruto",
        "Naruto Shippuden",
        "Naruto Movie",
        "one piece",
        "onepiece",
        "attack on titan",
        "Shingeki no Kyojin",
        "death note",
        "kitten",
        "sitting",
        "Sousou no Frieren",
        "Ōkami",
        "進撃の巨人",
    ];

    #[test]
    fn edit_distance_classic_cases() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("same", "same"), 0);
    }

    #[test]
    fn edit_distance_counts_chars_not_bytes() {
        // One substitution, even though 'é' is two bytes in UTF-8.
        assert_eq!(edit_distance("cafe", "café"), 1);
        assert_eq!(edit_distance("進撃の巨人", "進撃巨人"), 1);
    }

    #[test]
    fn edit_distance_agrees_with_strsim() {
        for a in CORPUS {
            for b in CORPUS {
                assert_eq!(
                    edit_distance(a, b),
                    strsim::levenshtein(a, b),
                    "distance mismatch for {a:?} vs {b:?}"
                );
            }
        }
    }

    #[test]
    fn identical_strings_score_one() {
        for s in CORPUS {
            assert_eq!(similarity(s, s), 1.0, "self-similarity of {s:?}");
        }
    }

    #[test]
    fn empty_against_non_empty_scores_zero() {
        assert_eq!(similarity("", ""), 1.0);
        for s in CORPUS.iter().filter(|s| !s.is_empty()) {
            assert_eq!(similarity(s, ""), 0.0, "{s:?} vs empty");
            assert_eq!(similarity("", s), 0.0, "empty vs {s:?}");
        }
    }

    #[test]
    fn similarity_is_symmetric_and_bounded() {
        for a in CORPUS {
            for b in CORPUS {
                let ab = similarity(a, b);
                let ba = similarity(b, a);
                assert_eq!(ab, ba, "asymmetric for {a:?} vs {b:?}");
                assert!((0.0..=1.0).contains(&ab), "{ab} out of range for {a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn similarity_ignores_case() {
        assert_eq!(similarity("Naruto", "naruto"), 1.0);
        assert_eq!(similarity("ONE PIECE", "one piece"), 1.0);
    }

    #[test]
    fn naruto_vs_shippuden() {
        // 16 chars, 10 insertions.
        assert!((similarity("Naruto", "Naruto Shippuden") - 0.375).abs() < 1e-12);
    }

    #[test]
    fn dropped_space_costs_one_edit() {
        let score = similarity("one piece", "onepiece");
        assert!((score - 8.0 / 9.0).abs() < 1e-12, "score={score}");
    }

    #[test]
    fn unrelated_titles_score_low() {
        assert!(similarity("attack on titan", "death note") < 0.3);
    }
}
