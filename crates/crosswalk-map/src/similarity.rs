//! Token-set similarity scoring.
//!
//! Both texts are cleaned (lowercased, every character other than letters,
//! digits and `-` turned into a space, whitespace collapsed) and split into
//! sorted, deduplicated token sets. The score is the best indel similarity
//! among the shared tokens and each side's full token string, so word order
//! and repeated words do not matter. Scores are whole points from 0 to 100,
//! rounded half up.

use std::collections::BTreeSet;

use rapidfuzz::distance::indel;

/// Lowercases, replaces separators with spaces and collapses whitespace.
pub fn clean_text(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|ch| if ch.is_alphanumeric() || ch == '-' { ch } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cleaned, sorted and deduplicated tokens of a text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: Vec<String>,
}

impl TokenSet {
    pub fn new(raw: &str) -> Self {
        let cleaned = clean_text(raw);
        let unique: BTreeSet<&str> = cleaned.split_whitespace().collect();
        Self {
            tokens: unique.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Similarity to `other` on the 0-100 scale.
    pub fn ratio(&self, other: &TokenSet) -> u8 {
        if self.is_empty() || other.is_empty() {
            return 0;
        }
        let mut shared = Vec::new();
        let mut only_self = Vec::new();
        let mut only_other = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.tokens.len() && j < other.tokens.len() {
            match self.tokens[i].cmp(&other.tokens[j]) {
                std::cmp::Ordering::Equal => {
                    shared.push(self.tokens[i].as_str());
                    i += 1;
                    j += 1;
                }
                std::cmp::Ordering::Less => {
                    only_self.push(self.tokens[i].as_str());
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    only_other.push(other.tokens[j].as_str());
                    j += 1;
                }
            }
        }
        only_self.extend(self.tokens[i..].iter().map(String::as_str));
        only_other.extend(other.tokens[j..].iter().map(String::as_str));

        // one side is a subset of the other
        if !shared.is_empty() && (only_self.is_empty() || only_other.is_empty()) {
            return 100;
        }

        let sect = shared.join(" ");
        let combined_self = join_parts(&sect, &only_self);
        let combined_other = join_parts(&sect, &only_other);
        let mut best = indel_ratio(&combined_self, &combined_other);
        if !sect.is_empty() {
            best = best
                .max(indel_ratio(&sect, &combined_self))
                .max(indel_ratio(&sect, &combined_other));
        }
        to_points(best)
    }
}

/// Token-set similarity of two raw texts on the 0-100 scale.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    TokenSet::new(a).ratio(&TokenSet::new(b))
}

fn join_parts(sect: &str, rest: &[&str]) -> String {
    if rest.is_empty() {
        return sect.to_string();
    }
    let rest = rest.join(" ");
    if sect.is_empty() {
        rest
    } else {
        format!("{sect} {rest}")
    }
}

fn indel_ratio(a: &str, b: &str) -> f64 {
    indel::normalized_similarity(a.chars(), b.chars())
}

fn to_points(similarity: f64) -> u8 {
    (similarity * 100.0 + 0.5).floor().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_punctuation_but_keeps_hyphens() {
        assert_eq!(clean_text("  Walking-Frame, (Rollator)/Seat "), "walking-frame rollator seat");
        assert_eq!(clean_text("Sub_Category"), "sub category");
    }

    #[test]
    fn identical_and_reordered_texts_score_full() {
        assert_eq!(token_set_ratio("manual wheelchair", "Wheelchair, manual"), 100);
        assert_eq!(token_set_ratio("shower chair", "shower chair shower"), 100);
    }

    #[test]
    fn subset_scores_full() {
        assert_eq!(token_set_ratio("wheelchair", "manual wheelchair folding"), 100);
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(token_set_ratio("", "wheelchair"), 0);
        assert_eq!(token_set_ratio("!!!", "wheelchair"), 0);
    }

    #[test]
    fn unrelated_texts_score_low() {
        let score = token_set_ratio("braille display", "bath lift");
        assert!(score < 60, "score {score}");
    }

    #[test]
    fn partial_overlap_is_between() {
        let score = token_set_ratio("portable ramp aluminium", "ramp threshold rubber");
        assert!(score > 0 && score < 100, "score {score}");
    }

    #[test]
    fn scoring_is_symmetric() {
        let a = "electric bed with rails";
        let b = "bed rails electric adjustable";
        assert_eq!(token_set_ratio(a, b), token_set_ratio(b, a));
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(to_points(0.795), 80);
        assert_eq!(to_points(0.7949), 79);
        assert_eq!(to_points(1.0), 100);
        assert_eq!(to_points(0.0), 0);
    }
}
