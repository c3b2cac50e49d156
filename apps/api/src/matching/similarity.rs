use std::collections::HashMap;

/// Lowercase alphanumeric terms of `text`.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Occurrence count of each term within one text.
pub fn term_frequencies(text: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for term in tokenize(text) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

/// Cosine similarity of the two texts' term-frequency vectors, in [0, 1].
/// Returns 0.0 when either text has no terms.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let left = term_frequencies(a);
    let right = term_frequencies(b);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    // Terms missing from either side contribute nothing to the dot product.
    let dot: f64 = left
        .iter()
        .filter_map(|(term, &l)| right.get(term).map(|&r| f64::from(l) * f64::from(r)))
        .sum();
    let norm = |counts: &HashMap<String, u32>| {
        counts
            .values()
            .map(|&c| f64::from(c) * f64::from(c))
            .sum::<f64>()
            .sqrt()
    };
    let (norm_a, norm_b) = (norm(&left), norm(&right));

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_text_is_one() {
        let text = "Senior Rust engineer building Rust services";
        assert!((text_similarity(text, text) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_case_and_punctuation_ignored() {
        let sim = text_similarity("Rust, Tokio; Axum!", "rust tokio axum");
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_vocabulary_is_zero() {
        assert_eq!(text_similarity("rust tokio", "sales negotiation"), 0.0);
    }

    #[test]
    fn test_empty_input_is_zero() {
        assert_eq!(text_similarity("", "rust"), 0.0);
        assert_eq!(text_similarity("rust", ""), 0.0);
        assert_eq!(text_similarity("  ... ", "rust"), 0.0);
    }

    #[test]
    fn test_partial_overlap_uses_term_counts() {
        // a = {rust:2, go:1}, b = {rust:1} → 2 / (√5 · 1)
        let sim = text_similarity("rust rust go", "rust");
        assert!((sim - 2.0 / 5f64.sqrt()).abs() < 1e-9, "sim was {sim}");
    }
}
