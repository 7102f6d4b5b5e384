// ==========================================
// Catalog Import - Trigram string similarity
// ==========================================
// pg_trgm-compatible semantics:
// - lowercase, split on non-alphanumeric characters
// - pad each word with two leading spaces and one trailing space
// - similarity = |shared trigrams| / |all trigrams| (Jaccard)
// ==========================================

use std::collections::HashSet;

/// Distinct trigrams of a name, across all of its words.
fn trigrams(text: &str) -> HashSet<[char; 3]> {
    let mut grams = HashSet::new();

    for word in text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let mut padded: Vec<char> = Vec::with_capacity(word.chars().count() + 3);
        padded.push(' ');
        padded.push(' ');
        padded.extend(word.chars());
        padded.push(' ');

        for window in padded.windows(3) {
            grams.insert([window[0], window[1], window[2]]);
        }
    }

    grams
}

/// Trigram similarity in [0.0, 1.0]; 0.0 when either name has no trigrams.
pub fn trigram_similarity(a: &str, b: &str) -> f64 {
    let ta = trigrams(a);
    let tb = trigrams(b);

    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let shared = ta.intersection(&tb).count();
    let total = ta.union(&tb).count();

    shared as f64 / total as f64
}
