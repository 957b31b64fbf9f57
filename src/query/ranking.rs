//! Scoring: TF-IDF with sublinear term-frequency scaling, smoothed IDF,
//! importance boosting, and a complete-match constant retained for forward
//! compatibility with a relaxed (non-strict-AND) query mode.

/// `boost(t,d)`: importance multiplier.
pub const IMPORTANT_BOOST: f64 = 2.0;
pub const NOT_IMPORTANT_BOOST: f64 = 1.0;

/// Retained so the formula generalizes if strict AND is ever relaxed.
pub const COMPLETE_MATCH_BONUS: f64 = 1.15;

/// `tf_weight(t,d) = 1 + ln(tf)` for tf > 0, else 0 (sublinear scaling).
pub fn tf_weight(tf: u32) -> f64 {
    if tf == 0 {
        0.0
    } else {
        1.0 + (tf as f64).ln()
    }
}

/// `idf(t) = ln((N+1)/(df+1)) + 1` (smoothed IDF).
pub fn idf(total_docs: usize, document_frequency: usize) -> f64 {
    let n = total_docs as f64;
    let df = document_frequency as f64;
    ((n + 1.0) / (df + 1.0)).ln() + 1.0
}

pub fn boost(is_important: bool) -> f64 {
    if is_important {
        IMPORTANT_BOOST
    } else {
        NOT_IMPORTANT_BOOST
    }
}

/// The full per-document score given the per-term contributions already
/// summed: `score(d) = 1.15 * (1/sqrt(q)) * Σ ...`.
pub fn combine(query_term_count: usize, summed_term_contributions: f64) -> f64 {
    if query_term_count == 0 {
        return 0.0;
    }
    COMPLETE_MATCH_BONUS * (1.0 / (query_term_count as f64).sqrt()) * summed_term_contributions
}
