// ============================================================
// Layer 3 — Sequence Types
// ============================================================
// A sequence is a fixed-length list of integer tokens drawn from
// [0, vocab_size). One token value is reserved as the start
// sentinel and never counts as valid content.

/// A single token id
pub type Token = u32;

/// An ordered, fixed-length list of tokens
pub type Sequence = Vec<Token>;

/// Reduce a per-position probability matrix (L rows of V columns) to
/// the most likely token at each position.
///
/// Ties resolve to the lowest token id. An empty row maps to token 0.
pub fn argmax_sequence(probabilities: &[Vec<f32>]) -> Sequence {
    probabilities
        .iter()
        .map(|row| {
            let mut best_idx = 0usize;
            let mut best_val = f32::NEG_INFINITY;
            for (idx, &p) in row.iter().enumerate() {
                if p > best_val {
                    best_val = p;
                    best_idx = idx;
                }
            }
            best_idx as Token
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_picks_largest_per_row() {
        let probs = vec![
            vec![0.1, 0.7, 0.1, 0.1],
            vec![0.0, 0.0, 0.2, 0.8],
            vec![0.5, 0.2, 0.2, 0.1],
        ];
        assert_eq!(argmax_sequence(&probs), vec![1, 3, 0]);
    }

    #[test]
    fn test_argmax_ties_take_first() {
        let probs = vec![vec![0.25, 0.25, 0.25, 0.25]];
        assert_eq!(argmax_sequence(&probs), vec![0]);
    }

    #[test]
    fn test_argmax_empty_matrix() {
        assert!(argmax_sequence(&[]).is_empty());
    }
}
