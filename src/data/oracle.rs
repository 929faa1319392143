// ============================================================
// Layer 4 — Sequence Oracle
// ============================================================
// Produces and checks "valley" sequences.
//
// Valley shape:
//   Scanning left to right, values are non-increasing up to some
//   pivot and non-decreasing after it. Pure descent and pure
//   ascent both count. The start token may never appear.
//
//   [3, 2, 1] → valid   (descent only)
//   [1, 2, 3] → valid   (ascent only)
//   [3, 1, 2] → valid   (descend then ascend)
//   [1, 3, 2] → invalid (ascend then descend)
//
// Sampling:
//   1. Pick a pivot in [0, L) as floor(uniform[0,1) * L)
//   2. Draw L tokens uniformly from the content vocabulary
//   3. Positions <= pivot go left, the rest go right
//   4. Sort left descending, right ascending, concatenate
//
// The right partition is empty when the pivot lands on L-1.
// Every sample satisfies verify() by construction.

use rand::Rng;

use crate::domain::error::ConfigError;
use crate::domain::sequence::{Sequence, Token};

/// Stateless sampler/checker for valley sequences over a fixed vocabulary.
#[derive(Debug, Clone)]
pub struct SequenceOracle {
    vocab_size:     usize,
    seq_length:     usize,
    start_token:    Token,
    /// Every token in [0, vocab_size) except the start token
    content_tokens: Vec<Token>,
}

impl SequenceOracle {
    /// Build an oracle, rejecting configurations that leave no content tokens.
    pub fn new(
        vocab_size:  usize,
        seq_length:  usize,
        start_token: Token,
    ) -> Result<Self, ConfigError> {
        if seq_length == 0 {
            return Err(ConfigError::EmptySequence);
        }
        if vocab_size <= 1 {
            return Err(ConfigError::VocabularyTooSmall(vocab_size));
        }
        if (start_token as usize) >= vocab_size {
            return Err(ConfigError::StartTokenOutOfRange { start: start_token, vocab_size });
        }

        let content_tokens: Vec<Token> = (0..vocab_size as Token)
            .filter(|&t| t != start_token)
            .collect();

        Ok(Self { vocab_size, seq_length, start_token, content_tokens })
    }

    /// Draw one random valley sequence of exactly `seq_length` tokens.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Sequence {
        let pivot = (rng.gen::<f64>() * self.seq_length as f64) as usize;

        let mut left  = Vec::with_capacity(pivot + 1);
        let mut right = Vec::with_capacity(self.seq_length.saturating_sub(pivot + 1));
        for i in 0..self.seq_length {
            let tok = self.content_tokens[rng.gen_range(0..self.content_tokens.len())];
            if i <= pivot {
                left.push(tok);
            } else {
                right.push(tok);
            }
        }

        left.sort_unstable_by(|a, b| b.cmp(a));
        right.sort_unstable();

        left.extend(right);
        left
    }

    /// Check the valley predicate. O(L), stops at the first violation.
    /// Tokens outside [0, vocab_size) are never valid.
    pub fn verify(&self, seq: &[Token]) -> bool {
        if seq.is_empty() {
            return false;
        }

        let mut descending = true;
        // Starts above every token so the first comparison never flips.
        let mut prev = self.vocab_size as u64;

        for &tok in seq {
            if tok == self.start_token || tok as usize >= self.vocab_size {
                return false;
            }
            let cur = tok as u64;
            if descending {
                if cur > prev {
                    descending = false;
                }
            } else if cur < prev {
                return false;
            }
            prev = cur;
        }
        true
    }
}
