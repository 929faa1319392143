// ============================================================
// Layer 5 — Curriculum Scheduler
// ============================================================
// Decides what fraction of generator steps use supervised
// (ground-truth) targets in a given epoch:
//
//   p(epoch) = max(0, 1 - rate * epoch)
//
// Epoch 0 is fully supervised. Once epoch >= 1 / rate the
// generator learns only from the discriminator. The value is a
// pure function of the epoch index; nothing is stored.

use crate::domain::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurriculumScheduler {
    rate: f64,
}

impl CurriculumScheduler {
    /// A rate of 0 keeps training fully supervised forever.
    pub fn new(rate: f64) -> Result<Self, ConfigError> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::InvalidCurriculumRate(rate));
        }
        Ok(Self { rate })
    }

    /// Supervised proportion for `epoch`, always within [0, 1].
    pub fn proportion_supervised(&self, epoch: usize) -> f64 {
        (1.0 - self.rate * epoch as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_epoch_zero_is_fully_supervised() {
        let s = CurriculumScheduler::new(0.03).unwrap();
        assert_eq!(s.proportion_supervised(0), 1.0);
    }

    #[test]
    fn test_reaches_exact_zero() {
        let s = CurriculumScheduler::new(0.03).unwrap();
        assert_eq!(s.proportion_supervised(34), 0.0);
        assert_eq!(s.proportion_supervised(1_000_000), 0.0);
        assert_eq!(s.proportion_supervised(usize::MAX), 0.0);
    }

    #[test]
    fn test_linear_decay() {
        let s = CurriculumScheduler::new(0.25).unwrap();
        assert_eq!(s.proportion_supervised(1), 0.75);
        assert_eq!(s.proportion_supervised(2), 0.5);
        assert_eq!(s.proportion_supervised(4), 0.0);
        assert_eq!(s.proportion_supervised(5), 0.0);
    }

    #[test]
    fn test_zero_rate_stays_supervised() {
        let s = CurriculumScheduler::new(0.0).unwrap();
        assert_eq!(s.proportion_supervised(10_000), 1.0);
    }

    #[test]
    fn test_rejects_invalid_rates() {
        assert!(CurriculumScheduler::new(-0.1).is_err());
        assert!(CurriculumScheduler::new(f64::NAN).is_err());
        assert!(CurriculumScheduler::new(f64::INFINITY).is_err());
    }

    proptest! {
        #[test]
        fn prop_bounded_and_non_increasing(rate in 0.0f64..2.0, epoch in 0usize..10_000) {
            let s = CurriculumScheduler::new(rate).unwrap();
            let now  = s.proportion_supervised(epoch);
            let next = s.proportion_supervised(epoch + 1);
            prop_assert!((0.0..=1.0).contains(&now));
            prop_assert!(next <= now);
        }
    }
}
