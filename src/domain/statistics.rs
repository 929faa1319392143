// ============================================================
// Layer 3 — Epoch Statistics
// ============================================================
// Collects every per-step observation made during one epoch:
//
//   - supervised generator losses
//   - adversarial generator losses
//   - discriminator losses
//   - expected rewards from adversarial steps
//   - correctness flags (did the generated sequence have the
//     valley shape?) for both generator modes
//   - the last sequence produced in each mode
//
// Every list starts with one zero entry so that taking a mean is
// always defined, even when a kind of step never ran. Means are
// reported over the full list, seed entry included.
//
// A fresh record is created at the start of each epoch and
// discarded once it has been summarised.

use serde::{Deserialize, Serialize};

use crate::domain::sequence::Sequence;

/// Mutable per-epoch aggregation record
#[derive(Debug, Clone, PartialEq)]
pub struct EpochStatistics {
    pub supervised_g_losses:   Vec<f64>,
    pub unsupervised_g_losses: Vec<f64>,
    pub d_losses:              Vec<f64>,
    pub expected_rewards:      Vec<f64>,
    pub supervised_correct:    Vec<bool>,
    pub unsupervised_correct:  Vec<bool>,

    /// Argmax prediction from the most recent supervised step
    pub last_supervised:   Option<Sequence>,

    /// Sample from the most recent adversarial step
    pub last_unsupervised: Option<Sequence>,

    /// How many discriminator steps used oracle data vs generator samples
    pub d_real_steps: usize,
    pub d_gen_steps:  usize,
}

impl EpochStatistics {
    /// Create a record with the single zero seed entry in each list
    pub fn new() -> Self {
        Self {
            supervised_g_losses:   vec![0.0],
            unsupervised_g_losses: vec![0.0],
            d_losses:              vec![0.0],
            expected_rewards:      vec![0.0],
            supervised_correct:    vec![false],
            unsupervised_correct:  vec![false],
            last_supervised:       None,
            last_unsupervised:     None,
            d_real_steps:          0,
            d_gen_steps:           0,
        }
    }

    /// Record a supervised generator step
    pub fn record_supervised(&mut self, loss: f64, predicted: Sequence, correct: bool) {
        self.supervised_g_losses.push(loss);
        self.supervised_correct.push(correct);
        self.last_supervised = Some(predicted);
    }

    /// Record an adversarial generator step
    pub fn record_adversarial(
        &mut self,
        loss:            f64,
        expected_reward: f64,
        sample:          Sequence,
        correct:         bool,
    ) {
        self.unsupervised_g_losses.push(loss);
        self.expected_rewards.push(expected_reward);
        self.unsupervised_correct.push(correct);
        self.last_unsupervised = Some(sample);
    }

    /// Record a discriminator step; `real` tells which data source was used
    pub fn record_discriminator(&mut self, loss: f64, real: bool) {
        self.d_losses.push(loss);
        if real {
            self.d_real_steps += 1;
        } else {
            self.d_gen_steps += 1;
        }
    }

    /// Number of supervised generator steps taken (seed entry excluded)
    pub fn supervised_steps(&self) -> usize {
        self.supervised_g_losses.len() - 1
    }

    /// Number of adversarial generator steps taken (seed entry excluded)
    pub fn unsupervised_steps(&self) -> usize {
        self.unsupervised_g_losses.len() - 1
    }

    /// Collapse the record into the means and last samples that get reported
    pub fn summarize(&self) -> EpochSummary {
        let g_total = self.supervised_steps() + self.unsupervised_steps();
        let supervised_ratio = if g_total > 0 {
            self.supervised_steps() as f64 / g_total as f64
        } else {
            0.0
        };

        EpochSummary {
            supervised_steps:       self.supervised_steps(),
            unsupervised_steps:     self.unsupervised_steps(),
            supervised_ratio,
            d_real_steps:           self.d_real_steps,
            d_gen_steps:            self.d_gen_steps,
            mean_d_loss:            mean(&self.d_losses),
            mean_supervised_loss:   mean(&self.supervised_g_losses),
            mean_unsupervised_loss: mean(&self.unsupervised_g_losses),
            supervised_correct:     rate(&self.supervised_correct),
            unsupervised_correct:   rate(&self.unsupervised_correct),
            mean_expected_reward:   mean(&self.expected_rewards),
            last_supervised:        self.last_supervised.clone(),
            last_unsupervised:      self.last_unsupervised.clone(),
        }
    }
}

impl Default for EpochStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// What gets reported at the end of an epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochSummary {
    pub supervised_steps:       usize,
    pub unsupervised_steps:     usize,
    /// Fraction of generator steps that were supervised
    pub supervised_ratio:       f64,
    pub d_real_steps:           usize,
    pub d_gen_steps:            usize,
    pub mean_d_loss:            f64,
    pub mean_supervised_loss:   f64,
    pub mean_unsupervised_loss: f64,
    /// Fraction of supervised predictions with the valley shape
    pub supervised_correct:     f64,
    /// Fraction of adversarial samples with the valley shape
    pub unsupervised_correct:   f64,
    pub mean_expected_reward:   f64,
    pub last_supervised:        Option<Sequence>,
    pub last_unsupervised:      Option<Sequence>,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn rate(flags: &[bool]) -> f64 {
    if flags.is_empty() {
        return 0.0;
    }
    flags.iter().filter(|&&f| f).count() as f64 / flags.len() as f64
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_seeded() {
        let stats = EpochStatistics::new();
        assert_eq!(stats.supervised_g_losses, vec![0.0]);
        assert_eq!(stats.unsupervised_g_losses, vec![0.0]);
        assert_eq!(stats.d_losses, vec![0.0]);
        assert_eq!(stats.expected_rewards, vec![0.0]);
        assert_eq!(stats.supervised_correct.len(), 1);
        assert_eq!(stats.unsupervised_correct.len(), 1);
        assert_eq!(stats.supervised_steps(), 0);
        assert_eq!(stats.unsupervised_steps(), 0);
    }

    #[test]
    fn test_empty_summary_is_all_zero() {
        let summary = EpochStatistics::new().summarize();
        assert_eq!(summary.mean_d_loss, 0.0);
        assert_eq!(summary.mean_supervised_loss, 0.0);
        assert_eq!(summary.mean_unsupervised_loss, 0.0);
        assert_eq!(summary.mean_expected_reward, 0.0);
        assert_eq!(summary.supervised_correct, 0.0);
        assert_eq!(summary.unsupervised_correct, 0.0);
        assert_eq!(summary.supervised_ratio, 0.0);
        assert!(summary.last_supervised.is_none());
        assert!(summary.last_unsupervised.is_none());
    }

    #[test]
    fn test_means_include_seed_entry() {
        let mut stats = EpochStatistics::new();
        stats.record_supervised(2.0, vec![3, 2, 1], true);
        stats.record_supervised(4.0, vec![1, 3, 2], false);

        let summary = stats.summarize();
        // (0 + 2 + 4) / 3
        assert!((summary.mean_supervised_loss - 2.0).abs() < 1e-12);
        // one correct out of three entries
        assert!((summary.supervised_correct - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.last_supervised, Some(vec![1, 3, 2]));
        assert_eq!(summary.supervised_ratio, 1.0);
    }

    #[test]
    fn test_adversarial_and_discriminator_records() {
        let mut stats = EpochStatistics::new();
        stats.record_adversarial(1.5, 0.5, vec![2, 1, 3], true);
        stats.record_discriminator(0.6, true);
        stats.record_discriminator(0.8, false);
        stats.record_discriminator(1.0, false);

        let summary = stats.summarize();
        assert_eq!(summary.unsupervised_steps, 1);
        assert_eq!(summary.supervised_steps, 0);
        assert_eq!(summary.supervised_ratio, 0.0);
        assert!((summary.mean_unsupervised_loss - 0.75).abs() < 1e-12);
        assert!((summary.mean_expected_reward - 0.25).abs() < 1e-12);
        assert!((summary.unsupervised_correct - 0.5).abs() < 1e-12);
        assert!((summary.mean_d_loss - 0.6).abs() < 1e-12);
        assert_eq!(summary.d_real_steps, 1);
        assert_eq!(summary.d_gen_steps, 2);
        assert_eq!(summary.last_unsupervised, Some(vec![2, 1, 3]));
    }
}
