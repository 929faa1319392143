// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The epoch trainer never sees a concrete network. It only needs
// something that can perform the four training steps below, so
// any numeric backend that implements TrainableModel can be
// driven by the same curriculum and statistics code.
//
// Implementations:
//   - AdversarialGru (ml/adversarial.rs) → burn GRU generator
//     and discriminator on the CPU
//   - ScriptedModel (test-only) → canned losses and sequences
//
// Every step is a blocking call that mutates the model's own
// parameters. A failing step returns Err and the caller aborts.

use anyhow::Result;

use crate::domain::sequence::{Sequence, Token};

/// Result of one supervised (teacher-forced) generator update
#[derive(Debug, Clone, PartialEq)]
pub struct PretrainOutput {
    /// Cross-entropy loss against the target sequence
    pub loss: f64,

    /// Per-position token probabilities, L rows of V columns.
    /// Taking the argmax of each row gives the predicted sequence.
    pub probabilities: Vec<Vec<f32>>,
}

/// Result of one adversarial (policy-gradient) generator update
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOutput {
    /// Policy-gradient loss for the sampled sequence
    pub loss: f64,

    /// Mean reward the discriminator assigned to the sample
    pub expected_reward: f64,

    /// The sequence the generator sampled for this update
    pub sample: Sequence,
}

// ─── TrainableModel ───────────────────────────────────────────────────────────
/// A generator/discriminator pair that can be trained one step at a time.
pub trait TrainableModel {
    /// Supervised generator step on a ground-truth sequence.
    fn pretrain_step(&mut self, target: &[Token]) -> Result<PretrainOutput>;

    /// Adversarial generator step. The model samples its own sequence
    /// and is rewarded by the discriminator's judgement of it.
    fn train_g_step(&mut self) -> Result<GeneratorOutput>;

    /// Discriminator step on real data. Returns the discriminator loss.
    fn train_d_real_step(&mut self, real: &[Token]) -> Result<f64>;

    /// Discriminator step on a sequence the generator samples internally.
    /// Returns the discriminator loss.
    fn train_d_gen_step(&mut self) -> Result<f64>;
}
