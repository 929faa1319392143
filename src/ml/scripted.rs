// Test-only TrainableModel with canned outputs and call counters.

use std::{cell::Cell, rc::Rc};

use anyhow::{bail, Result};

use crate::domain::sequence::{Sequence, Token};
use crate::domain::traits::{GeneratorOutput, PretrainOutput, TrainableModel};

pub const PRETRAIN_LOSS: f64 = 1.0;
pub const G_LOSS:        f64 = 2.0;
pub const REWARD:        f64 = 0.5;
pub const D_REAL_LOSS:   f64 = 0.3;
pub const D_GEN_LOSS:    f64 = 0.7;

pub struct ScriptedModel {
    vocab_size:     usize,
    sample:         Sequence,
    fail_after:     Option<usize>,
    /// Set when the model is dropped
    released:       Option<Rc<Cell<bool>>>,
    pub pretrain_calls: usize,
    pub train_g_calls:  usize,
    pub d_real_calls:   usize,
    pub d_gen_calls:    usize,
    pub seen_targets:   Vec<Sequence>,
}

impl ScriptedModel {
    /// Predictions echo the target; adversarial samples default to all ones.
    pub fn new(seq_length: usize, vocab_size: usize) -> Self {
        Self {
            vocab_size,
            sample:         vec![1; seq_length],
            fail_after:     None,
            released:       None,
            pretrain_calls: 0,
            train_g_calls:  0,
            d_real_calls:   0,
            d_gen_calls:    0,
            seen_targets:   Vec::new(),
        }
    }

    pub fn with_sample(mut self, sample: Sequence) -> Self {
        self.sample = sample;
        self
    }

    /// Every call after the first `n` returns an error.
    pub fn failing_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    pub fn with_release_flag(mut self, flag: Rc<Cell<bool>>) -> Self {
        self.released = Some(flag);
        self
    }

    pub fn total_calls(&self) -> usize {
        self.pretrain_calls + self.train_g_calls + self.d_real_calls + self.d_gen_calls
    }

    fn check(&self) -> Result<()> {
        match self.fail_after {
            Some(n) if self.total_calls() > n => bail!("scripted failure after {n} steps"),
            _ => Ok(()),
        }
    }

    fn one_hot(&self, target: &[Token]) -> Vec<Vec<f32>> {
        target
            .iter()
            .map(|&t| {
                let mut row = vec![0.0; self.vocab_size];
                row[t as usize] = 1.0;
                row
            })
            .collect()
    }
}

impl Drop for ScriptedModel {
    fn drop(&mut self) {
        if let Some(flag) = &self.released {
            flag.set(true);
        }
    }
}

impl TrainableModel for ScriptedModel {
    fn pretrain_step(&mut self, target: &[Token]) -> Result<PretrainOutput> {
        self.pretrain_calls += 1;
        self.check()?;
        self.seen_targets.push(target.to_vec());
        Ok(PretrainOutput { loss: PRETRAIN_LOSS, probabilities: self.one_hot(target) })
    }

    fn train_g_step(&mut self) -> Result<GeneratorOutput> {
        self.train_g_calls += 1;
        self.check()?;
        Ok(GeneratorOutput {
            loss:            G_LOSS,
            expected_reward: REWARD,
            sample:          self.sample.clone(),
        })
    }

    fn train_d_real_step(&mut self, real: &[Token]) -> Result<f64> {
        self.d_real_calls += 1;
        self.check()?;
        self.seen_targets.push(real.to_vec());
        Ok(D_REAL_LOSS)
    }

    fn train_d_gen_step(&mut self) -> Result<f64> {
        self.d_gen_calls += 1;
        self.check()?;
        Ok(D_GEN_LOSS)
    }
}
