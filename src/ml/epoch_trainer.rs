// ============================================================
// Layer 5 — Epoch Trainer
// ============================================================
// Runs one epoch of alternating generator/discriminator training
// and collects everything observed along the way.
//
// One iteration:
//
//   repeat g_steps times:
//     u ~ U[0,1)
//     u <  p_supervised → supervised step
//                         target = oracle.sample()
//                         model.pretrain_step(target)
//                         predicted = argmax(probabilities)
//     u >= p_supervised → adversarial step
//                         model.train_g_step()
//     record loss (and reward) + whether the sequence is a valley
//
//   repeat d_steps times:
//     u ~ U[0,1)
//     u < 0.5  → model.train_d_real_step(oracle.sample())
//     u >= 0.5 → model.train_d_gen_step()
//     record discriminator loss
//
// p_supervised = 0.0 never takes the supervised branch and
// p_supervised = 1.0 always does, because u is drawn from [0, 1).
//
// A model step that fails aborts the epoch immediately; the
// partially filled statistics are dropped.

use anyhow::{Context, Result};
use rand::Rng;

use crate::data::oracle::SequenceOracle;
use crate::domain::sequence::argmax_sequence;
use crate::domain::statistics::EpochStatistics;
use crate::domain::traits::TrainableModel;

/// Probability of feeding the discriminator oracle data rather than a generator sample
const REAL_DATA_PROBABILITY: f64 = 0.5;

/// Stateless between calls; borrows the oracle for ground-truth sequences.
pub struct EpochTrainer<'a> {
    oracle: &'a SequenceOracle,
}

impl<'a> EpochTrainer<'a> {
    pub fn new(oracle: &'a SequenceOracle) -> Self {
        Self { oracle }
    }

    /// Run `num_iterations` iterations of `g_steps` generator steps followed
    /// by `d_steps` discriminator steps.
    pub fn run_epoch<M, R>(
        &self,
        model:                 &mut M,
        rng:                   &mut R,
        num_iterations:        usize,
        proportion_supervised: f64,
        g_steps:               usize,
        d_steps:               usize,
    ) -> Result<EpochStatistics>
    where
        M: TrainableModel,
        R: Rng,
    {
        let mut stats = EpochStatistics::new();

        tracing::debug!(
            "running {} iterations with {} g steps and {} d steps",
            num_iterations, g_steps, d_steps,
        );
        tracing::debug!("of the g steps, {:.2} will be supervised", proportion_supervised);

        for it in 0..num_iterations {
            for _ in 0..g_steps {
                if rng.gen::<f64>() < proportion_supervised {
                    self.supervised_step(model, rng, &mut stats)
                        .with_context(|| format!("supervised generator step, iteration {it}"))?;
                } else {
                    self.adversarial_step(model, &mut stats)
                        .with_context(|| format!("adversarial generator step, iteration {it}"))?;
                }
            }

            for _ in 0..d_steps {
                let real = rng.gen::<f64>() < REAL_DATA_PROBABILITY;
                let result = if real {
                    let seq = self.oracle.sample(rng);
                    model.train_d_real_step(&seq)
                } else {
                    model.train_d_gen_step()
                };
                let d_loss = result
                    .with_context(|| format!("discriminator step, iteration {it}"))?;
                stats.record_discriminator(d_loss, real);
            }
        }

        Ok(stats)
    }

    fn supervised_step<M: TrainableModel, R: Rng>(
        &self,
        model: &mut M,
        rng:   &mut R,
        stats: &mut EpochStatistics,
    ) -> Result<()> {
        let target = self.oracle.sample(rng);
        let out = model.pretrain_step(&target)?;

        let predicted = argmax_sequence(&out.probabilities);
        let correct   = self.oracle.verify(&predicted);
        stats.record_supervised(out.loss, predicted, correct);
        Ok(())
    }

    fn adversarial_step<M: TrainableModel>(
        &self,
        model: &mut M,
        stats: &mut EpochStatistics,
    ) -> Result<()> {
        let out = model.train_g_step()?;

        let correct = self.oracle.verify(&out.sample);
        stats.record_adversarial(out.loss, out.expected_reward, out.sample, correct);
        Ok(())
    }
}
