// ============================================================
// Layer 5 — Adversarial GRU (TrainableModel on burn)
// ============================================================
// Wires the GRU generator and discriminator to the four training
// steps the epoch trainer calls.
//
//   pretrain_step      teacher-forced cross entropy on a target
//   train_g_step       REINFORCE: sample x ~ G, reward each prefix
//                      with σ(D(x[0..=t])), discount rewards-to-go,
//                      loss = -mean(log G(x_t) · R_t)
//   train_d_real_step  binary cross entropy, label 1
//   train_d_gen_step   binary cross entropy on a fresh sample, label 0
//
// Generator and discriminator each have their own Adam optimiser.
// Sampling and reward scoring run on the inner (non-autodiff)
// backend via .valid(), so only the loss computation is tracked.
//
// A non-finite loss is returned as an error; the caller treats it
// as fatal for the run.

use anyhow::{bail, Result};
use burn::{
    backend::{Autodiff, NdArray},
    module::AutodiffModule,
    nn::loss::CrossEntropyLossConfig,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::{
        activation::{log_softmax, sigmoid, softmax},
        backend::AutodiffBackend,
    },
};
use rand::{rngs::StdRng, SeedableRng};

use crate::domain::sequence::Token;
use crate::domain::traits::{GeneratorOutput, PretrainOutput, TrainableModel};
use crate::ml::model::{Discriminator, Generator, ValleyGruConfig};

/// CPU backend with autodiff; the networks are tiny
pub type TrainBackend = Autodiff<NdArray>;

/// Keeps log() away from zero in the discriminator loss
const LOG_EPS: f64 = 1e-7;

pub struct AdversarialGru<B: AutodiffBackend, GO, DO> {
    generator:     Generator<B>,
    discriminator: Discriminator<B>,
    g_optim:       GO,
    d_optim:       DO,
    /// Token sampling inside the model; independent of the trainer's rng
    rng:           StdRng,
    device:        B::Device,
    seq_length:    usize,
    learning_rate: f64,
    reward_gamma:  f64,
}

/// Build both networks and their optimisers on `device`.
pub fn build_model<B: AutodiffBackend>(
    cfg:           &ValleyGruConfig,
    learning_rate: f64,
    reward_gamma:  f64,
    seed:          u64,
    device:        &B::Device,
) -> AdversarialGru<B, impl Optimizer<Generator<B>, B>, impl Optimizer<Discriminator<B>, B>> {
    AdversarialGru {
        generator:     cfg.init_generator::<B>(device),
        discriminator: cfg.init_discriminator::<B>(device),
        g_optim:       AdamConfig::new().init(),
        d_optim:       AdamConfig::new().init(),
        rng:           StdRng::seed_from_u64(seed),
        device:        device.clone(),
        seq_length:    cfg.seq_length,
        learning_rate,
        reward_gamma,
    }
}

impl<B, GO, DO> AdversarialGru<B, GO, DO>
where
    B: AutodiffBackend,
    GO: Optimizer<Generator<B>, B>,
    DO: Optimizer<Discriminator<B>, B>,
{
    fn int_tensor(&self, tokens: &[Token]) -> Tensor<B, 1, Int> {
        let ids: Vec<i32> = tokens.iter().map(|&t| t as i32).collect();
        Tensor::<B, 1, Int>::from_ints(ids.as_slice(), &self.device)
    }

    /// Sample a sequence without tracking gradients
    fn sample_sequence(&mut self) -> Result<Vec<Token>> {
        self.generator.valid().sample(&mut self.rng, self.seq_length)
    }

    /// σ(D(prefix)) for every prefix of `seq`
    fn prefix_rewards(&self, seq: &[Token]) -> Result<Vec<f32>> {
        sigmoid(self.discriminator.valid().forward(seq))
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("reading discriminator scores: {e:?}"))
    }

    fn step_generator(&mut self, loss: Tensor<B, 1>) {
        let grads = GradientsParams::from_grads(loss.backward(), &self.generator);
        self.generator = self.g_optim.step(self.learning_rate, self.generator.clone(), grads);
    }

    fn step_discriminator(&mut self, loss: Tensor<B, 1>) {
        let grads = GradientsParams::from_grads(loss.backward(), &self.discriminator);
        self.discriminator = self.d_optim.step(self.learning_rate, self.discriminator.clone(), grads);
    }

    /// Binary cross entropy over every prefix logit, then one Adam step.
    fn train_discriminator(&mut self, seq: &[Token], real: bool) -> Result<f64> {
        let probs = sigmoid(self.discriminator.forward(seq));
        let likelihood = if real {
            probs.add_scalar(LOG_EPS)
        } else {
            probs.neg().add_scalar(1.0 + LOG_EPS)
        };
        let loss = likelihood.log().mean().neg();

        let loss_val = loss.clone().into_scalar().elem::<f64>();
        if !loss_val.is_finite() {
            bail!("discriminator loss is not finite ({loss_val})");
        }
        self.step_discriminator(loss);
        Ok(loss_val)
    }
}

impl<B, GO, DO> TrainableModel for AdversarialGru<B, GO, DO>
where
    B: AutodiffBackend,
    GO: Optimizer<Generator<B>, B>,
    DO: Optimizer<Discriminator<B>, B>,
{
    fn pretrain_step(&mut self, target: &[Token]) -> Result<PretrainOutput> {
        let logits = self.generator.forward(target);
        let [_, vocab_size] = logits.dims();

        let probabilities: Vec<Vec<f32>> = softmax(logits.clone(), 1)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("reading generator probabilities: {e:?}"))?
            .chunks(vocab_size)
            .map(<[f32]>::to_vec)
            .collect();

        let ce = CrossEntropyLossConfig::new().init(&self.device);
        let loss = ce.forward(logits, self.int_tensor(target));

        let loss_val = loss.clone().into_scalar().elem::<f64>();
        if !loss_val.is_finite() {
            bail!("pretraining loss is not finite ({loss_val})");
        }
        self.step_generator(loss);

        Ok(PretrainOutput { loss: loss_val, probabilities })
    }

    fn train_g_step(&mut self) -> Result<GeneratorOutput> {
        let sample  = self.sample_sequence()?;
        let rewards = self.prefix_rewards(&sample)?;
        let expected_reward =
            rewards.iter().map(|&r| r as f64).sum::<f64>() / rewards.len().max(1) as f64;
        let returns = discounted_returns(&rewards, self.reward_gamma as f32);

        let len = sample.len();
        let logits = self.generator.forward(&sample);
        let chosen = log_softmax(logits, 1).gather(1, self.int_tensor(&sample).reshape([len, 1]));
        let weights = Tensor::<B, 1>::from_floats(returns.as_slice(), &self.device).reshape([len, 1]);
        let loss = (chosen * weights).mean().neg();

        let loss_val = loss.clone().into_scalar().elem::<f64>();
        if !loss_val.is_finite() {
            bail!("policy-gradient loss is not finite ({loss_val})");
        }
        self.step_generator(loss);

        Ok(GeneratorOutput { loss: loss_val, expected_reward, sample })
    }

    fn train_d_real_step(&mut self, real: &[Token]) -> Result<f64> {
        self.train_discriminator(real, true)
    }

    fn train_d_gen_step(&mut self) -> Result<f64> {
        let sample = self.sample_sequence()?;
        self.train_discriminator(&sample, false)
    }
}

/// R_t = Σ_{k≥t} γ^(k-t) r_k / Σ_{k≥t} γ^(k-t), so every return stays in the reward range.
fn discounted_returns(rewards: &[f32], gamma: f32) -> Vec<f32> {
    let mut returns = vec![0.0; rewards.len()];
    let mut acc    = 0.0f32;
    let mut weight = 0.0f32;
    for (t, &r) in rewards.iter().enumerate().rev() {
        acc    = r + gamma * acc;
        weight = 1.0 + gamma * weight;
        returns[t] = acc / weight;
    }
    returns
}
