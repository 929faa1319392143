// ============================================================
// Layer 5 — GRU Generator and Discriminator (burn)
// ============================================================
// Both networks share one shape: token embedding → GRU cell
// unrolled over the sequence → linear head.
//
//   Generator      head: hidden_dim → vocab_size logits
//                  input at step t is the token emitted at t-1,
//                  with the start token at t = 0
//
//   Discriminator  head: hidden_dim → 1 logit per position
//                  logit t judges the prefix x[0..=t]
//
// The GRU cell is written out by hand so that it can be stepped
// one token at a time during sampling:
//
//   z  = σ(W_z x + U_z h)
//   r  = σ(W_r x + U_r h)
//   n  = tanh(W_n x + r ⊙ U_n h)
//   h' = (1 - z) ⊙ n + z ⊙ h

use burn::{
    nn::{Embedding, EmbeddingConfig, Linear, LinearConfig},
    prelude::*,
    tensor::activation::{sigmoid, softmax},
};
use rand::Rng;

use crate::domain::sequence::{Sequence, Token};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct ValleyGruConfig {
    pub vocab_size:  usize,
    pub emb_dim:     usize,
    pub hidden_dim:  usize,
    pub seq_length:  usize,
    pub start_token: u32,
}

impl ValleyGruConfig {
    pub fn init_generator<B: Backend>(&self, device: &B::Device) -> Generator<B> {
        Generator {
            embedding:   EmbeddingConfig::new(self.vocab_size, self.emb_dim).init(device),
            cell:        GruCell::new(self.emb_dim, self.hidden_dim, device),
            head:        LinearConfig::new(self.hidden_dim, self.vocab_size).init(device),
            hidden_dim:  self.hidden_dim,
            start_token: self.start_token,
        }
    }

    pub fn init_discriminator<B: Backend>(&self, device: &B::Device) -> Discriminator<B> {
        Discriminator {
            embedding:  EmbeddingConfig::new(self.vocab_size, self.emb_dim).init(device),
            cell:       GruCell::new(self.emb_dim, self.hidden_dim, device),
            head:       LinearConfig::new(self.hidden_dim, 1).init(device),
            hidden_dim: self.hidden_dim,
        }
    }
}

// ─── GRU cell ────────────────────────────────────────────────────────────────
#[derive(Module, Debug)]
pub struct GruCell<B: Backend> {
    /// x → [z | r | n] pre-activations
    input_gates:  Linear<B>,
    /// h → [z | r | n] pre-activations
    hidden_gates: Linear<B>,
    hidden_dim:   usize,
}

impl<B: Backend> GruCell<B> {
    pub fn new(input_dim: usize, hidden_dim: usize, device: &B::Device) -> Self {
        Self {
            input_gates:  LinearConfig::new(input_dim, 3 * hidden_dim).init(device),
            hidden_gates: LinearConfig::new(hidden_dim, 3 * hidden_dim).init(device),
            hidden_dim,
        }
    }

    /// x: [batch, input_dim], h: [batch, hidden_dim] → [batch, hidden_dim]
    pub fn forward(&self, x: Tensor<B, 2>, h: Tensor<B, 2>) -> Tensor<B, 2> {
        let [batch, _] = x.dims();
        let d = self.hidden_dim;

        let gx = self.input_gates.forward(x);
        let gh = self.hidden_gates.forward(h.clone());

        let z = sigmoid(
            gx.clone().slice([0..batch, 0..d]) + gh.clone().slice([0..batch, 0..d]),
        );
        let r = sigmoid(
            gx.clone().slice([0..batch, d..2 * d]) + gh.clone().slice([0..batch, d..2 * d]),
        );
        let n = (gx.slice([0..batch, 2 * d..3 * d]) + r * gh.slice([0..batch, 2 * d..3 * d]))
            .tanh();

        let keep = z.clone().neg().add_scalar(1.0);
        keep * n + z * h
    }
}

/// Embed a token list as a [1, len, emb_dim] tensor
fn embed<B: Backend>(embedding: &Embedding<B>, tokens: &[Token], device: &B::Device) -> Tensor<B, 3> {
    let ids: Vec<i32> = tokens.iter().map(|&t| t as i32).collect();
    let ids = Tensor::<B, 1, Int>::from_ints(ids.as_slice(), device).unsqueeze::<2>();
    embedding.forward(ids)
}

/// Unroll `cell` over a [1, len, emb_dim] input, returning every hidden state as [len, hidden_dim]
fn unroll<B: Backend>(cell: &GruCell<B>, emb: Tensor<B, 3>, hidden_dim: usize) -> Tensor<B, 2> {
    let [_, len, emb_dim] = emb.dims();
    let mut h = Tensor::<B, 2>::zeros([1, hidden_dim], &emb.device());
    let mut states = Vec::with_capacity(len);
    for t in 0..len {
        let x = emb.clone().slice([0..1, t..t + 1, 0..emb_dim]).reshape([1, emb_dim]);
        h = cell.forward(x, h);
        states.push(h.clone());
    }
    Tensor::cat(states, 0)
}

// ─── Generator ───────────────────────────────────────────────────────────────
#[derive(Module, Debug)]
pub struct Generator<B: Backend> {
    pub embedding:   Embedding<B>,
    pub cell:        GruCell<B>,
    pub head:        Linear<B>,
    pub hidden_dim:  usize,
    pub start_token: u32,
}

impl<B: Backend> Generator<B> {
    /// Teacher-forced logits for `target`: row t predicts target[t]
    /// from [start, target[0], ..., target[t-1]]. Shape [len, vocab_size].
    pub fn forward(&self, target: &[Token]) -> Tensor<B, 2> {
        let device = self.head.weight.device();
        let mut inputs = Vec::with_capacity(target.len());
        inputs.push(self.start_token);
        inputs.extend_from_slice(&target[..target.len().saturating_sub(1)]);

        let emb = embed(&self.embedding, &inputs, &device);
        let states = unroll(&self.cell, emb, self.hidden_dim);
        self.head.forward(states)
    }

    /// Sample `len` tokens autoregressively from the softmax of each step's logits.
    pub fn sample<R: Rng>(&self, rng: &mut R, len: usize) -> anyhow::Result<Sequence> {
        let device = self.head.weight.device();
        let mut h = Tensor::<B, 2>::zeros([1, self.hidden_dim], &device);
        let mut token = self.start_token;
        let mut out = Vec::with_capacity(len);

        for _ in 0..len {
            let x = embed(&self.embedding, &[token], &device);
            let [_, _, emb_dim] = x.dims();
            h = self.cell.forward(x.reshape([1, emb_dim]), h);

            let probs: Vec<f32> = softmax(self.head.forward(h.clone()), 1)
                .into_data()
                .to_vec::<f32>()
                .map_err(|e| anyhow::anyhow!("reading generator probabilities: {e:?}"))?;
            token = draw(&probs, rng);
            out.push(token);
        }
        Ok(out)
    }
}

/// Inverse-CDF draw from a discrete distribution
fn draw<R: Rng>(probs: &[f32], rng: &mut R) -> Token {
    let u: f32 = rng.gen();
    let mut acc = 0.0f32;
    for (idx, &p) in probs.iter().enumerate() {
        acc += p;
        if u < acc {
            return idx as Token;
        }
    }
    // Rounding can leave the total just under 1.
    probs.len().saturating_sub(1) as Token
}

// ─── Discriminator ───────────────────────────────────────────────────────────
#[derive(Module, Debug)]
pub struct Discriminator<B: Backend> {
    pub embedding:  Embedding<B>,
    pub cell:       GruCell<B>,
    pub head:       Linear<B>,
    pub hidden_dim: usize,
}

impl<B: Backend> Discriminator<B> {
    /// One real/fake logit per prefix. Shape [len, 1].
    pub fn forward(&self, seq: &[Token]) -> Tensor<B, 2> {
        let device = self.head.weight.device();
        let emb = embed(&self.embedding, seq, &device);
        let states = unroll(&self.cell, emb, self.hidden_dim);
        self.head.forward(states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use rand::{rngs::StdRng, SeedableRng};

    type B = NdArray;

    fn config() -> ValleyGruConfig {
        ValleyGruConfig::new(4, 5, 10, 5, 0)
    }

    #[test]
    fn test_generator_logit_shape() {
        let device = Default::default();
        let g = config().init_generator::<B>(&device);
        assert_eq!(g.forward(&[3, 2, 1, 2, 3]).dims(), [5, 4]);
    }

    #[test]
    fn test_discriminator_logit_shape() {
        let device = Default::default();
        let d = config().init_discriminator::<B>(&device);
        assert_eq!(d.forward(&[3, 2, 1, 2, 3]).dims(), [5, 1]);
    }

    #[test]
    fn test_sample_length_and_range() {
        let device = Default::default();
        let g = config().init_generator::<B>(&device);
        let mut rng = StdRng::seed_from_u64(88);
        let seq = g.sample(&mut rng, 5).unwrap();
        assert_eq!(seq.len(), 5);
        assert!(seq.iter().all(|&t| t < 4));
    }

    #[test]
    fn test_draw_respects_point_mass() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(draw(&[0.0, 0.0, 1.0, 0.0], &mut rng), 2);
        }
    }
}
