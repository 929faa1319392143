// ============================================================
// Layer 6 — Training Session
// ============================================================
// A session owns the model (and with it every trainable
// parameter) for the lifetime of one run. The epoch trainer only
// borrows it, one step at a time, on the driver's thread.
//
// Dropping the session releases the model. Because that happens
// in Drop, it runs on every exit path: normal completion, an
// error propagated with `?`, or a panic unwinding the stack.

use burn::prelude::*;

use crate::application::train_use_case::TrainConfig;
use crate::domain::traits::TrainableModel;
use crate::ml::adversarial::{build_model, TrainBackend};
use crate::ml::model::ValleyGruConfig;

pub struct TrainingSession<M> {
    model:  M,
    /// Human-readable description of where the model runs
    device: String,
    epochs_completed: usize,
}

impl<M: TrainableModel> TrainingSession<M> {
    pub fn open(model: M, device: impl Into<String>) -> Self {
        let device = device.into();
        tracing::info!("Training session opened on {}", device);
        Self { model, device, epochs_completed: 0 }
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn finish_epoch(&mut self) {
        self.epochs_completed += 1;
    }

    pub fn epochs_completed(&self) -> usize {
        self.epochs_completed
    }
}

impl<M> Drop for TrainingSession<M> {
    fn drop(&mut self) {
        tracing::info!(
            "Training session on {} released after {} epochs",
            self.device,
            self.epochs_completed,
        );
    }
}

/// Seed the CPU backend and build the GRU pair described by `cfg`.
pub fn open_cpu_session(cfg: &TrainConfig) -> TrainingSession<impl TrainableModel> {
    let device: <TrainBackend as Backend>::Device = Default::default();
    <TrainBackend as Backend>::seed(&device, cfg.seed);

    let model_cfg = ValleyGruConfig::new(
        cfg.vocab_size, cfg.emb_dim, cfg.hidden_dim, cfg.seq_length, cfg.start_token,
    );
    // Offset so model sampling and the trainer's coin flips use different streams.
    let model = build_model::<TrainBackend>(
        &model_cfg, cfg.learning_rate, cfg.reward_gamma, cfg.seed.wrapping_add(1), &device,
    );
    tracing::info!(
        "Model ready: vocab={}, emb_dim={}, hidden_dim={}, seq_length={}",
        cfg.vocab_size, cfg.emb_dim, cfg.hidden_dim, cfg.seq_length,
    );

    TrainingSession::open(model, format!("{:?}", device))
}
