// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training run in order:
//
//   Step 1: Validate configuration          (before any step runs)
//   Step 2: Seed the trainer's rng          (reproducibility)
//   Step 3: Open the session                (Layer 6 - infra)
//             seeds the backend, builds generator + discriminator
//   Step 4: For each epoch:
//             proportion = curriculum(epoch) (Layer 5 - ml)
//             stats = run_epoch(...)         (Layer 5 - ml)
//             report(stats)                  (Layer 6 - infra)
//
// The number of epochs is total_iterations / epoch_size. Any
// failing model step ends the run with an error; the session is
// released on the way out.

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::oracle::SequenceOracle;
use crate::domain::error::ConfigError;
use crate::domain::statistics::EpochSummary;
use crate::domain::traits::TrainableModel;
use crate::infra::report::{log_epoch, EpochPlan};
use crate::infra::session::{open_cpu_session, TrainingSession};
use crate::ml::curriculum::CurriculumScheduler;
use crate::ml::epoch_trainer::EpochTrainer;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run. Fixed once validated;
// nothing reads process-wide globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Token-space cardinality, start token included
    pub vocab_size:          usize,
    pub emb_dim:             usize,
    pub hidden_dim:          usize,
    /// Fixed length of every generated and oracle sequence
    pub seq_length:          usize,
    /// Reserved sentinel, never valid content
    pub start_token:         u32,
    /// Iterations per epoch
    pub epoch_size:          usize,
    /// Iterations over the whole run
    pub total_iterations:    usize,
    /// Supervised proportion drops by this much each epoch
    pub curriculum_rate:     f64,
    pub generator_steps:     usize,
    pub discriminator_steps: usize,
    pub learning_rate:       f64,
    /// Discount applied to per-prefix rewards in adversarial steps
    pub reward_gamma:        f64,
    pub seed:                u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        let seq_length = 5;
        Self {
            vocab_size:          4,
            emb_dim:             5,
            hidden_dim:          10,
            seq_length,
            start_token:         0,
            epoch_size:          1000,
            total_iterations:    100_000,
            curriculum_rate:     0.03,
            generator_steps:     1,
            discriminator_steps: 2,
            learning_rate:       0.01 * seq_length as f64,
            reward_gamma:        0.9,
            seed:                88,
        }
    }
}

impl TrainConfig {
    /// Reject values that would make training meaningless or crash mid-run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Sequence length, vocabulary, and start token
        SequenceOracle::new(self.vocab_size, self.seq_length, self.start_token)?;
        CurriculumScheduler::new(self.curriculum_rate)?;

        if self.emb_dim == 0 {
            return Err(ConfigError::ZeroDimension("emb_dim"));
        }
        if self.hidden_dim == 0 {
            return Err(ConfigError::ZeroDimension("hidden_dim"));
        }
        if self.epoch_size == 0 {
            return Err(ConfigError::ZeroEpochSize);
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        if !(0.0..=1.0).contains(&self.reward_gamma) {
            return Err(ConfigError::InvalidRewardGamma(self.reward_gamma));
        }
        Ok(())
    }

    pub fn num_epochs(&self) -> usize {
        self.total_iterations / self.epoch_size
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config:     TrainConfig,
    oracle:     SequenceOracle,
    curriculum: CurriculumScheduler,
}

impl TrainUseCase {
    /// Validate `config` and prepare the oracle and curriculum.
    pub fn new(config: TrainConfig) -> Result<Self> {
        config.validate()?;
        let oracle     = SequenceOracle::new(config.vocab_size, config.seq_length, config.start_token)?;
        let curriculum = CurriculumScheduler::new(config.curriculum_rate)?;
        Ok(Self { config, oracle, curriculum })
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Run the whole training loop on the CPU backend
    pub fn execute(&self) -> Result<Vec<EpochSummary>> {
        tracing::info!("Configuration: {}", serde_json::to_string(&self.config)?);
        self.train(open_cpu_session(&self.config))
    }

    /// Train the model held by `session`. The session is consumed and
    /// released on return, whether training finished or failed.
    pub fn train<M: TrainableModel>(&self, mut session: TrainingSession<M>) -> Result<Vec<EpochSummary>> {
        let cfg = &self.config;
        let mut rng = StdRng::seed_from_u64(cfg.seed);

        tracing::info!("Training for {} epochs", cfg.num_epochs());
        let summaries = self.run_epochs(&mut session, &mut rng)?;

        if let Some(last) = summaries.last() {
            tracing::info!(
                "Training complete after {} epochs: final correct rates (sup, unsup) = {:.3}, {:.3}",
                session.epochs_completed(), last.supervised_correct, last.unsupervised_correct,
            );
        }
        Ok(summaries)
    }

    /// Drive every epoch against whatever model the session holds.
    pub fn run_epochs<M: TrainableModel>(
        &self,
        session: &mut TrainingSession<M>,
        rng:     &mut StdRng,
    ) -> Result<Vec<EpochSummary>> {
        let cfg     = &self.config;
        let trainer = EpochTrainer::new(&self.oracle);
        let mut summaries = Vec::with_capacity(cfg.num_epochs());

        for epoch in 0..cfg.num_epochs() {
            let plan = EpochPlan {
                epoch,
                iterations:            cfg.epoch_size,
                g_steps:               cfg.generator_steps,
                d_steps:               cfg.discriminator_steps,
                proportion_supervised: self.curriculum.proportion_supervised(epoch),
            };

            let stats = trainer.run_epoch(
                session.model_mut(),
                rng,
                plan.iterations,
                plan.proportion_supervised,
                plan.g_steps,
                plan.d_steps,
            )?;
            session.finish_epoch();

            let summary = stats.summarize();
            log_epoch(&plan, &summary);
            summaries.push(summary);
        }

        Ok(summaries)
    }
}
