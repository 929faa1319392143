// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands and all their configurable flags.
// Defaults reproduce the reference training run: a 4-token
// vocabulary, length-5 sequences, 100 epochs of 1000 iterations.

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::domain::sequence::Token;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the generator and discriminator
    Train(TrainArgs),

    /// Print ground-truth valley sequences from the oracle
    Sample(SampleArgs),

    /// Check whether a token list has the valley shape
    Verify(VerifyArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Number of distinct tokens, start token included
    #[arg(long, default_value_t = 4)]
    pub vocab_size: usize,

    /// Token embedding width
    #[arg(long, default_value_t = 5)]
    pub emb_dim: usize,

    /// GRU hidden-state width
    #[arg(long, default_value_t = 10)]
    pub hidden_dim: usize,

    /// Length of every sequence
    #[arg(long, default_value_t = 5)]
    pub seq_length: usize,

    /// Reserved start token; never valid inside a sequence
    #[arg(long, default_value_t = 0)]
    pub start_token: Token,

    /// Iterations per epoch
    #[arg(long, default_value_t = 1000)]
    pub epoch_size: usize,

    /// Iterations over the whole run
    #[arg(long, default_value_t = 100_000)]
    pub total_iterations: usize,

    /// How fast training moves from supervised to adversarial
    #[arg(long, default_value_t = 0.03)]
    pub curriculum_rate: f64,

    /// Generator steps per iteration
    #[arg(long, default_value_t = 1)]
    pub generator_steps: usize,

    /// Discriminator steps per iteration
    #[arg(long, default_value_t = 2)]
    pub discriminator_steps: usize,

    /// Adam learning rate; defaults to 0.01 * seq_length
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Discount for per-prefix rewards in adversarial steps
    #[arg(long, default_value_t = 0.9)]
    pub reward_gamma: f64,

    /// Seed for every random source
    #[arg(long, default_value_t = 88)]
    pub seed: u64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            vocab_size:          a.vocab_size,
            emb_dim:             a.emb_dim,
            hidden_dim:          a.hidden_dim,
            seq_length:          a.seq_length,
            start_token:         a.start_token,
            epoch_size:          a.epoch_size,
            total_iterations:    a.total_iterations,
            curriculum_rate:     a.curriculum_rate,
            generator_steps:     a.generator_steps,
            discriminator_steps: a.discriminator_steps,
            learning_rate:       a.learning_rate.unwrap_or(0.01 * a.seq_length as f64),
            reward_gamma:        a.reward_gamma,
            seed:                a.seed,
        }
    }
}

/// Vocabulary shape shared by `sample` and `verify`
#[derive(Args, Debug)]
pub struct OracleArgs {
    #[arg(long, default_value_t = 4)]
    pub vocab_size: usize,

    #[arg(long, default_value_t = 5)]
    pub seq_length: usize,

    #[arg(long, default_value_t = 0)]
    pub start_token: Token,
}

#[derive(Args, Debug)]
pub struct SampleArgs {
    #[command(flatten)]
    pub oracle: OracleArgs,

    /// How many sequences to print
    #[arg(long, default_value_t = 10)]
    pub count: usize,

    #[arg(long, default_value_t = 88)]
    pub seed: u64,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub oracle: OracleArgs,

    /// Comma-separated tokens, e.g. 3,1,2
    #[arg(long, value_delimiter = ',', required = true)]
    pub tokens: Vec<Token>,
}
