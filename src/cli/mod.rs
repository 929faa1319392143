// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with clap.
// All business logic is delegated to Layer 2 (application) or,
// for the two inspection commands, straight to the oracle.
//
// Commands:
//   1. `train`  — run the curriculum + adversarial training loop
//   2. `sample` — print ground-truth valley sequences
//   3. `verify` — check a token list against the valley shape

pub mod commands;

use anyhow::Result;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use crate::data::oracle::SequenceOracle;
use commands::{Commands, OracleArgs, SampleArgs, TrainArgs, VerifyArgs};

/// The main CLI struct — clap derives the parser from its fields.
#[derive(Parser, Debug)]
#[command(
    name = "valley-gan",
    version = "0.1.0",
    about = "Train a GRU generator to emit valley-shaped token sequences against a GRU discriminator."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the selected command. This layer only routes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)  => run_train(args),
            Commands::Sample(args) => run_sample(args),
            Commands::Verify(args) => run_verify(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    let use_case = TrainUseCase::new(args.into())?;
    tracing::info!(
        "Starting training: {} iterations in epochs of {}",
        use_case.config().total_iterations,
        use_case.config().epoch_size,
    );
    use_case.execute()?;

    println!("Training complete.");
    Ok(())
}

fn run_sample(args: SampleArgs) -> Result<()> {
    let oracle  = build_oracle(&args.oracle)?;
    let mut rng = StdRng::seed_from_u64(args.seed);

    for _ in 0..args.count {
        let seq = oracle.sample(&mut rng);
        println!("{:?}", seq);
    }
    Ok(())
}

fn run_verify(args: VerifyArgs) -> Result<()> {
    let oracle = build_oracle(&args.oracle)?;
    let valid  = oracle.verify(&args.tokens);
    println!("{:?} is {}", args.tokens, if valid { "valid" } else { "invalid" });
    Ok(())
}

fn build_oracle(args: &OracleArgs) -> Result<SequenceOracle> {
    Ok(SequenceOracle::new(args.vocab_size, args.seq_length, args.start_token)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_train_defaults() {
        let cli = Cli::try_parse_from(["valley-gan", "train"]).unwrap();
        match cli.command {
            Commands::Train(args) => {
                assert_eq!(args.vocab_size, 4);
                assert_eq!(args.seq_length, 5);
                assert_eq!(args.discriminator_steps, 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parses_verify_token_list() {
        let cli = Cli::try_parse_from(["valley-gan", "verify", "--tokens", "3,1,2"]).unwrap();
        match cli.command {
            Commands::Verify(args) => assert_eq!(args.tokens, vec![3, 1, 2]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_verify_out_of_vocabulary_tokens_are_invalid() {
        let args = VerifyArgs {
            oracle: OracleArgs { vocab_size: 4, seq_length: 3, start_token: 0 },
            tokens: vec![3, 2, 9],
        };
        let oracle = build_oracle(&args.oracle).unwrap();
        assert!(!oracle.verify(&args.tokens));
        assert!(run_verify(args).is_ok());
    }

    #[test]
    fn test_sample_rejects_bad_vocabulary() {
        let cli = Cli::try_parse_from(["valley-gan", "sample", "--vocab-size", "1"]).unwrap();
        assert!(cli.run().is_err());
    }
}
