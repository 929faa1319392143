// ============================================================
// Layer 6 — Epoch Report
// ============================================================
// Prints one block per epoch to stdout and mirrors the same
// numbers as a structured tracing event, e.g.
//
//   epoch 3 | iters=1000 g=1 d=2 | supervised 0.91 (911/89)
//     d_loss=0.6812 g_loss(sup, unsup)=0.9123, 0.0412
//     correct(sup, unsup)=0.554, 0.012 reward=0.0081
//     samples(sup, unsup)=[3, 2, 1, 1, 2] [2, 3, 1, 1, 3]
//
// The format is for humans only.

use crate::domain::sequence::Sequence;
use crate::domain::statistics::EpochSummary;

/// How an epoch was scheduled
#[derive(Debug, Clone, Copy)]
pub struct EpochPlan {
    pub epoch:                 usize,
    pub iterations:            usize,
    pub g_steps:               usize,
    pub d_steps:               usize,
    pub proportion_supervised: f64,
}

pub fn log_epoch(plan: &EpochPlan, summary: &EpochSummary) {
    println!("{}", format_epoch(plan, summary));

    tracing::info!(
        epoch = plan.epoch,
        proportion_supervised = plan.proportion_supervised,
        supervised_steps = summary.supervised_steps,
        unsupervised_steps = summary.unsupervised_steps,
        d_real_steps = summary.d_real_steps,
        d_gen_steps = summary.d_gen_steps,
        d_loss = summary.mean_d_loss,
        supervised_loss = summary.mean_supervised_loss,
        unsupervised_loss = summary.mean_unsupervised_loss,
        supervised_correct = summary.supervised_correct,
        unsupervised_correct = summary.unsupervised_correct,
        expected_reward = summary.mean_expected_reward,
        "epoch finished"
    );
}

pub fn format_epoch(plan: &EpochPlan, s: &EpochSummary) -> String {
    format!(
        "epoch {} | iters={} g={} d={} | supervised {:.2} ({}/{})\n  \
         d_loss={:.4} g_loss(sup, unsup)={:.4}, {:.4}\n  \
         correct(sup, unsup)={:.3}, {:.3} reward={:.4}\n  \
         samples(sup, unsup)={} {}",
        plan.epoch,
        plan.iterations,
        plan.g_steps,
        plan.d_steps,
        plan.proportion_supervised,
        s.supervised_steps,
        s.unsupervised_steps,
        s.mean_d_loss,
        s.mean_supervised_loss,
        s.mean_unsupervised_loss,
        s.supervised_correct,
        s.unsupervised_correct,
        s.mean_expected_reward,
        show(&s.last_supervised),
        show(&s.last_unsupervised),
    )
}

fn show(seq: &Option<Sequence>) -> String {
    match seq {
        Some(s) => format!("{:?}", s),
        None    => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::statistics::EpochStatistics;

    #[test]
    fn test_format_contains_key_numbers() {
        let mut stats = EpochStatistics::new();
        stats.record_supervised(1.0, vec![3, 2, 1], true);
        stats.record_discriminator(0.5, true);

        let plan = EpochPlan {
            epoch: 7,
            iterations: 1,
            g_steps: 1,
            d_steps: 1,
            proportion_supervised: 0.79,
        };
        let text = format_epoch(&plan, &stats.summarize());

        assert!(text.starts_with("epoch 7 |"));
        assert!(text.contains("supervised 0.79 (1/0)"));
        assert!(text.contains("[3, 2, 1] -"));
    }
}
