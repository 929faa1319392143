// ============================================================
// Layer 5 — ML Layer
// ============================================================
// Everything that decides how the generator and discriminator
// are trained lives here:
//
//   curriculum.rs    — supervised proportion per epoch
//                      p(epoch) = max(0, 1 - rate * epoch)
//
//   epoch_trainer.rs — one epoch of generator steps (supervised
//                      or adversarial by weighted coin flip)
//                      followed by discriminator steps (real or
//                      generated by fair coin flip), aggregated
//                      into EpochStatistics
//
//   model.rs         — burn GRU generator and discriminator
//
//   adversarial.rs   — TrainableModel implementation over the
//                      burn networks with two Adam optimisers
//
// Only model.rs and adversarial.rs import burn. The curriculum
// and epoch trainer only see the TrainableModel trait.

/// Linear decay of the supervised proportion
pub mod curriculum;

/// Per-epoch step scheduling and statistics
pub mod epoch_trainer;

/// GRU networks
pub mod model;

/// burn-backed TrainableModel
pub mod adversarial;

#[cfg(test)]
pub mod scripted;
