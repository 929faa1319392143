// ============================================================
// Layer 4 — Data
// ============================================================
// The only data in this system is synthetic: "valley" token
// sequences that first descend (non-increasing) and then ascend
// (non-decreasing), never containing the start token.
//
//   SequenceOracle::sample  → ground truth for supervised steps
//                             and "real" discriminator examples
//   SequenceOracle::verify  → scores generated sequences
//
// Nothing here touches burn or the file system.

/// Valley sequence sampler and shape checker
pub mod oracle;
