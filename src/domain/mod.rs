// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits that describe the training problem:
// what a token sequence is, what a trainable model must offer,
// and how per-epoch statistics are collected.
//
// Rules for this layer:
//   - NO burn types here
//   - NO randomness, no I/O
//   - Only plain structs, enums, and traits
//
// Everything above this layer (ml, application) programs against
// these definitions, so a numeric backend can be swapped by
// implementing one trait.

// Token and sequence aliases plus small helpers
pub mod sequence;

// Per-epoch aggregation record and its summary
pub mod statistics;

// The TrainableModel collaborator contract
pub mod traits;

// Typed configuration errors
pub mod error;
