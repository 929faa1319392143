// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish one
// goal: a full curriculum-driven adversarial training run.
//
// Rules for this layer:
//   - No burn code here (that's Layer 5)
//   - No printing beyond what infra/report does
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern

// The training workflow
pub mod train_use_case;
