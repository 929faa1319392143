// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to any single layer:
//
//   session.rs — owns the model and its device for one run and
//                logs when the run's resources are released,
//                whichever way the run ends
//
//   report.rs  — turns an EpochSummary into the console progress
//                line and a structured tracing event

/// Scoped model/device ownership for a training run
pub mod session;

/// Per-epoch progress reporting
pub mod report;
