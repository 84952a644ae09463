//! Deterministic SIR epidemic engine.
//!
//! The numerical core ([`integrator::integrate`] and [`statistics::summarize`])
//! is pure and stateless; everything else here (reports, writers, batches) is
//! plumbing for front ends that call it.

pub mod batch;
pub mod integrator;
pub mod model;
pub mod output;
pub mod report;
pub mod statistics;

pub use batch::{run_batch, ScenarioOutcome};
pub use integrator::{integrate, SirIntegrator, SolverSettings};
pub use model::{SirModel, SirState};
pub use report::StatsReport;
pub use statistics::summarize;
