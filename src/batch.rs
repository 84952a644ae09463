use crate::integrator::{SirIntegrator, SolverSettings};
use crate::statistics::summarize;
use log::debug;
use rayon::prelude::*;
use sir_common::{SimulationParameters, SirResult, SummaryStatistics, Trajectory};
use std::time::{Duration, Instant};

/// Result of one named run within a batch.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub parameters: SimulationParameters,
    pub result: SirResult<(Trajectory, SummaryStatistics)>,
    pub elapsed: Duration,
}

impl ScenarioOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Integrates and summarizes every scenario, in parallel on the Rayon pool.
///
/// Runs share nothing, so each outcome stands on its own: one failing run does
/// not affect the others. Output order matches input order.
pub fn run_batch(
    scenarios: &[(String, SimulationParameters)],
    settings: &SolverSettings,
) -> Vec<ScenarioOutcome> {
    let integrator = SirIntegrator::new(*settings);
    scenarios
        .par_iter()
        .map(|(name, params)| {
            let start = Instant::now();
            let result = integrator.integrate(params).and_then(|trajectory| {
                let summary = summarize(&trajectory, params.population)?;
                Ok((trajectory, summary))
            });
            let elapsed = start.elapsed();
            debug!(
                "Scenario '{}' finished in {:.3} ms (ok: {})",
                name,
                elapsed.as_secs_f64() * 1000.0,
                result.is_ok()
            );
            ScenarioOutcome {
                name: name.clone(),
                parameters: *params,
                result,
                elapsed,
            }
        })
        .collect()
}
