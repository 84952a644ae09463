use crate::model::{SirModel, SirState};
use ode_solvers::dop_shared::OutputType;
use ode_solvers::dopri5::Dopri5;
use sir_common::{SimulationParameters, SirError, SirResult, SolverConfig, Trajectory};

/// Sample times are whole days; a dense-output point closer than this to a day is taken as that day.
const SAMPLE_TIME_TOLERANCE: f64 = 1e-9;

// Step-size controller constants, the Dormand-Prince defaults.
const SAFETY_FACTOR: f64 = 0.9;
const STEP_BETA: f64 = 0.04;
const FAC_MIN: f64 = 0.2;
const FAC_MAX: f64 = 10.0;

/// Error tolerances and step limits handed to the Dormand-Prince stepper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    pub relative_tolerance: f64,
    pub absolute_tolerance: f64,
    /// Maximum number of steps for a whole run.
    pub max_steps: u32,
    /// Accepted steps between stiffness tests. `None` never gives up on stiffness.
    pub stiffness_check_interval: Option<u32>,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            relative_tolerance: 1e-6,
            absolute_tolerance: 1e-6,
            max_steps: 1_000_000,
            stiffness_check_interval: None,
        }
    }
}

impl From<&SolverConfig> for SolverSettings {
    fn from(config: &SolverConfig) -> Self {
        Self {
            relative_tolerance: config.relative_tolerance,
            absolute_tolerance: config.absolute_tolerance,
            max_steps: config.max_steps,
            stiffness_check_interval: match config.stiffness_check_interval {
                0 => None,
                n => Some(n),
            },
        }
    }
}

/// Integrates the SIR system over a fixed horizon.
///
/// Holds nothing but solver settings, so one instance can serve any number of
/// runs, from any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SirIntegrator {
    settings: SolverSettings,
}

impl SirIntegrator {
    pub fn new(settings: SolverSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Produces one `[S, I, R]` sample per day over `[0, horizon_days)`.
    ///
    /// Parameters are validated first; a solver error, a missing sample or a
    /// non-finite value fails the whole run rather than returning a partial
    /// trajectory.
    pub fn integrate(&self, params: &SimulationParameters) -> SirResult<Trajectory> {
        params.validate()?;

        let days = params.horizon_days as usize;
        let [s0, i0, r0] = params.initial_state();

        // Stop half a day past the last sample so every requested day lies strictly inside the interval.
        let t_end = (days - 1) as f64 + 0.5;
        let mut stepper = Dopri5::from_param(
            SirModel::from_params(params),
            0.0,
            t_end,
            1.0, // dense output every day
            SirState::new(s0, i0, r0),
            self.settings.relative_tolerance,
            self.settings.absolute_tolerance,
            SAFETY_FACTOR,
            STEP_BETA,
            FAC_MIN,
            FAC_MAX,
            t_end, // h_max
            0.0,   // initial step chosen by the solver
            self.settings.max_steps,
            self.settings
                .stiffness_check_interval
                .filter(|&n| n > 0)
                .unwrap_or(u32::MAX),
            OutputType::Dense,
        );
        stepper
            .integrate()
            .map_err(|e| SirError::IntegrationFailure(e.to_string()))?;

        let mut trajectory = Trajectory::new(*params);
        let mut outputs = stepper.x_out().iter().zip(stepper.y_out().iter());
        for day in 0..days {
            let t = day as f64;
            let (_, y) = outputs
                .find(|(x, _)| (**x - t).abs() <= SAMPLE_TIME_TOLERANCE)
                .ok_or_else(|| {
                    SirError::IntegrationFailure(format!("solver produced no sample for day {}", day))
                })?;
            if !(y[0].is_finite() && y[1].is_finite() && y[2].is_finite()) {
                return Err(SirError::IntegrationFailure(format!(
                    "non-finite state at day {}",
                    day
                )));
            }
            trajectory.push_sample(t, [y[0], y[1], y[2]]);
        }

        Ok(trajectory)
    }
}

/// Integrates with the default solver settings.
pub fn integrate(params: &SimulationParameters) -> SirResult<Trajectory> {
    SirIntegrator::default().integrate(params)
}
