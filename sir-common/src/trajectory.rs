use crate::sim_params::SimulationParameters;
use serde::{Deserialize, Serialize};

/// Sampled time series of one SIR run, one entry per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// The parameters this trajectory was produced from.
    pub parameters: SimulationParameters,
    /// Sample times in days, `0, 1, ..., horizon_days - 1`.
    pub times: Vec<f64>,
    pub susceptible: Vec<f64>,
    pub infected: Vec<f64>,
    pub recovered: Vec<f64>,
}

/// One row of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub day: f64,
    pub susceptible: f64,
    pub infected: f64,
    pub recovered: f64,
}

impl Trajectory {
    /// Creates an empty trajectory with room for one sample per simulated day.
    pub fn new(parameters: SimulationParameters) -> Self {
        let capacity = parameters.horizon_days as usize;
        Self {
            parameters,
            times: Vec::with_capacity(capacity),
            susceptible: Vec::with_capacity(capacity),
            infected: Vec::with_capacity(capacity),
            recovered: Vec::with_capacity(capacity),
        }
    }

    /// Appends one sample, keeping the four sequences the same length.
    pub fn push_sample(&mut self, time: f64, state: [f64; 3]) {
        self.times.push(time);
        self.susceptible.push(state[0]);
        self.infected.push(state[1]);
        self.recovered.push(state[2]);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Iterates the trajectory row by row.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.times
            .iter()
            .zip(&self.susceptible)
            .zip(&self.infected)
            .zip(&self.recovered)
            .map(|(((&day, &susceptible), &infected), &recovered)| Sample {
                day,
                susceptible,
                infected,
                recovered,
            })
    }

    /// Largest relative deviation of `S + I + R` from `population` over all samples.
    /// Returns 0.0 for an empty trajectory.
    pub fn max_conservation_error(&self, population: f64) -> f64 {
        self.samples()
            .map(|s| ((s.susceptible + s.infected + s.recovered) - population).abs() / population)
            .fold(0.0, f64::max)
    }
}

/// Scalar summary derived from a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Maximum of the infected series.
    pub peak_infected_count: f64,
    /// Day of the first sample attaining the peak.
    pub peak_infected_day: f64,
    /// Last entry of the recovered series.
    pub final_recovered_count: f64,
    /// `final_recovered_count / population * 100`.
    pub attack_rate_percent: f64,
    /// R₀ = β / γ.
    pub basic_reproduction_number: f64,
}
