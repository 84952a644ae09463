use crate::error::{SirError, SirResult};
use serde::{Deserialize, Serialize};

/// Parameters of a single SIR run. Built once per run and never mutated;
/// a new run means a new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Transmission coefficient (β), governs S -> I.
    pub infection_rate: f64,
    /// Recovery coefficient (γ), governs I -> R.
    pub recovery_rate: f64,
    /// Total closed population (N).
    pub population: f64,
    /// Infected count at day 0 (I₀). Zero is allowed and means no epidemic.
    pub initial_infected: f64,
    /// Number of days to simulate; also the number of samples (day 0 included).
    pub horizon_days: u32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            infection_rate: 0.3, // R0 = 3
            recovery_rate: 0.1,  // 10-day infectious period
            population: 1000.0,
            initial_infected: 1.0,
            horizon_days: 160,
        }
    }
}

impl SimulationParameters {
    /// Checks every domain precondition of the model. Nothing is clamped:
    /// the first violation is returned as `InvalidParameter`.
    pub fn validate(&self) -> SirResult<()> {
        if !(self.population > 0.0) || !self.population.is_finite() {
            return Err(SirError::invalid(
                "population",
                format!("must be a positive finite number, got {}", self.population),
            ));
        }
        if !(self.initial_infected >= 0.0) {
            return Err(SirError::invalid(
                "initial_infected",
                format!("must be non-negative, got {}", self.initial_infected),
            ));
        }
        if self.initial_infected > self.population {
            return Err(SirError::invalid(
                "initial_infected",
                format!(
                    "{} exceeds the population of {}",
                    self.initial_infected, self.population
                ),
            ));
        }
        if !(self.infection_rate > 0.0) || !self.infection_rate.is_finite() {
            return Err(SirError::invalid(
                "infection_rate",
                format!("must be positive, got {}", self.infection_rate),
            ));
        }
        if !(self.recovery_rate > 0.0) || !self.recovery_rate.is_finite() {
            return Err(SirError::invalid(
                "recovery_rate",
                format!("must be positive, got {}", self.recovery_rate),
            ));
        }
        if self.horizon_days < 1 {
            return Err(SirError::invalid(
                "horizon_days",
                "must simulate at least one day",
            ));
        }
        Ok(())
    }

    pub fn initial_susceptible(&self) -> f64 {
        self.population - self.initial_infected
    }

    /// State vector at t = 0, ordered `[S, I, R]`.
    pub fn initial_state(&self) -> [f64; 3] {
        [self.initial_susceptible(), self.initial_infected, 0.0]
    }

    /// R₀ = β / γ.
    pub fn basic_reproduction_number(&self) -> f64 {
        self.infection_rate / self.recovery_rate
    }

    /// Names of the parameters that fall outside the interactive front ends'
    /// slider ranges. Purely advisory; `validate` never looks at these.
    pub fn outside_ui_ranges(&self) -> Vec<&'static str> {
        let values = [
            self.infection_rate,
            self.recovery_rate,
            self.population,
            self.initial_infected,
            self.horizon_days as f64,
        ];
        UI_RANGES
            .iter()
            .zip(values)
            .filter(|(range, value)| !range.contains(*value))
            .map(|(range, _)| range.name)
            .collect()
    }
}

/// Inclusive bounds a front end offers for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

impl ParameterRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Slider bounds used by the desktop and web shells, in `SimulationParameters` field order.
pub const UI_RANGES: [ParameterRange; 5] = [
    ParameterRange { name: "infection_rate", min: 0.1, max: 1.0 },
    ParameterRange { name: "recovery_rate", min: 0.05, max: 0.5 },
    ParameterRange { name: "population", min: 100.0, max: 10_000.0 },
    ParameterRange { name: "initial_infected", min: 1.0, max: 100.0 },
    ParameterRange { name: "horizon_days", min: 50.0, max: 365.0 },
];
