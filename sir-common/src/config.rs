use crate::sim_params::SimulationParameters;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// Model parameters, every key optional; missing keys fall back to SimulationParameters::default()
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ParametersConfig {
    #[serde(default)]
    pub infection_rate: Option<f64>,
    #[serde(default)]
    pub recovery_rate: Option<f64>,
    #[serde(default)]
    pub population: Option<f64>,
    #[serde(default)]
    pub initial_infected: Option<f64>,
    #[serde(default)]
    pub horizon_days: Option<u32>,
}

impl ParametersConfig {
    /// Fills the keys that are set on top of `base`.
    pub fn apply_to(&self, base: SimulationParameters) -> SimulationParameters {
        SimulationParameters {
            infection_rate: self.infection_rate.unwrap_or(base.infection_rate),
            recovery_rate: self.recovery_rate.unwrap_or(base.recovery_rate),
            population: self.population.unwrap_or(base.population),
            initial_infected: self.initial_infected.unwrap_or(base.initial_infected),
            horizon_days: self.horizon_days.unwrap_or(base.horizon_days),
        }
    }
}

// ODE solver tolerances and step limits
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SolverConfig {
    #[serde(default = "default_tolerance")]
    pub relative_tolerance: f64,
    #[serde(default = "default_tolerance")]
    pub absolute_tolerance: f64,
    #[serde(default = "default_max_steps")]
    pub max_steps: u32, // Step budget for a whole run
    #[serde(default = "default_stiffness_check_interval")]
    pub stiffness_check_interval: u32, // Accepted steps between stiffness tests; 0 disables them
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            relative_tolerance: default_tolerance(),
            absolute_tolerance: default_tolerance(),
            max_steps: default_max_steps(),
            stiffness_check_interval: default_stiffness_check_interval(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    Bincode,
    MessagePack,
}

impl OutputFormat {
    /// File extension used for trajectory files in this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Bincode => "bin",
            OutputFormat::MessagePack => "msgpack",
        }
    }
}

// Configuration for output settings
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_base_filename")]
    pub base_filename: String,
    #[serde(default = "default_true")]
    pub save_trajectory: bool,
    #[serde(default = "default_true")]
    pub save_summary: bool,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            base_filename: default_base_filename(),
            save_trajectory: true,
            save_summary: true,
            format: OutputFormat::Csv,
        }
    }
}

/// A named run whose parameters override the `[parameters]` section.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(flatten)]
    pub parameters: ParametersConfig,
}

/// Run configuration, loaded from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SimulationConfig {
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub scenarios: Vec<ScenarioConfig>,
}

impl SimulationConfig {
    /// Loads the run configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read config file '{}'", path_ref.display()))?;
        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Invalid config in '{}'", path_ref.display()))?;

        Ok(config)
    }

    /// Parses and checks a configuration held in memory.
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: SimulationConfig =
            toml::from_str(config_str).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings the integrator cannot check itself. Model parameters are
    /// left alone here; the integrator rejects those with a typed error.
    pub fn validate(&self) -> Result<()> {
        let tolerances = [
            ("relative_tolerance", self.solver.relative_tolerance),
            ("absolute_tolerance", self.solver.absolute_tolerance),
        ];
        for (name, value) in tolerances {
            if !(value > 0.0) || !value.is_finite() {
                anyhow::bail!("solver.{} must be positive and finite, got {}", name, value);
            }
        }
        if self.solver.max_steps == 0 {
            anyhow::bail!("solver.max_steps must be at least 1.");
        }
        if self.output.base_filename.trim().is_empty() {
            anyhow::bail!("output.base_filename must not be empty.");
        }
        let mut seen = std::collections::HashSet::new();
        for scenario in &self.scenarios {
            if scenario.name.trim().is_empty() {
                anyhow::bail!("every [[scenarios]] entry needs a non-empty name.");
            }
            // Scenario names become part of output filenames
            if scenario.name.contains(['/', '\\']) || scenario.name == "." || scenario.name == ".." {
                anyhow::bail!(
                    "scenario name '{}' must not contain path separators or be '.'/'..'.",
                    scenario.name
                );
            }
            if !seen.insert(scenario.name.as_str()) {
                anyhow::bail!("duplicate scenario name '{}'.", scenario.name);
            }
        }
        Ok(())
    }

    /// The base run described by `[parameters]`.
    pub fn get_sim_params(&self) -> SimulationParameters {
        self.parameters.apply_to(SimulationParameters::default())
    }

    /// Every run this configuration asks for, in file order. With no
    /// `[[scenarios]]` that is the base run alone, named "baseline".
    pub fn scenario_params(&self) -> Vec<(String, SimulationParameters)> {
        let base = self.get_sim_params();
        if self.scenarios.is_empty() {
            return vec![("baseline".to_string(), base)];
        }
        self.scenarios
            .iter()
            .map(|scenario| (scenario.name.clone(), scenario.parameters.apply_to(base)))
            .collect()
    }
}

fn default_tolerance() -> f64 {
    1e-6
}

fn default_max_steps() -> u32 {
    1_000_000
}

fn default_stiffness_check_interval() -> u32 {
    0 // Never stop a run for stiffness; a stiff stretch just costs more steps
}

fn default_base_filename() -> String {
    "sir".to_string()
}

fn default_true() -> bool {
    true
}
