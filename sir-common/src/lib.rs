pub mod config;
pub mod error;
pub mod sim_params;
pub mod trajectory;

// Re-export key types for easier use by dependent crates
pub use config::{OutputConfig, OutputFormat, ParametersConfig, ScenarioConfig, SimulationConfig, SolverConfig};
pub use error::{SirError, SirResult};
pub use sim_params::{ParameterRange, SimulationParameters, UI_RANGES};
pub use trajectory::{Sample, SummaryStatistics, Trajectory};
