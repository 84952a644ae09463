use anyhow::Result;
use clap::{Parser, ValueEnum};
use env_logger::Builder;
use log::{debug, error, info, warn, LevelFilter};
use sir_common::{OutputFormat, SimulationConfig};
use sir_engine::batch::run_batch;
use sir_engine::integrator::SolverSettings;
use sir_engine::output::{write_summary, write_trajectory};
use sir_engine::report::StatsReport;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

const DEFAULT_CONFIG: &str = "config.toml";

/// Command-line arguments for the engine
#[derive(Parser, Debug)]
#[command(author, version, about = "Run SIR epidemic simulations", long_about = None)]
struct Args {
    /// Path to the TOML run configuration. A missing default file means built-in defaults.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Infection rate (beta), overrides [parameters]
    #[arg(long)]
    beta: Option<f64>,

    /// Recovery rate (gamma), overrides [parameters]
    #[arg(long)]
    gamma: Option<f64>,

    /// Total population size
    #[arg(long)]
    population: Option<f64>,

    /// Infected count at day 0
    #[arg(long)]
    initial_infected: Option<f64>,

    /// Number of days to simulate
    #[arg(long)]
    days: Option<u32>,

    /// Trajectory file format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Base filename for output files
    #[arg(short, long)]
    output: Option<String>,

    /// Log the reports but write no files
    #[arg(long)]
    no_save: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
    Bincode,
    Messagepack,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Bincode => OutputFormat::Bincode,
            FormatArg::Messagepack => OutputFormat::MessagePack,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    Builder::new()
        .filter(None, if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .parse_default_env()
        .init();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Loads the configuration with command-line overrides applied.
fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = if args.config.exists() {
        info!("Loading configuration from {}", args.config.display());
        SimulationConfig::load(&args.config)?
    } else if args.config == PathBuf::from(DEFAULT_CONFIG) {
        info!("No {} found, using built-in defaults.", DEFAULT_CONFIG);
        SimulationConfig::default()
    } else {
        anyhow::bail!("Config file '{}' does not exist.", args.config.display());
    };

    // --- Command-line overrides ---
    let overrides = &mut config.parameters;
    if let Some(beta) = args.beta {
        overrides.infection_rate = Some(beta);
    }
    if let Some(gamma) = args.gamma {
        overrides.recovery_rate = Some(gamma);
    }
    if let Some(population) = args.population {
        overrides.population = Some(population);
    }
    if let Some(initial_infected) = args.initial_infected {
        overrides.initial_infected = Some(initial_infected);
    }
    if let Some(days) = args.days {
        overrides.horizon_days = Some(days);
    }
    if let Some(format) = args.format {
        config.output.format = format.into();
    }
    if let Some(output) = &args.output {
        config.output.base_filename = output.clone();
    }
    if args.no_save {
        config.output.save_trajectory = false;
        config.output.save_summary = false;
    }

    config.validate()?;
    Ok(config)
}

/// Returns `Ok(false)` when at least one scenario failed to run or to save.
fn run(args: Args) -> Result<bool> {
    info!("Starting SIR engine...");
    let config = load_config(&args)?;
    debug!("Configuration: {:#?}", config);

    let scenarios = config.scenario_params();
    for (name, params) in &scenarios {
        let outside = params.outside_ui_ranges();
        if !outside.is_empty() {
            warn!(
                "Scenario '{}': {} outside the interactive slider ranges.",
                name,
                outside.join(", ")
            );
        }
    }

    let settings = SolverSettings::from(&config.solver);
    info!(
        "Running {} scenario(s) on {} Rayon threads (rtol {:e}, atol {:e}, max {} steps).",
        scenarios.len(),
        rayon::current_num_threads(),
        settings.relative_tolerance,
        settings.absolute_tolerance,
        settings.max_steps
    );
    let start_time = Instant::now();
    let outcomes = run_batch(&scenarios, &settings);
    info!("Batch finished in {:.3} seconds.", start_time.elapsed().as_secs_f64());

    let single_run = outcomes.len() == 1 && config.scenarios.is_empty();
    let mut all_ok = true;
    for outcome in &outcomes {
        let (trajectory, summary) = match &outcome.result {
            Ok(result) => result,
            Err(e) => {
                error!("Scenario '{}' failed: {}", outcome.name, e);
                all_ok = false;
                continue;
            }
        };

        info!(
            "Scenario '{}':\n{}",
            outcome.name,
            StatsReport::new(summary, outcome.parameters.horizon_days)
        );
        debug!(
            "Scenario '{}' max conservation error: {:.3e}",
            outcome.name,
            trajectory.max_conservation_error(outcome.parameters.population)
        );

        // --- Save Recorded Data ---
        let base = if single_run {
            config.output.base_filename.clone()
        } else {
            format!("{}_{}", config.output.base_filename, outcome.name)
        };
        // A failed write is reported but does not stop the remaining scenarios.
        if config.output.save_trajectory {
            if let Err(e) = write_trajectory(trajectory, config.output.format, &base) {
                error!("Scenario '{}': {:#}", outcome.name, e);
                all_ok = false;
            }
        } else {
            debug!("Skipping trajectory output for '{}' as per config.", outcome.name);
        }
        if config.output.save_summary {
            if let Err(e) = write_summary(summary, &base) {
                error!("Scenario '{}': {:#}", outcome.name, e);
                all_ok = false;
            }
        } else {
            debug!("Skipping summary output for '{}' as per config.", outcome.name);
        }
    }

    info!("Simulation Complete.");
    Ok(all_ok)
}
