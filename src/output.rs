use anyhow::{Context, Result};
use log::info;
use sir_common::{OutputFormat, SummaryStatistics, Trajectory};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Writes the trajectory to `{base}_trajectory.{ext}` and returns the path written.
pub fn write_trajectory(
    trajectory: &Trajectory,
    format: OutputFormat,
    base_filename: &str,
) -> Result<PathBuf> {
    let path = PathBuf::from(format!("{}_trajectory.{}", base_filename, format.extension()));
    let file = File::create(&path)
        .with_context(|| format!("Error creating trajectory file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            csv_writer.write_record(["day", "susceptible", "infected", "recovered"])?;
            for sample in trajectory.samples() {
                csv_writer.write_record(&[
                    format!("{}", sample.day),
                    format!("{:.6}", sample.susceptible),
                    format!("{:.6}", sample.infected),
                    format!("{:.6}", sample.recovered),
                ])?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut writer, trajectory)
                .context("Error serializing trajectory to JSON")?;
            writer.flush()?;
        }
        OutputFormat::Bincode => {
            bincode::serialize_into(&mut writer, trajectory)
                .context("Error serializing trajectory to bincode")?;
            writer.flush()?;
        }
        OutputFormat::MessagePack => {
            rmp_serde::encode::write(&mut writer, trajectory)
                .context("Error serializing trajectory to MessagePack")?;
            writer.flush()?;
        }
    }

    info!("Trajectory ({} samples) saved to {}", trajectory.len(), path.display());
    Ok(path)
}

/// Writes the summary statistics as pretty JSON to `{base}_summary.json`.
pub fn write_summary(summary: &SummaryStatistics, base_filename: &str) -> Result<PathBuf> {
    let path = PathBuf::from(format!("{}_summary.json", base_filename));
    let file = File::create(&path)
        .with_context(|| format!("Error creating summary file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)
        .context("Error serializing summary to JSON")?;
    writer.flush()?;

    info!("Summary saved to {}", path.display());
    Ok(path)
}
