use sir_common::SummaryStatistics;
use std::fmt;

/// Text block shown under the chart by the front ends ("Peak Stats").
///
/// Counts are truncated towards zero, not rounded.
#[derive(Debug, Clone, Copy)]
pub struct StatsReport<'a> {
    pub summary: &'a SummaryStatistics,
    pub horizon_days: u32,
}

impl<'a> StatsReport<'a> {
    pub fn new(summary: &'a SummaryStatistics, horizon_days: u32) -> Self {
        Self {
            summary,
            horizon_days,
        }
    }
}

impl fmt::Display for StatsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        writeln!(f, "Peak Infected: {}", s.peak_infected_count.trunc() as i64)?;
        writeln!(f, "Peak Day: {}", s.peak_infected_day.trunc() as i64)?;
        writeln!(f, "Final Recovered: {}", s.final_recovered_count.trunc() as i64)?;
        writeln!(f, "Attack Rate: {:.1}%", s.attack_rate_percent)?;
        writeln!(f, "Basic Reproduction Number (R₀): {:.2}", s.basic_reproduction_number)?;
        write!(f, "Simulation Duration: {} days", self.horizon_days)
    }
}
