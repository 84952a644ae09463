use sir_common::{SirError, SirResult, SummaryStatistics, Trajectory};

/// Derives peak, final-size and R₀ figures from a finished trajectory.
///
/// The peak day is the time of the *first* sample attaining the maximum.
/// `population` is the N the trajectory was produced with; R₀ comes from the
/// rates recorded on the trajectory itself. A trajectory whose columns have
/// no common sample (any of them empty) counts as empty.
pub fn summarize(trajectory: &Trajectory, population: f64) -> SirResult<SummaryStatistics> {
    if trajectory.times.is_empty() {
        return Err(SirError::EmptyTrajectory);
    }
    let final_recovered_count = *trajectory.recovered.last().ok_or(SirError::EmptyTrajectory)?;

    let (peak_index, peak_infected_count) = trajectory
        .infected
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (idx, value)| match best {
            Some((_, max)) if value <= max => best,
            _ => Some((idx, value)),
        })
        .ok_or(SirError::EmptyTrajectory)?;

    Ok(SummaryStatistics {
        peak_infected_count,
        peak_infected_day: trajectory
            .times
            .get(peak_index)
            .copied()
            .ok_or(SirError::EmptyTrajectory)?,
        final_recovered_count,
        attack_rate_percent: final_recovered_count / population * 100.0,
        basic_reproduction_number: trajectory.parameters.basic_reproduction_number(),
    })
}
