use approx::assert_relative_eq;
use sir_common::{SimulationParameters, SirError};
use sir_engine::{integrate, summarize, SirIntegrator, SolverSettings};

fn params(beta: f64, gamma: f64, population: f64, initial_infected: f64, days: u32) -> SimulationParameters {
    SimulationParameters {
        infection_rate: beta,
        recovery_rate: gamma,
        population,
        initial_infected,
        horizon_days: days,
    }
}

/// Parameter sets spanning the interactive ranges, used by the invariant checks.
fn sweep() -> Vec<SimulationParameters> {
    vec![
        SimulationParameters::default(),
        params(1.0, 0.05, 10_000.0, 1.0, 365),
        params(0.1, 0.5, 100.0, 100.0, 50),
        params(0.55, 0.2, 2500.0, 40.0, 200),
        params(0.3, 0.1, 1000.0, 0.0, 160),
        params(0.8, 0.1, 500.0, 500.0, 120),
    ]
}

#[test]
fn population_is_conserved() {
    for p in sweep() {
        let trajectory = integrate(&p).unwrap();
        assert!(
            trajectory.max_conservation_error(p.population) < 1e-3,
            "conservation broken for {:?}",
            p
        );
    }
}

#[test]
fn compartments_stay_non_negative() {
    for p in sweep() {
        let trajectory = integrate(&p).unwrap();
        for sample in trajectory.samples() {
            assert!(sample.susceptible >= -1e-6, "{:?} at {:?}", p, sample);
            assert!(sample.infected >= -1e-6, "{:?} at {:?}", p, sample);
            assert!(sample.recovered >= -1e-6, "{:?} at {:?}", p, sample);
        }
    }
}

#[test]
fn recovered_never_decreases() {
    for p in sweep() {
        let trajectory = integrate(&p).unwrap();
        for w in trajectory.recovered.windows(2) {
            assert!(w[1] >= w[0] - 1e-6, "{:?}: {} then {}", p, w[0], w[1]);
        }
    }
}

#[test]
fn identical_inputs_give_identical_trajectories() {
    let p = params(0.42, 0.13, 7300.0, 12.0, 240);
    let a = integrate(&p).unwrap();
    let b = integrate(&p).unwrap();
    assert_eq!(a.len(), b.len());
    for (x, y) in a.infected.iter().zip(&b.infected) {
        assert!((x - y).abs() <= 1e-6);
    }
    for (x, y) in a.recovered.iter().zip(&b.recovered) {
        assert!((x - y).abs() <= 1e-6);
    }
}

#[test]
fn canonical_outbreak_peaks_in_second_month() {
    let p = params(0.3, 0.1, 1000.0, 1.0, 160);
    let stats = summarize(&integrate(&p).unwrap(), p.population).unwrap();

    assert!(
        (30.0..=50.0).contains(&stats.peak_infected_day),
        "peak day {}",
        stats.peak_infected_day
    );
    assert!(stats.peak_infected_count > 100.0);
    assert!(stats.attack_rate_percent > 50.0);
    assert_relative_eq!(stats.basic_reproduction_number, 3.0, epsilon = 1e-12);
}

#[test]
fn threshold_epidemic_does_not_take_off() {
    let p = params(0.1, 0.1, 10_000.0, 1.0, 160);
    let trajectory = integrate(&p).unwrap();
    let stats = summarize(&trajectory, p.population).unwrap();

    assert_relative_eq!(stats.basic_reproduction_number, 1.0, epsilon = 1e-12);
    assert!(stats.attack_rate_percent < 1.0, "attack rate {}", stats.attack_rate_percent);
    assert!(stats.final_recovered_count > p.initial_infected);
    assert!(stats.peak_infected_count <= p.initial_infected + 1e-6);
}

#[test]
fn subcritical_outbreak_decays() {
    let p = params(0.1, 0.3, 1000.0, 10.0, 160);
    let trajectory = integrate(&p).unwrap();
    let stats = summarize(&trajectory, p.population).unwrap();

    for w in trajectory.infected.windows(2) {
        assert!(w[1] <= w[0] + 1e-6, "infected rose from {} to {}", w[0], w[1]);
    }
    assert!(stats.attack_rate_percent < 3.0, "attack rate {}", stats.attack_rate_percent);
    assert_eq!(stats.peak_infected_day, 0.0);
}

#[test]
fn single_day_horizon_returns_initial_state() {
    let p = params(0.3, 0.1, 1000.0, 5.0, 1);
    let trajectory = integrate(&p).unwrap();

    assert_eq!(trajectory.len(), 1);
    assert_eq!(trajectory.times, vec![0.0]);
    assert_relative_eq!(trajectory.susceptible[0], 995.0, epsilon = 1e-9);
    assert_relative_eq!(trajectory.infected[0], 5.0, epsilon = 1e-9);
    assert_relative_eq!(trajectory.recovered[0], 0.0, epsilon = 1e-9);

    let stats = summarize(&trajectory, p.population).unwrap();
    assert_eq!(stats.peak_infected_day, 0.0);
}

#[test]
fn fully_infected_population_only_recovers() {
    let p = params(0.5, 0.1, 800.0, 800.0, 100);
    let trajectory = integrate(&p).unwrap();

    assert!(trajectory.susceptible.iter().all(|&s| s == 0.0));
    for w in trajectory.infected.windows(2) {
        assert!(w[1] < w[0]);
    }
    // Pure exponential decay: I(t) = I0 * exp(-γ t)
    assert_relative_eq!(
        trajectory.infected[50],
        800.0 * (-0.1f64 * 50.0).exp(),
        max_relative = 1e-4
    );
}

#[test]
fn zero_seed_means_no_epidemic() {
    let p = params(0.9, 0.1, 1000.0, 0.0, 90);
    let trajectory = integrate(&p).unwrap();
    assert!(trajectory.infected.iter().all(|&i| i == 0.0));
    assert!(trajectory.susceptible.iter().all(|&s| s == 1000.0));

    let stats = summarize(&trajectory, p.population).unwrap();
    assert_eq!(stats.attack_rate_percent, 0.0);
}

#[test]
fn zero_recovery_rate_is_rejected() {
    let p = params(0.3, 0.0, 1000.0, 1.0, 160);
    match integrate(&p) {
        Err(SirError::InvalidParameter { name, .. }) => assert_eq!(name, "recovery_rate"),
        other => panic!("expected InvalidParameter, got {:?}", other),
    }
}

#[test]
fn out_of_domain_inputs_are_rejected() {
    let bad = [
        params(0.0, 0.1, 1000.0, 1.0, 160),
        params(0.3, -0.1, 1000.0, 1.0, 160),
        params(0.3, 0.1, 0.0, 0.0, 160),
        params(0.3, 0.1, 1000.0, -1.0, 160),
        params(0.3, 0.1, 1000.0, 1001.0, 160),
        params(0.3, 0.1, 1000.0, 1.0, 0),
    ];
    for p in bad {
        assert!(
            matches!(integrate(&p), Err(SirError::InvalidParameter { .. })),
            "{:?} was accepted",
            p
        );
    }
}

#[test]
fn explosive_transmission_still_integrates() {
    for beta in [300.0, 1000.0] {
        let p = params(beta, 0.05, 1e4, 1.0, 365);
        let trajectory = integrate(&p).unwrap();
        assert_eq!(trajectory.len(), 365);
        assert!(trajectory.max_conservation_error(p.population) < 1e-6);
        // Essentially everyone is infected within days, then recovers slowly.
        assert!(trajectory.susceptible[30] < 1.0);
        assert!(trajectory.recovered.windows(2).all(|w| w[1] >= w[0] - 1e-6));
    }
}

#[test]
fn exhausted_step_budget_is_an_integration_failure() {
    let integrator = SirIntegrator::new(SolverSettings {
        max_steps: 10,
        ..SolverSettings::default()
    });
    let result = integrator.integrate(&params(0.3, 0.1, 1000.0, 1.0, 365));
    assert!(
        matches!(result, Err(SirError::IntegrationFailure(_))),
        "expected IntegrationFailure, got {:?}",
        result.map(|t| t.len())
    );
}

#[test]
fn overflowing_state_is_an_integration_failure() {
    // β·S·I overflows to infinity at this scale; no trajectory may come back.
    let integrator = SirIntegrator::new(SolverSettings {
        max_steps: 10_000,
        ..SolverSettings::default()
    });
    let result = integrator.integrate(&params(0.3, 0.1, f64::MAX, f64::MAX / 2.0, 10));
    assert!(
        matches!(result, Err(SirError::IntegrationFailure(_))),
        "expected IntegrationFailure, got {:?}",
        result.map(|t| t.len())
    );
}
