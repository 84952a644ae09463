use ode_solvers::{System, Vector3};
use sir_common::SimulationParameters;

/// Compartment vector handed to the ODE solver, ordered `[S, I, R]`.
pub type SirState = Vector3<f64>;

/// The SIR right-hand side.
///
/// ```text
/// dS/dt = -β·S·I / N
/// dI/dt =  β·S·I / N - γ·I
/// dR/dt =  γ·I
/// ```
///
/// N is the live sum `S + I + R`, recomputed on every evaluation rather than
/// taken from the input population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SirModel {
    pub infection_rate: f64,
    pub recovery_rate: f64,
}

impl SirModel {
    pub fn new(infection_rate: f64, recovery_rate: f64) -> Self {
        Self {
            infection_rate,
            recovery_rate,
        }
    }

    pub fn from_params(params: &SimulationParameters) -> Self {
        Self::new(params.infection_rate, params.recovery_rate)
    }

    /// Time derivative of `[S, I, R]`. The model is autonomous, so no time argument.
    pub fn derivative(&self, state: &[f64; 3]) -> [f64; 3] {
        let [s, i, r] = *state;
        let n = s + i + r;
        let new_infections = self.infection_rate * s * i / n;
        let new_recoveries = self.recovery_rate * i;
        [
            -new_infections,
            new_infections - new_recoveries,
            new_recoveries,
        ]
    }
}

impl System<f64, SirState> for SirModel {
    fn system(&self, _t: f64, y: &SirState, dy: &mut SirState) {
        let d = self.derivative(&[y[0], y[1], y[2]]);
        dy[0] = d[0];
        dy[1] = d[1];
        dy[2] = d[2];
    }
}
