use twine_solvers::equation::bisection;
use uom::si::{f64::Volume, volume::milliliter};

/// Solver configuration for locating the volume at a target pH.
#[derive(Debug, Clone, Copy)]
pub struct EndpointConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance for the titrant volume search variable.
    pub volume_tol: Volume,

    /// Absolute tolerance for the pH residual (achieved - target).
    pub ph_tol: f64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            volume_tol: Volume::new::<milliliter>(1e-9),
            ph_tol: 1e-9,
        }
    }
}

impl EndpointConfig {
    /// Converts this configuration into a bisection solver configuration.
    ///
    /// The search variable is the titrant volume in millilitres.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.volume_tol.get::<milliliter>(),
            x_rel_tol: 0.0,
            residual_tol: self.ph_tol,
        }
    }
}
