use thiserror::Error;
use twine_solvers::equation::bisection;

use crate::models::chemistry::titration::core::PhError;

/// Errors that can occur while searching for the volume at a target pH.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The pH at a bracket end could not be computed.
    #[error("pH evaluation failed")]
    Ph(#[from] PhError),

    /// The target lies outside the pH range spanned by the search bracket.
    #[error("target pH {target} outside curve range [{low}, {high}]")]
    OutOfRange {
        /// Requested pH.
        target: f64,

        /// pH at the start of the bracket (no titrant).
        low: f64,

        /// pH at the end of the bracket (twice the equivalence volume).
        high: f64,
    },

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual}")]
    MaxIters {
        /// Best pH residual achieved.
        residual: f64,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
