//! Errors raised by the solver
//!
//! Running out of iterations or evaluations is not an error, it is reported
//! through [`Flag`](crate::prox::Flag) in the solver output.

use thiserror::Error;

/// Boxed error returned by user supplied objectives
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a solver run
#[derive(Debug, Error)]
pub enum Error {
    /// The starting point has no components
    #[error("starting point is empty")]
    EmptyPoint,

    /// A vector returned by an objective does not match the starting point
    #[error("{what} has length {found}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid solver configuration: {0}")]
    Config(#[from] ConfigError),

    /// The smooth part raised an error, passed on unmodified
    #[error("smooth objective evaluation failed")]
    Smooth(#[source] BoxError),

    /// The nonsmooth part raised an error, passed on unmodified
    #[error("proximal evaluation failed")]
    Proximal(#[source] BoxError),
}

/// Rejected [`SolverConfig`](crate::prox::SolverConfig) value
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("backtrack_memory must be positive")]
    ZeroMemory,

    #[error("descent_param must lie in (0, 1), got {0}")]
    DescentParam(f64),

    #[error("max_fun_eval must be positive")]
    ZeroFunEval,

    #[error("{name} must be finite and non-negative, got {value}")]
    Tolerance { name: &'static str, value: f64 },
}
