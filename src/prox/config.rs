use ndarray::NdFloat;

use crate::error::ConfigError;
use crate::vector::{as_f64, lit};

/// Solver options, fixed for the duration of a run
///
/// | Option             | Default | Effect                                         |
/// |--------------------|---------|------------------------------------------------|
/// | `backtrack_memory` | 10      | history window of the nonmonotone line search  |
/// | `descent_param`    | 1e-4    | Armijo sufficient decrease coefficient         |
/// | `max_fun_eval`     | 50000   | cap on function evaluations                    |
/// | `max_iter`         | 1000    | cap on outer iterations                        |
/// | `ftol`             | 1e-6    | relative change in objective value             |
/// | `optim_tol`        | 1e-6    | optimality measure                             |
/// | `xtol`             | 1e-6    | relative change in iterate, line search floor  |
/// | `verbosity`        | 0       | log a progress row every `verbosity` iterations |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<S> {
    pub backtrack_memory: usize,
    pub descent_param: S,
    pub max_fun_eval: usize,
    pub max_iter: usize,
    pub ftol: S,
    pub optim_tol: S,
    pub xtol: S,
    pub verbosity: usize,
}

impl<S: NdFloat> Default for SolverConfig<S> {
    fn default() -> Self {
        SolverConfig {
            backtrack_memory: 10,
            descent_param: lit(1e-4),
            max_fun_eval: 50000,
            max_iter: 1000,
            ftol: lit(1e-6),
            optim_tol: lit(1e-6),
            xtol: lit(1e-6),
            verbosity: 0,
        }
    }
}

impl<S: NdFloat> SolverConfig<S> {
    /// Checks every option against its admissible range
    ///
    /// `max_iter == 0` is allowed: the solver then only measures the
    /// optimality of the starting point.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backtrack_memory == 0 {
            return Err(ConfigError::ZeroMemory);
        }
        if !(self.descent_param > S::zero() && self.descent_param < S::one()) {
            return Err(ConfigError::DescentParam(as_f64(self.descent_param)));
        }
        if self.max_fun_eval == 0 {
            return Err(ConfigError::ZeroFunEval);
        }
        for &(name, value) in &[
            ("ftol", self.ftol),
            ("optim_tol", self.optim_tol),
            ("xtol", self.xtol),
        ] {
            if !(value.is_finite() && value >= S::zero()) {
                return Err(ConfigError::Tolerance {
                    name,
                    value: as_f64(value),
                });
            }
        }
        Ok(())
    }
}
