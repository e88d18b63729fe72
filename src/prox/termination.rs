use std::fmt;

use ndarray::prelude::*;
use ndarray::NdFloat;

use super::SolverConfig;
use crate::vector::VectorNorm;

/// Reason a solver run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// Optimality measure below `optim_tol`
    Optim,
    /// Relative change in the iterate below `xtol`
    Xtol,
    /// Relative change in the objective value below `ftol`
    Ftol,
    /// `max_iter` iterations performed
    MaxIter,
    /// `max_fun_eval` function evaluations performed
    MaxFev,
}

impl Flag {
    pub fn message(self) -> &'static str {
        match self {
            Flag::Optim => "Optimality below optim_tol.",
            Flag::Xtol => "Relative change in x below xtol.",
            Flag::Ftol => "Relative change in function value below ftol.",
            Flag::MaxIter => "Max number of iterations reached.",
            Flag::MaxFev => "Max number of function evaluations reached.",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Flag::Optim => "OPTIM",
            Flag::Xtol => "XTOL",
            Flag::Ftol => "FTOL",
            Flag::MaxIter => "MAXITER",
            Flag::MaxFev => "MAXFEV",
        };
        f.write_str(name)
    }
}

/// State inspected after each line search
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a, S> {
    pub iter: usize,
    pub fun_evals: usize,
    pub optim: S,
    pub x: ArrayView1<'a, S>,
    pub x_old: ArrayView1<'a, S>,
    /// Objective value before the line search, the newest history entry
    pub f_old: S,
    pub f_x: S,
}

/// Stop before the first iteration when the starting point is optimal,
/// or when no iterations are allowed at all.
pub fn check_start<S: NdFloat>(config: &SolverConfig<S>, optim: S) -> Option<Flag> {
    if optim <= config.optim_tol {
        Some(Flag::Optim)
    } else if config.max_iter == 0 {
        Some(Flag::MaxIter)
    } else {
        None
    }
}

/// First satisfied stopping rule, in priority order
/// OPTIM, XTOL, FTOL, MAXITER, MAXFEV.
pub fn check_progress<S: NdFloat>(config: &SolverConfig<S>, p: &Progress<'_, S>) -> Option<Flag> {
    let x_change = (&p.x - &p.x_old).norm_max() / S::one().max(p.x_old.norm_max());
    let f_change = (p.f_old - p.f_x).abs() / S::one().max(p.f_old.abs());

    if p.optim <= config.optim_tol {
        Some(Flag::Optim)
    } else if x_change <= config.xtol {
        Some(Flag::Xtol)
    } else if f_change <= config.ftol {
        Some(Flag::Ftol)
    } else if p.iter >= config.max_iter {
        Some(Flag::MaxIter)
    } else if p.fun_evals >= config.max_fun_eval {
        Some(Flag::MaxFev)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress<'a>(x: &'a Array1<f64>, x_old: &'a Array1<f64>) -> Progress<'a, f64> {
        Progress {
            iter: 1,
            fun_evals: 2,
            optim: 1.,
            x: x.view(),
            x_old: x_old.view(),
            f_old: 10.,
            f_x: 5.,
        }
    }

    #[test]
    fn nothing_satisfied() {
        let config = SolverConfig::default();
        let (x, x_old) = (array![1., 1.], array![0., 0.]);
        assert_eq!(check_progress(&config, &progress(&x, &x_old)), None);
    }

    #[test]
    fn priority_order() {
        let config = SolverConfig {
            max_iter: 1,
            max_fun_eval: 2,
            ..SolverConfig::default()
        };
        let (x, x_old) = (array![1., 1.], array![1., 1.]);
        let mut p = progress(&x, &x_old);
        p.f_x = p.f_old;
        p.optim = 0.;
        assert_eq!(check_progress(&config, &p), Some(Flag::Optim));
        p.optim = 1.;
        assert_eq!(check_progress(&config, &p), Some(Flag::Xtol));

        let x = array![2., 1.];
        let mut p = progress(&x, &x_old);
        p.f_x = p.f_old;
        assert_eq!(check_progress(&config, &p), Some(Flag::Ftol));
        p.f_x = 0.;
        assert_eq!(check_progress(&config, &p), Some(Flag::MaxIter));
        p.iter = 0;
        assert_eq!(check_progress(&config, &p), Some(Flag::MaxFev));
    }

    #[test]
    fn changes_are_relative() {
        let config = SolverConfig::default();
        // 1e-5 absolute change on a 1e2 scale is within xtol = 1e-6 relative
        let (x, x_old) = (array![100.00005], array![100.]);
        let mut p = progress(&x, &x_old);
        p.f_old = 1e4;
        assert_eq!(check_progress(&config, &p), Some(Flag::Xtol));

        // small values are compared absolutely
        let (x, x_old) = (array![1e-3], array![0.]);
        let mut p = progress(&x, &x_old);
        p.f_old = 1e-7;
        p.f_x = 0.;
        assert_eq!(check_progress(&config, &p), Some(Flag::Ftol));
    }

    #[test]
    fn nan_coordinate_is_not_convergence() {
        let config = SolverConfig::default();
        let (x, x_old) = (array![std::f64::NAN, 1.], array![1., 1.]);
        let mut p = progress(&x, &x_old);
        p.optim = (&x - &x_old).norm_max();
        assert!(p.optim.is_nan());
        assert_eq!(check_progress(&config, &p), None);
    }

    #[test]
    fn start_checks() {
        let config = SolverConfig::<f64>::default();
        assert_eq!(check_start(&config, 0.), Some(Flag::Optim));
        assert_eq!(check_start(&config, 1.), None);
        let config = SolverConfig {
            max_iter: 0,
            ..config
        };
        assert_eq!(check_start(&config, 0.), Some(Flag::Optim));
        assert_eq!(check_start(&config, 1.), Some(Flag::MaxIter));
    }

    #[test]
    fn messages() {
        assert_eq!(Flag::Ftol.to_string(), "FTOL");
        assert_eq!(
            Flag::Ftol.message(),
            "Relative change in function value below ftol."
        );
        assert_eq!(Flag::MaxFev.to_string(), "MAXFEV");
    }
}
