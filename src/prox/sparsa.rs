//! Structured Reconstruction by Separable Approximation

use ndarray::prelude::*;
use ndarray::NdFloat;

use super::{
    check_progress, check_start, curvtrack, estimate_step, nop, History, Output, Point, Progress,
    Report, SearchStatus, Snapshot, Solution, SolverConfig, TraceRecorder,
};
use crate::error::{ConfigError, Error};
use crate::objective::{composite, optimality, ProximalFunction, SmoothFunction};

/// SpaRSA proximal gradient solver
///
/// Minimizes $`g(x) + h(x)`$ where $`g`$ is smooth and $`h`$ only exposes its
/// proximal mapping, see [\[WNF09\]](#references).
///
/// Algorithm
/// ---------
/// ```math
/// \begin{aligned}
/// s_k &= x_k - x_{k-1}, \quad y_k = \nabla g(x_k) - \nabla g(x_{k-1}) \\
/// t_k &= \frac{\langle y_k, s_k \rangle}{\langle y_k, y_k \rangle}
///     \quad \text{or } \min(1, 1/\|\nabla g(x_k)\|_1) \text{ if degenerate} \\
/// x_{k+1} &= \mathrm{prox}_{\alpha h}(x_k - \alpha \nabla g(x_k)), \quad
///     \alpha = t_k 2^{-m}
/// \end{aligned}
/// ```
/// where $`m`$ is the first integer for which the [nonmonotone
/// test](fn.curvtrack.html) against the last `backtrack_memory` objective
/// values passes.
///
/// Stopping
/// --------
/// After each iteration, the first satisfied rule wins:
/// 1. $`\|\mathrm{prox}_h(x - \nabla g(x)) - x\|_\infty \leq`$ `optim_tol`
/// 2. $`\|x_k - x_{k-1}\|_\infty / \max(1, \|x_{k-1}\|_\infty) \leq`$ `xtol`
/// 3. $`|f_{k-1} - f_k| / \max(1, |f_{k-1}|) \leq`$ `ftol`
/// 4. `max_iter` iterations
/// 5. `max_fun_eval` function evaluations
///
/// A failing line search returns the current iterate unchanged, which
/// ends the run through rule 2.
///
/// References
/// ----------
/// \[WNF09\]: [ Wright S J, Nowak R D, Figueiredo M A T,
///     "Sparse Reconstruction by Separable Approximation",
///     IEEE Transactions on Signal Processing, 57(7), 2009 ](https://doi.org/10.1109/TSP.2009.2016892)
#[derive(Debug, Clone)]
pub struct Sparsa<S> {
    config: SolverConfig<S>,
}

impl<S: NdFloat> Sparsa<S> {
    pub fn new(config: SolverConfig<S>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Sparsa { config })
    }

    pub fn config(&self) -> &SolverConfig<S> {
        &self.config
    }

    /// Minimizes `smooth + nonsmooth` starting from `x0`
    pub fn optimize<G, H>(
        &self,
        smooth: &G,
        nonsmooth: &H,
        x0: ArrayView1<S>,
    ) -> Result<Solution<S>, Error>
    where
        G: SmoothFunction<S> + ?Sized,
        H: ProximalFunction<S> + ?Sized,
    {
        self.optimize_with_observer(smooth, nonsmooth, x0, nop)
    }

    /// Same as [`optimize`](#method.optimize), calling `observer` at the
    /// starting point and after every iteration.
    pub fn optimize_with_observer<G, H>(
        &self,
        smooth: &G,
        nonsmooth: &H,
        x0: ArrayView1<S>,
        mut observer: impl FnMut(&Snapshot<S>),
    ) -> Result<Solution<S>, Error>
    where
        G: SmoothFunction<S> + ?Sized,
        H: ProximalFunction<S> + ?Sized,
    {
        let config = &self.config;
        if x0.is_empty() {
            return Err(Error::EmptyPoint);
        }

        let report = Report::new(config.verbosity);
        let mut trace = TraceRecorder::new(config.max_iter);
        let mut history = History::with_capacity(config.backtrack_memory);

        // starting point, the optimality measure costs one prox evaluation
        let (f_x, grad) = composite(smooth, nonsmooth, x0)?;
        let mut point = Point {
            x: x0.to_owned(),
            f_x,
            grad,
        };
        let mut fun_evals = 1;
        let mut prox_evals = 1;
        let mut optim = optimality(nonsmooth, point.x.view(), point.grad.view())?;
        let mut iter = 0;

        let mut snapshot = Snapshot {
            iter,
            fun_evals,
            prox_evals,
            step: None,
            f_x: point.f_x,
            optim,
        };
        trace.record(iter, point.f_x, fun_evals, prox_evals, optim);
        report.header();
        report.row(&snapshot);
        observer(&snapshot);

        let mut x_old = point.x.clone();
        let mut grad_old = point.grad.clone();

        let flag = match check_start(config, optim) {
            Some(flag) => flag,
            None => loop {
                iter += 1;

                let step = estimate_step(
                    iter,
                    point.x.view(),
                    x_old.view(),
                    point.grad.view(),
                    grad_old.view(),
                );
                history.push(point.f_x);
                x_old.assign(&point.x);
                grad_old.assign(&point.grad);

                let dir = point.grad.mapv(|g| -g);
                let dir_deriv = -point.grad.dot(&point.grad);
                let budget = config.max_fun_eval.saturating_sub(fun_evals);
                let search = curvtrack(
                    point,
                    dir.view(),
                    step,
                    &history,
                    dir_deriv,
                    smooth,
                    nonsmooth,
                    config.descent_param,
                    config.xtol,
                    budget,
                )?;
                if search.status != SearchStatus::Accepted {
                    log::debug!(
                        "iteration {}: line search stopped with {:?} after {} evaluations",
                        iter,
                        search.status,
                        search.evals
                    );
                }
                point = search.point;
                fun_evals += search.evals;
                prox_evals += search.evals;

                // not added to the counters
                optim = optimality(nonsmooth, point.x.view(), point.grad.view())?;

                snapshot = Snapshot {
                    iter,
                    fun_evals,
                    prox_evals,
                    step: Some(search.step),
                    f_x: point.f_x,
                    optim,
                };
                trace.record(iter, point.f_x, fun_evals, prox_evals, optim);
                report.row(&snapshot);
                observer(&snapshot);

                let progress = Progress {
                    iter,
                    fun_evals,
                    optim,
                    x: point.x.view(),
                    x_old: x_old.view(),
                    f_old: history.last().unwrap_or(point.f_x),
                    f_x: point.f_x,
                };
                if let Some(flag) = check_progress(config, &progress) {
                    break flag;
                }
            },
        };
        report.finish(&snapshot, flag);

        Ok(Solution {
            x: point.x,
            f_x: point.f_x,
            output: Output {
                flag,
                message: flag.message(),
                iters: iter,
                fun_evals,
                prox_evals,
                optim,
                trace: trace.finish(iter),
            },
        })
    }
}

/// SpaRSA with the default [`SolverConfig`]
///
/// A fresh configuration is built for every call, nothing is shared between
/// runs.
pub fn sparsa<S, G, H>(smooth: &G, nonsmooth: &H, x0: ArrayView1<S>) -> Result<Solution<S>, Error>
where
    S: NdFloat,
    G: SmoothFunction<S> + ?Sized,
    H: ProximalFunction<S> + ?Sized,
{
    Sparsa::new(SolverConfig::default())?.optimize(smooth, nonsmooth, x0)
}
