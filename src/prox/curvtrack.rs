use ndarray::prelude::*;
use ndarray::NdFloat;

use super::History;
use crate::error::Error;
use crate::objective::{composite, prox_point, ProximalFunction, SmoothFunction};
use crate::vector::{lit, VectorNorm};

/// An iterate together with its composite value and smooth gradient
#[derive(Debug, Clone, PartialEq)]
pub struct Point<S> {
    pub x: Array1<S>,
    pub f_x: S,
    pub grad: Array1<S>,
}

/// How a line search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// The candidate passed the sufficient decrease test
    Accepted,
    /// The trial move became shorter than `xtol`
    StepTooSmall,
    /// Another trial would exceed the evaluation budget
    BudgetExhausted,
}

/// Outcome of [`curvtrack`]
#[derive(Debug, Clone, PartialEq)]
pub struct Search<S> {
    /// New iterate, or the starting one if the search failed
    pub point: Point<S>,
    /// Last step length tried
    pub step: S,
    pub status: SearchStatus,
    /// Trials performed, each one smooth and one proximal evaluation
    pub evals: usize,
}

/// Nonmonotone curvilinear backtracking
///
/// Starting from `step`, halves $`t`$ until the proximal candidate
/// ```math
/// z = \mathrm{prox}_{t h}(x + t d)
/// ```
/// satisfies
/// ```math
/// f(z) \leq \max_j f_{j} + \sigma t \max\left(\delta, -\frac{\|z - x\|_2^2}{t^2}\right)
/// ```
/// where the maximum runs over `history`, $`\sigma`$ is `descent_param` and
/// $`\delta`$ is the directional derivative `dir_deriv`. The second term of the
/// inner maximum is the slope along the path actually travelled when the
/// prox shortens the move.
///
/// The initial step is always tried. Fails when halving takes $`t`$ below
/// `xtol` or after `budget` trials, and then hands back the starting point
/// unchanged.
#[allow(clippy::too_many_arguments)]
pub fn curvtrack<S, G, H>(
    start: Point<S>,
    dir: ArrayView1<S>,
    step: S,
    history: &History<S>,
    dir_deriv: S,
    smooth: &G,
    nonsmooth: &H,
    descent_param: S,
    xtol: S,
    budget: usize,
) -> Result<Search<S>, Error>
where
    S: NdFloat,
    G: SmoothFunction<S> + ?Sized,
    H: ProximalFunction<S> + ?Sized,
{
    let f_max = history.max().unwrap_or(start.f_x);
    let shrink = lit::<S>(0.5);

    let mut step = step;
    let mut evals = 0;
    let status = loop {
        if evals >= budget {
            break SearchStatus::BudgetExhausted;
        }
        evals += 1;

        let mut trial = start.x.to_owned();
        trial.scaled_add(step, &dir);
        let z = prox_point(nonsmooth, trial.view(), step)?;
        let (f_z, grad_z) = composite(smooth, nonsmooth, z.view())?;

        let travelled = (&z - &start.x).norm_sq() / (step * step);
        let slope = dir_deriv.max(-travelled);
        if f_z <= f_max + descent_param * step * slope {
            return Ok(Search {
                point: Point {
                    x: z,
                    f_x: f_z,
                    grad: grad_z,
                },
                step,
                status: SearchStatus::Accepted,
                evals,
            });
        }
        step = step * shrink;
        if step < xtol {
            break SearchStatus::StepTooSmall;
        }
    };

    Ok(Search {
        point: start,
        step,
        status,
        evals,
    })
}
