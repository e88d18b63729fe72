//! Callable contracts for the two parts of a composite objective
//!
//! The smooth part $`g`$ returns its value and gradient, the nonsmooth part
//! $`h`$ returns its (optional) value and its proximal mapping
//! ```math
//! \mathrm{prox}_{t h}(v) = \mathrm{arg}\!\min_z h(z) + \frac{1}{2t}\|z - v\|_2^2
//! ```
//! Plain closures implement both traits and never fail. Objectives that can
//! fail implement the traits directly, their errors reach the caller
//! unmodified as the source of [`Error::Smooth`] or [`Error::Proximal`].

use std::convert::Infallible;

use ndarray::prelude::*;
use ndarray::NdFloat;

use crate::error::{BoxError, Error};
use crate::vector::VectorNorm;

/// Smooth part $`g`$ of the objective
pub trait SmoothFunction<S> {
    type Error: Into<BoxError>;

    /// Value $`g(x)`$ and gradient $`\nabla g(x)`$
    fn value_grad(&self, x: ArrayView1<S>) -> Result<(S, Array1<S>), Self::Error>;
}

impl<S, F> SmoothFunction<S> for F
where
    F: Fn(ArrayView1<S>) -> (S, Array1<S>),
{
    type Error = Infallible;

    fn value_grad(&self, x: ArrayView1<S>) -> Result<(S, Array1<S>), Infallible> {
        Ok(self(x))
    }
}

/// Nonsmooth part $`h`$ of the objective
///
/// Implementations must be pure functions of their inputs, otherwise
/// repeated runs of the solver are not reproducible.
pub trait ProximalFunction<S> {
    type Error: Into<BoxError>;

    /// Bare penalty $`h(x)`$, `None` when the penalty is not computed
    fn value(&self, x: ArrayView1<S>) -> Result<Option<S>, Self::Error>;

    /// Proximal mapping of $`t h`$ at `v`
    fn prox(&self, v: ArrayView1<S>, t: S) -> Result<Array1<S>, Self::Error>;
}

/// Closures follow the `h(point, scale?)` convention: without a scale only
/// the value is used, with a scale `t` only the returned point is used.
impl<S, F> ProximalFunction<S> for F
where
    F: Fn(ArrayView1<S>, Option<S>) -> (Option<S>, Array1<S>),
{
    type Error = Infallible;

    fn value(&self, x: ArrayView1<S>) -> Result<Option<S>, Infallible> {
        Ok(self(x, None).0)
    }

    fn prox(&self, v: ArrayView1<S>, t: S) -> Result<Array1<S>, Infallible> {
        Ok(self(v, Some(t)).1)
    }
}

fn check_len(what: &'static str, expected: usize, found: usize) -> Result<(), Error> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            what,
            expected,
            found,
        })
    }
}

/// Composite value $`g(x) + h(x)`$ and gradient $`\nabla g(x)`$
///
/// A penalty that is not computed contributes zero.
pub(crate) fn composite<S, G, H>(
    smooth: &G,
    nonsmooth: &H,
    x: ArrayView1<S>,
) -> Result<(S, Array1<S>), Error>
where
    S: NdFloat,
    G: SmoothFunction<S> + ?Sized,
    H: ProximalFunction<S> + ?Sized,
{
    let (g_x, grad) = smooth
        .value_grad(x)
        .map_err(|e| Error::Smooth(e.into()))?;
    check_len("gradient", x.len(), grad.len())?;
    let h_x = nonsmooth
        .value(x)
        .map_err(|e| Error::Proximal(e.into()))?;
    Ok((g_x + h_x.unwrap_or_else(S::zero), grad))
}

/// $`\mathrm{prox}_{t h}(v)`$ with its length checked against `v`
pub(crate) fn prox_point<S, H>(nonsmooth: &H, v: ArrayView1<S>, t: S) -> Result<Array1<S>, Error>
where
    S: NdFloat,
    H: ProximalFunction<S> + ?Sized,
{
    let z = nonsmooth
        .prox(v, t)
        .map_err(|e| Error::Proximal(e.into()))?;
    check_len("proximal point", v.len(), z.len())?;
    Ok(z)
}

/// Optimality measure $`\|\mathrm{prox}_{h}(x - \nabla g(x)) - x\|_\infty`$,
/// zero exactly at a stationary point.
pub(crate) fn optimality<S, H>(
    nonsmooth: &H,
    x: ArrayView1<S>,
    grad: ArrayView1<S>,
) -> Result<S, Error>
where
    S: NdFloat,
    H: ProximalFunction<S> + ?Sized,
{
    let z = prox_point(nonsmooth, (&x - &grad).view(), S::one())?;
    Ok((z - &x).norm_max())
}
