//! Common penalties $`h`$ with closed form proximal mappings

use std::convert::Infallible;

use ndarray::prelude::*;
use ndarray::NdFloat;

use crate::objective::ProximalFunction;
use crate::vector::VectorNorm;

/// Soft thresholding, the proximal mapping of $`\tau\|\cdot\|_1`$
/// ```math
/// [\mathrm{soft}(v, \tau)]_i = \mathrm{sign}(v_i) \max(|v_i| - \tau, 0)
/// ```
pub fn soft_threshold<S: NdFloat>(v: ArrayView1<S>, tau: S) -> Array1<S> {
    v.mapv(|vi| {
        let shrunk = vi.abs() - tau;
        if shrunk > S::zero() {
            vi.signum() * shrunk
        } else {
            S::zero()
        }
    })
}

/// No penalty, $`h = 0`$
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Zero;

impl<S: NdFloat> ProximalFunction<S> for Zero {
    type Error = Infallible;

    fn value(&self, _x: ArrayView1<S>) -> Result<Option<S>, Infallible> {
        Ok(Some(S::zero()))
    }

    fn prox(&self, v: ArrayView1<S>, _t: S) -> Result<Array1<S>, Infallible> {
        Ok(v.to_owned())
    }
}

/// Sparsity penalty $`h(x) = \lambda\|x\|_1`$
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct L1<S> {
    pub lambda: S,
}

impl<S> L1<S> {
    pub fn new(lambda: S) -> Self {
        L1 { lambda }
    }
}

impl<S: NdFloat> ProximalFunction<S> for L1<S> {
    type Error = Infallible;

    fn value(&self, x: ArrayView1<S>) -> Result<Option<S>, Infallible> {
        Ok(Some(self.lambda * x.norm_l1()))
    }

    fn prox(&self, v: ArrayView1<S>, t: S) -> Result<Array1<S>, Infallible> {
        Ok(soft_threshold(v, t * self.lambda))
    }
}

/// Indicator of the nonnegative orthant, its prox is the projection
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NonNegative;

impl<S: NdFloat> ProximalFunction<S> for NonNegative {
    type Error = Infallible;

    fn value(&self, x: ArrayView1<S>) -> Result<Option<S>, Infallible> {
        if x.iter().all(|&xi| xi >= S::zero()) {
            Ok(Some(S::zero()))
        } else {
            Ok(Some(S::infinity()))
        }
    }

    fn prox(&self, v: ArrayView1<S>, _t: S) -> Result<Array1<S>, Infallible> {
        Ok(v.mapv(|vi| vi.max(S::zero())))
    }
}
