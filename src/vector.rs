//! Norms of one dimensional arrays and scalar conversions

use ndarray::{ArrayBase, Data, Ix1, NdFloat};
use num_traits::NumCast;

pub(crate) trait VectorNorm<S> {
    /// $`\|x\|_1`$
    fn norm_l1(&self) -> S;
    /// $`\|x\|_2^2`$
    fn norm_sq(&self) -> S;
    /// $`\|x\|_\infty`$, NaN if any entry is NaN
    fn norm_max(&self) -> S;
}

impl<S, D> VectorNorm<S> for ArrayBase<D, Ix1>
where
    S: NdFloat,
    D: Data<Elem = S>,
{
    fn norm_l1(&self) -> S {
        self.fold(S::zero(), |acc, &v| acc + v.abs())
    }

    fn norm_sq(&self) -> S {
        self.dot(self)
    }

    fn norm_max(&self) -> S {
        self.fold(S::zero(), |acc, &v| {
            let v = v.abs();
            // NaN is absorbing
            if acc.is_nan() || v <= acc {
                acc
            } else {
                v
            }
        })
    }
}

/// Float literal in working precision
pub(crate) fn lit<S: NdFloat>(v: f64) -> S {
    // f64 -> f32/f64 casts cannot fail
    <S as NumCast>::from(v).unwrap_or_else(S::nan)
}

/// Working precision value as `f64`, for logs and error messages
pub(crate) fn as_f64<S: NdFloat>(v: S) -> f64 {
    v.to_f64().unwrap_or(std::f64::NAN)
}
