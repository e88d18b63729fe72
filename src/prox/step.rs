use ndarray::prelude::*;
use ndarray::NdFloat;

use crate::vector::{lit, VectorNorm};

/// Smallest Barzilai-Borwein step accepted as is
pub const BB_STEP_MIN: f64 = 1e-9;
/// Largest Barzilai-Borwein step accepted as is
pub const BB_STEP_MAX: f64 = 1e9;

/// Barzilai-Borwein step
/// ```math
/// \alpha = \frac{\langle y, s \rangle}{\langle y, y \rangle}, \quad
/// s = x_k - x_{k-1}, \quad y = \nabla g(x_k) - \nabla g(x_{k-1})
/// ```
/// `None` when the curvature estimate is degenerate, i.e. the step is not
/// in `[BB_STEP_MIN, BB_STEP_MAX]` or is NaN (for instance $`y = 0`$).
pub fn bb_step<S: NdFloat>(s: ArrayView1<S>, y: ArrayView1<S>) -> Option<S> {
    let step = y.dot(&s) / y.dot(&y);
    if step >= lit(BB_STEP_MIN) && step <= lit(BB_STEP_MAX) {
        Some(step)
    } else {
        None
    }
}

/// Safe step $`\min(1, 1/\|\nabla g(x)\|_1)`$
pub fn fallback_step<S: NdFloat>(grad: ArrayView1<S>) -> S {
    S::one().min(S::one() / grad.norm_l1())
}

/// Initial step for the line search of iteration `iter` (counting from 1)
///
/// The first iteration has no curvature information and always falls back.
pub fn estimate_step<S: NdFloat>(
    iter: usize,
    x: ArrayView1<S>,
    x_old: ArrayView1<S>,
    grad: ArrayView1<S>,
    grad_old: ArrayView1<S>,
) -> S {
    if iter > 1 {
        let s = &x - &x_old;
        let y = &grad - &grad_old;
        if let Some(step) = bb_step(s.view(), y.view()) {
            return step;
        }
        log::trace!("iteration {}: degenerate BB step, falling back", iter);
    }
    fallback_step(grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bb_on_quadratic_is_inverse_curvature() {
        // g(x) = 0.5 * 4 * |x|^2 has y = 4 s
        let s = array![1., -2.];
        let y = &s * 4.;
        assert_abs_diff_eq!(bb_step(s.view(), y.view()).unwrap(), 0.25);
    }

    #[test]
    fn degenerate_curvature_is_rejected() {
        let s = array![1., 1.];
        let zero = array![0., 0.];
        assert_eq!(bb_step(s.view(), zero.view()), None);
        // negative curvature
        assert_eq!(bb_step(s.view(), (-&s).view()), None);
        // tiny and huge
        assert_eq!(bb_step(s.view(), (&s * 1e10).view()), None);
        assert_eq!(bb_step(s.view(), (&s * 1e-10).view()), None);
    }

    #[test]
    fn fallback_step_is_capped() {
        assert_eq!(fallback_step(array![0.1, -0.1].view()), 1.);
        assert_eq!(fallback_step(array![4., -6.].view()), 0.1);
        assert_eq!(fallback_step(array![0., 0.].view()), 1.);
    }

    #[test]
    fn first_iteration_always_falls_back() {
        let x = array![1., 1.];
        let x_old = array![0., 0.];
        for &scale in &[1e-3, 1., 1e3] {
            let grad = array![2., 3.] * scale;
            let grad_old = array![1., 1.] * scale;
            let step = estimate_step(1, x.view(), x_old.view(), grad.view(), grad_old.view());
            assert_eq!(step, fallback_step(grad.view()));
        }
    }

    #[test]
    fn later_iterations_use_bb() {
        let x = array![1., 1.];
        let x_old = array![0., 0.];
        let grad = array![2., 2.];
        let grad_old = array![0., 0.];
        let step = estimate_step(2, x.view(), x_old.view(), grad.view(), grad_old.view());
        assert_abs_diff_eq!(step, 0.5);

        // unchanged gradient forces y.y = 0
        let step = estimate_step(2, x.view(), x_old.view(), grad.view(), grad.view());
        assert_eq!(step, fallback_step(grad.view()));
    }
}
