//! The `ndarray-sparsa` crate minimizes composite objectives of the form
//! ```math
//! \min_x g(x) + h(x)
//! ```
//! over `ndarray` vectors, where $`g`$ is smooth with an available gradient
//! and $`h`$ is a (possibly nonsmooth) penalty that only exposes its
//! proximal mapping.
//!
//! The solver is SpaRSA (Structured reconstruction by separable
//! approximation), a proximal gradient method that picks its step with the
//! Barzilai-Borwein heuristic and safeguards it with a nonmonotone
//! curvilinear line search. Typical uses are "smooth loss + sparsity
//! penalty" problems such as the LASSO or nonnegative least squares.
//!
//! ```
//! use ndarray::prelude::*;
//! use ndarray_sparsa::prox::{sparsa, Flag, L1};
//!
//! // minimize 0.5 * ||x - b||^2 + 0.5 * ||x||_1
//! let b = array![3.0, -0.2, -2.0];
//! let smooth = |x: ArrayView1<f64>| {
//!     let r = &x - &b;
//!     (0.5 * r.dot(&r), r)
//! };
//! let sol = sparsa(&smooth, &L1::new(0.5), Array1::zeros(3).view()).unwrap();
//! assert_eq!(sol.output.flag, Flag::Optim);
//! assert!((sol.x[0] - 2.5).abs() < 1e-6);
//! assert!(sol.x[1].abs() < 1e-6);
//! ```

#![cfg_attr(all(rustc_nightly, test), feature(test))]
#[cfg(all(rustc_nightly, test))]
extern crate test;

mod error;
pub use error::*;

pub mod objective;
pub mod prox;
mod vector;
