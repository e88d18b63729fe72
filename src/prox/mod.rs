//! Minimization for Composite Functions consisting of
//! smooth _g_ and non-smooth prox-friendly _h_
//!
//! This includes common objective functions such as the LASSO
//! as well as smooth constrained methods, as a projection is
//! the proximal operator of a constraint set.

mod config;
pub use config::*;

mod curvtrack;
pub use curvtrack::*;

mod history;
pub use history::*;

mod regularizers;
pub use regularizers::*;

mod sparsa;
pub use sparsa::*;

mod step;
pub use step::*;

mod termination;
pub use termination::*;

mod trace;
pub use trace::*;
