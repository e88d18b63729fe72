use ndarray::prelude::*;
use ndarray::NdFloat;

use super::Flag;
use crate::vector::as_f64;

/// Per iteration diagnostics
///
/// Entry 0 describes the starting point, entry `k` the iterate after
/// iteration `k`. All four sequences have `iters + 1` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace<S> {
    pub f_x: Array1<S>,
    pub fun_evals: Vec<usize>,
    pub prox_evals: Vec<usize>,
    pub optim: Array1<S>,
}

/// Entries reserved up front, a run with more iterations grows the buffers
const TRACE_RESERVE: usize = 1024;

/// Accumulates a [`Trace`] while the solver runs
#[derive(Debug, Clone)]
pub(crate) struct TraceRecorder<S> {
    f_x: Vec<S>,
    fun_evals: Vec<usize>,
    prox_evals: Vec<usize>,
    optim: Vec<S>,
}

impl<S: NdFloat> TraceRecorder<S> {
    /// Room for `max_iter` iterations plus the starting point, capped at
    /// `TRACE_RESERVE` entries
    pub(crate) fn new(max_iter: usize) -> Self {
        let cap = max_iter.saturating_add(1).min(TRACE_RESERVE);
        TraceRecorder {
            f_x: Vec::with_capacity(cap),
            fun_evals: Vec::with_capacity(cap),
            prox_evals: Vec::with_capacity(cap),
            optim: Vec::with_capacity(cap),
        }
    }

    /// Stores entry `iter`, entries are recorded in order
    pub(crate) fn record(
        &mut self,
        iter: usize,
        f_x: S,
        fun_evals: usize,
        prox_evals: usize,
        optim: S,
    ) {
        debug_assert_eq!(iter, self.fun_evals.len());
        self.f_x.push(f_x);
        self.fun_evals.push(fun_evals);
        self.prox_evals.push(prox_evals);
        self.optim.push(optim);
    }

    /// Trace of entries `0..=iters`
    pub(crate) fn finish(self, iters: usize) -> Trace<S> {
        let len = iters + 1;
        let TraceRecorder {
            mut f_x,
            mut fun_evals,
            mut prox_evals,
            mut optim,
        } = self;
        f_x.truncate(len);
        fun_evals.truncate(len);
        prox_evals.truncate(len);
        optim.truncate(len);
        Trace {
            f_x: Array1::from(f_x),
            fun_evals,
            prox_evals,
            optim: Array1::from(optim),
        }
    }
}

impl<S> Trace<S> {
    pub fn len(&self) -> usize {
        self.fun_evals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fun_evals.is_empty()
    }
}

/// Summary of a solver run
#[derive(Debug, Clone, PartialEq)]
pub struct Output<S> {
    pub flag: Flag,
    /// Human readable form of `flag`
    pub message: &'static str,
    pub iters: usize,
    pub fun_evals: usize,
    pub prox_evals: usize,
    /// Optimality measure at the final iterate
    pub optim: S,
    pub trace: Trace<S>,
}

/// Result of a solver run
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<S> {
    /// Final iterate
    pub x: Array1<S>,
    /// Composite objective value at `x`
    pub f_x: S,
    pub output: Output<S>,
}

/// What an observer sees once per iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<S> {
    pub iter: usize,
    pub fun_evals: usize,
    pub prox_evals: usize,
    /// Step taken by the line search, `None` at the starting point
    pub step: Option<S>,
    pub f_x: S,
    pub optim: S,
}

/// Do nothing observer
pub fn nop<S>(_snapshot: &Snapshot<S>) {}

/// Progress table written through `log` every `every` iterations
pub(crate) struct Report {
    every: usize,
}

impl Report {
    pub(crate) fn new(every: usize) -> Self {
        Report { every }
    }

    fn enabled(&self) -> bool {
        self.every > 0
    }

    fn due(&self, iter: usize) -> bool {
        self.enabled() && iter % self.every == 0
    }

    pub(crate) fn header(&self) {
        if self.enabled() {
            log::info!(
                " {:>4}   {:>6}  {:>6}  {:>12}  {:>12}  {:>12}",
                "",
                "Fun.",
                "Prox",
                "Step len.",
                "Obj. val.",
                "Optim."
            );
        }
    }

    pub(crate) fn row<S: NdFloat>(&self, snap: &Snapshot<S>) {
        if self.due(snap.iter) {
            self.write(snap);
        }
    }

    /// Last row, unless the regular cadence already showed it, and the
    /// termination message.
    pub(crate) fn finish<S: NdFloat>(&self, snap: &Snapshot<S>, flag: Flag) {
        if !self.enabled() {
            return;
        }
        if !self.due(snap.iter) {
            self.write(snap);
        }
        log::info!("{}", flag.message());
    }

    fn write<S: NdFloat>(&self, snap: &Snapshot<S>) {
        let step = match snap.step {
            Some(step) => format!("{:12.4e}", as_f64(step)),
            None => format!("{:12}", ""),
        };
        log::info!(
            " {:>4} | {:>6}  {:>6}  {}  {:12.4e}  {:12.4e}",
            snap.iter,
            snap.fun_evals,
            snap.prox_evals,
            step,
            as_f64(snap.f_x),
            as_f64(snap.optim)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_iterations_keep_start() {
        let mut recorder = TraceRecorder::new(0);
        recorder.record(0, 1.5, 1, 1, 0.5);
        let trace = recorder.finish(0);
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.f_x, array![1.5]);
        assert_eq!(trace.optim, array![0.5]);
        assert_eq!(trace.fun_evals, vec![1]);
    }

    #[test]
    fn records_in_order() {
        let mut recorder = TraceRecorder::new(10);
        for k in 0..4 {
            recorder.record(k, k as f64, k + 1, k + 1, 0.);
        }
        let trace = recorder.finish(3);
        assert_eq!(trace.len(), 4);
        assert_eq!(trace.f_x.len(), 4);
        assert_eq!(trace.optim.len(), 4);
        assert_eq!(trace.prox_evals, vec![1, 2, 3, 4]);
        assert_eq!(trace.f_x, array![0., 1., 2., 3.]);
    }

    #[test]
    fn huge_iteration_cap_reserves_little() {
        let mut recorder = TraceRecorder::<f64>::new(usize::max_value());
        assert!(recorder.fun_evals.capacity() <= TRACE_RESERVE);
        for k in 0..TRACE_RESERVE + 5 {
            recorder.record(k, 0., k, k, 0.);
        }
        let trace = recorder.finish(TRACE_RESERVE + 4);
        assert_eq!(trace.len(), TRACE_RESERVE + 5);
        assert_eq!(trace.optim.len(), TRACE_RESERVE + 5);
    }

    #[test]
    fn report_cadence() {
        let report = Report::new(3);
        assert!(report.due(0));
        assert!(!report.due(2));
        assert!(report.due(6));
        assert!(!Report::new(0).due(0));
    }
}
