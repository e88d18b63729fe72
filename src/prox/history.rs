use std::collections::VecDeque;

use ndarray::NdFloat;

/// Sliding window over the most recent objective values
///
/// Holds at most `capacity` values in insertion order, pushing onto a full
/// window drops the oldest value. The nonmonotone line search compares
/// candidates against the largest value in the window.
#[derive(Debug, Clone)]
pub struct History<S> {
    values: VecDeque<S>,
    capacity: usize,
}

impl<S: NdFloat> History<S> {
    /// Empty window, a zero `capacity` is treated as one
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        History {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, f: S) {
        if self.values.len() == self.capacity {
            // forget
            self.values.pop_front();
        }
        self.values.push_back(f);
    }

    /// Largest value in the window
    pub fn max(&self) -> Option<S> {
        self.values
            .iter()
            .copied()
            .fold(None, |max, f| match max {
                Some(m) if m >= f => Some(m),
                _ => Some(f),
            })
    }

    /// Most recently pushed value
    pub fn last(&self) -> Option<S> {
        self.values.back().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Values from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.values.iter()
    }
}
