//! Size-capped FIFO used by rolling computations.

use std::collections::VecDeque;

use stride_core::warning::{report, StrideWarning};
use stride_core::Value;

/// The last `capacity` decoded values, oldest first.
#[derive(Clone, Debug)]
pub struct RollingWindow {
    items: VecDeque<Value>,
    capacity: usize,
}

impl RollingWindow {
    /// Create an empty window holding at most `capacity` values.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a value, evicting the oldest once the window is full.
    pub fn push(&mut self, value: Value) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(value);
    }

    /// Number of values currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the window holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Contiguous view of the window, oldest first.
    pub fn as_slice(&mut self) -> &[Value] {
        self.items.make_contiguous()
    }
}

/// Resolve the observation threshold for a window of `window` values.
///
/// Defaults to `window`. A request larger than the window is clamped down
/// and reported as [`StrideWarning::MinObservationsClamped`].
pub fn min_observations(window: usize, requested: Option<usize>) -> usize {
    match requested {
        None => window,
        Some(n) if n > window => {
            report(StrideWarning::MinObservationsClamped {
                requested: n,
                window,
            });
            window
        }
        Some(n) => n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_when_full() {
        let mut w = RollingWindow::new(2);
        for v in 1..=3 {
            w.push(Value::Int(v));
        }
        assert_eq!(w.len(), 2);
        assert_eq!(w.as_slice(), &[Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn threshold_defaults_to_window() {
        assert_eq!(min_observations(3, None), 3);
        assert_eq!(min_observations(3, Some(1)), 1);
    }

    #[test]
    fn oversized_threshold_is_clamped() {
        assert_eq!(min_observations(3, Some(10)), 3);
    }
}
