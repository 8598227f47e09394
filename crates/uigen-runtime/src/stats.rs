//! Invocation statistics.

use crate::invocation::InvocationState;
use serde::{Deserialize, Serialize};

/// Counts of tracked invocations by state.
///
/// # Examples
///
/// ```
/// use uigen_runtime::TrackerStats;
///
/// let stats = TrackerStats {
///     total: 4,
///     received: 0,
///     executing: 0,
///     succeeded: 3,
///     failed: 1,
/// };
/// assert!((stats.success_rate() - 0.75).abs() < f64::EPSILON);
/// assert_eq!(stats.pending(), 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerStats {
    /// All invocations ever received
    pub total: usize,
    /// Waiting for final arguments or a worker
    pub received: usize,
    /// Currently running
    pub executing: usize,
    /// Completed with a result
    pub succeeded: usize,
    /// Completed with an error, cancellations included
    pub failed: usize,
}

impl TrackerStats {
    pub(crate) const fn record(&mut self, state: InvocationState) {
        self.total += 1;
        match state {
            InvocationState::Received => self.received += 1,
            InvocationState::Executing => self.executing += 1,
            InvocationState::Succeeded => self.succeeded += 1,
            InvocationState::Failed => self.failed += 1,
        }
    }

    /// Invocations not yet in a terminal state.
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.received + self.executing
    }

    /// Share of completed invocations that succeeded, in `0.0..=1.0`.
    ///
    /// Returns `0.0` when nothing has completed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        let completed = self.succeeded + self.failed;
        if completed == 0 {
            return 0.0;
        }
        self.succeeded as f64 / completed as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_by_state() {
        let mut stats = TrackerStats::default();
        stats.record(InvocationState::Received);
        stats.record(InvocationState::Executing);
        stats.record(InvocationState::Failed);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending(), 2);
        assert!(stats.success_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn test_success_rate_empty() {
        assert!(TrackerStats::default().success_rate().abs() < f64::EPSILON);
    }
}
