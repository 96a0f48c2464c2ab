//! Aggregator capability consumed by the router.

use metroute_core::Metric;

use crate::accumulator::Accumulator;

/// Stateful aggregation plugin.
///
/// Implementations do their own locking; the router never holds a lock of
/// its own while calling into them.
pub trait Aggregator: Send + Sync {
    /// Accumulate one metric into the current window.
    fn apply(&self, metric: &Metric);

    /// Emit the summaries of the current window through `acc`.
    fn push(&self, acc: &Accumulator<'_>);

    /// Clear the current window.
    fn reset(&self);
}
