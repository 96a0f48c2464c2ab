//! Filter layer (name/field/tag selectors).
//!
//! Compiles aggregator filter configuration into glob matchers the router
//! consults for every inbound metric.

pub mod engine;
pub mod pattern;

use metroute_core::{Fields, Tags};

pub use engine::Filter;
pub use pattern::Glob;

/// Per-metric inclusion predicate consulted by the router.
///
/// `apply` may narrow `fields` and `tags` to the selected subset; the router
/// rebuilds the forwarded metric from whatever is left.
pub trait MetricFilter: Send + Sync {
    /// Whether any selector is configured. An inactive filter is never applied.
    fn is_active(&self) -> bool;

    /// Returns true if the metric should be seen by the aggregator.
    fn apply(&self, name: &str, fields: &mut Fields, tags: &mut Tags) -> bool;
}
