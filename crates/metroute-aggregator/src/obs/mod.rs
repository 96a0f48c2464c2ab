//! Lightweight in-process router counters.
//!
//! Counters are stored as atomics keyed by label set and rendered in the
//! Prometheus text exposition format by whoever owns the scrape endpoint.

pub mod metrics;

pub use metrics::{CounterVec, RouterMetrics};
