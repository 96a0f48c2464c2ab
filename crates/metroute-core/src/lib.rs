//! metroute core: the metric data model, its constructors, and the shared
//! error type.
//!
//! This crate carries no runtime dependencies so that aggregator plugins can
//! depend on the data model without pulling in the routing stage.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Invalid metrics are
//! reported as `MetrouteError::InvalidMetric` so a bad producer never takes
//! down the pipeline.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;

/// Shared result type.
pub use error::{MetrouteError, Result};
pub use metric::{FieldValue, Fields, Metric, Tags, ValueType};
