//! metroute aggregator library entry.
//!
//! This crate sits between metric producers and aggregator plugins: it
//! filters inbound metrics per aggregator, forwards them, decides whether the
//! original should be dropped, and applies naming and tagging rules to the
//! summaries aggregators emit on flush.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod accumulator;
pub mod aggregator;
pub mod config;
pub mod filter;
pub mod obs;
pub mod running;
pub mod set;

pub use accumulator::Accumulator;
pub use aggregator::Aggregator;
pub use filter::{Filter, MetricFilter};
pub use running::{AggregatorConfig, MetricRouter};
pub use set::AggregatorSet;
