//! Top-level facade crate for metroute.
//!
//! Re-exports the metric model and the aggregator routing stage so users can
//! depend on a single crate.

pub mod core {
    pub use metroute_core::*;
}

pub mod aggregator {
    pub use metroute_aggregator::*;
}
