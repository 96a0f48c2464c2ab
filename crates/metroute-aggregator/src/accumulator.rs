//! Flush-side accumulator handed to `Aggregator::push`.
//!
//! Every emitted summary goes through `MetricRouter::build_metric`, so the
//! same naming and tagging rules apply to outgoing metrics as configured for
//! the aggregator.

use std::time::SystemTime;

use tokio::sync::mpsc::UnboundedSender;

use metroute_core::{Fields, Metric, Tags, ValueType};

use crate::running::MetricRouter;

pub struct Accumulator<'a> {
    router: &'a MetricRouter,
    tx: UnboundedSender<Metric>,
}

impl<'a> Accumulator<'a> {
    pub fn new(router: &'a MetricRouter, tx: UnboundedSender<Metric>) -> Self {
        Self { router, tx }
    }

    pub fn add_fields(
        &self,
        measurement: &str,
        fields: Fields,
        tags: Option<Tags>,
        time: SystemTime,
    ) {
        self.add(measurement, fields, tags, ValueType::Untyped, time);
    }

    pub fn add_counter(
        &self,
        measurement: &str,
        fields: Fields,
        tags: Option<Tags>,
        time: SystemTime,
    ) {
        self.add(measurement, fields, tags, ValueType::Counter, time);
    }

    pub fn add_gauge(
        &self,
        measurement: &str,
        fields: Fields,
        tags: Option<Tags>,
        time: SystemTime,
    ) {
        self.add(measurement, fields, tags, ValueType::Gauge, time);
    }

    /// Re-emit a prebuilt metric, keeping its value type.
    pub fn add_metric(&self, metric: Metric) {
        let value_type = metric.value_type();
        let (name, tags, fields, time) = metric.into_parts();
        self.add(&name, fields, Some(tags), value_type, time);
    }

    fn add(
        &self,
        measurement: &str,
        fields: Fields,
        tags: Option<Tags>,
        value_type: ValueType,
        time: SystemTime,
    ) {
        let Some(m) = self.router.build_metric(measurement, fields, tags, value_type, time) else {
            return;
        };
        if self.tx.send(m).is_err() {
            tracing::debug!(
                aggregator = %self.router.name(),
                "flush channel closed; metric discarded"
            );
        }
    }
}
