//! Running aggregator: filter, rename, tag and forward metrics to one
//! aggregator plugin.

use std::sync::Arc;
use std::time::SystemTime;

use tokio::sync::mpsc::UnboundedSender;

use metroute_core::{Fields, Metric, Tags, ValueType};

use crate::accumulator::Accumulator;
use crate::aggregator::Aggregator;
use crate::filter::{Filter, MetricFilter};
use crate::obs::RouterMetrics;

/// Per-aggregator configuration. Immutable once handed to a router; to
/// reconfigure, build a new router and swap it into the `AggregatorSet`.
#[derive(Clone)]
pub struct AggregatorConfig {
    pub name: String,

    /// Ask the pipeline to drop the original metric once forwarded.
    pub drop_original: bool,
    pub name_override: String,
    pub measurement_prefix: String,
    pub measurement_suffix: String,
    /// Static tags; metric-supplied tags win on conflict.
    pub tags: Tags,
    pub filter: Arc<dyn MetricFilter>,
}

impl AggregatorConfig {
    /// Config with no renaming, no tags, and an inactive filter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            drop_original: false,
            name_override: String::new(),
            measurement_prefix: String::new(),
            measurement_suffix: String::new(),
            tags: Tags::new(),
            filter: Arc::new(Filter::default()),
        }
    }
}

/// Routes inbound metrics to one aggregator and decorates what it emits.
pub struct MetricRouter {
    config: AggregatorConfig,
    aggregator: Arc<dyn Aggregator>,
    metrics: Arc<RouterMetrics>,
}

impl MetricRouter {
    pub fn new(config: AggregatorConfig, aggregator: Arc<dyn Aggregator>) -> Self {
        Self {
            config,
            aggregator,
            metrics: Arc::new(RouterMetrics::default()),
        }
    }

    /// Share a counter registry with other routers.
    pub fn with_metrics(mut self, metrics: Arc<RouterMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<RouterMetrics> {
        &self.metrics
    }

    /// Reporting name.
    pub fn name(&self) -> String {
        format!("aggregators.{}", self.config.name)
    }

    /// Build an outgoing metric with this aggregator's naming and tagging
    /// rules applied. Returns `None` if there is nothing to emit or the
    /// metric is invalid (the latter is logged).
    pub fn build_metric(
        &self,
        measurement: &str,
        fields: Fields,
        tags: Option<Tags>,
        value_type: ValueType,
        time: SystemTime,
    ) -> Option<Metric> {
        if fields.is_empty() || measurement.is_empty() {
            return None;
        }
        let mut tags = tags.unwrap_or_default();

        let cfg = &self.config;
        let mut measurement = if cfg.name_override.is_empty() {
            measurement.to_string()
        } else {
            cfg.name_override.clone()
        };
        if !cfg.measurement_prefix.is_empty() {
            measurement.insert_str(0, &cfg.measurement_prefix);
        }
        if !cfg.measurement_suffix.is_empty() {
            measurement.push_str(&cfg.measurement_suffix);
        }

        for (k, v) in &cfg.tags {
            tags.entry(k.clone()).or_insert_with(|| v.clone());
        }

        let built = match value_type {
            ValueType::Counter => Metric::new_counter(measurement.as_str(), tags, fields, time),
            ValueType::Gauge => Metric::new_gauge(measurement.as_str(), tags, fields, time),
            ValueType::Untyped => Metric::new(measurement.as_str(), tags, fields, time),
        };

        match built {
            Ok(mut m) => {
                m.set_aggregate(true);
                Some(m)
            }
            Err(e) => {
                tracing::warn!(
                    aggregator = %cfg.name,
                    measurement = %measurement,
                    error = %e,
                    "error adding point"
                );
                self.metrics.build_failures.inc(&self.labels());
                None
            }
        }
    }

    /// Offer `inbound` to the aggregator. Returns true if the caller should
    /// drop the original metric.
    pub fn route(&self, inbound: &Metric) -> bool {
        let filter = &self.config.filter;
        if !filter.is_active() {
            self.forward(inbound);
            return self.drop_original();
        }

        let mut fields = inbound.fields().clone();
        let mut tags = inbound.tags().clone();
        if !filter.apply(inbound.name(), &mut fields, &mut tags) {
            tracing::debug!(
                aggregator = %self.config.name,
                metric = %inbound.name(),
                "filtered out"
            );
            self.metrics.filtered.inc(&self.labels());
            return false;
        }

        match Metric::new(inbound.name(), tags, fields, inbound.time()) {
            Ok(m) => {
                self.forward(&m);
                self.drop_original()
            }
            Err(e) => {
                tracing::warn!(
                    aggregator = %self.config.name,
                    measurement = %inbound.name(),
                    error = %e,
                    "error rebuilding filtered metric"
                );
                self.metrics.build_failures.inc(&self.labels());
                false
            }
        }
    }

    /// Flush the aggregator's window into `tx`, then reset it.
    pub fn push(&self, tx: &UnboundedSender<Metric>) {
        let acc = Accumulator::new(self, tx.clone());
        self.aggregator.push(&acc);
        self.aggregator.reset();
    }

    fn forward(&self, m: &Metric) {
        self.aggregator.apply(m);
        self.metrics.routed.inc(&self.labels());
    }

    fn labels(&self) -> [(&str, &str); 1] {
        [("aggregator", self.config.name.as_str())]
    }

    fn drop_original(&self) -> bool {
        if self.config.drop_original {
            self.metrics.dropped_originals.inc(&self.labels());
        }
        self.config.drop_original
    }
}
