//! Aggregator registry: fan-out routing and flush across every running
//! aggregator.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc::UnboundedSender;

use metroute_core::Metric;

use crate::running::MetricRouter;

/// Registry of running aggregators, keyed by reporting name.
///
/// Reconfiguration replaces a router wholesale; in-flight `route` calls keep
/// the `Arc` they already cloned.
#[derive(Default)]
pub struct AggregatorSet {
    routers: DashMap<String, Arc<MetricRouter>>,
}

impl AggregatorSet {
    pub fn new() -> Self {
        Self {
            routers: DashMap::new(),
        }
    }

    /// Insert or replace. Returns the router previously registered under the
    /// same name, if any.
    pub fn insert(&self, router: Arc<MetricRouter>) -> Option<Arc<MetricRouter>> {
        let name = router.name();
        let prev = self.routers.insert(name.clone(), router);
        if prev.is_some() {
            tracing::info!(aggregator = %name, "aggregator replaced");
        } else {
            tracing::info!(aggregator = %name, "aggregator registered");
        }
        prev
    }

    pub fn remove(&self, name: &str) -> Option<Arc<MetricRouter>> {
        self.routers.remove(name).map(|(_, r)| r)
    }

    pub fn get(&self, name: &str) -> Option<Arc<MetricRouter>> {
        self.routers.get(name).map(|e| e.value().clone())
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.routers.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.routers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }

    /// Offer `m` to every aggregator. Returns true if any of them asked for
    /// the original to be dropped.
    pub fn route(&self, m: &Metric) -> bool {
        let mut drop = false;
        for router in self.snapshot() {
            drop |= router.route(m);
        }
        drop
    }

    /// Flush every aggregator into `tx`.
    pub fn push_all(&self, tx: &UnboundedSender<Metric>) {
        for router in self.snapshot() {
            router.push(tx);
        }
    }

    // Clone out of the map so no shard guard is held across aggregator calls.
    fn snapshot(&self) -> Vec<Arc<MetricRouter>> {
        self.routers.iter().map(|e| e.value().clone()).collect()
    }
}
