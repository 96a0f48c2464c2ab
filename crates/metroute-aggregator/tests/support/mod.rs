//! Test doubles shared by router integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use metroute_aggregator::{Accumulator, Aggregator, MetricFilter};
use metroute_core::{FieldValue, Fields, Metric, Tags};

/// Records every applied metric; `push` re-emits one summary per metric.
#[derive(Default)]
pub struct RecordingAggregator {
    pub seen: Mutex<Vec<Metric>>,
    pub resets: AtomicUsize,
}

impl RecordingAggregator {
    pub fn seen(&self) -> Vec<Metric> {
        self.seen.lock().unwrap().clone()
    }
}

impl Aggregator for RecordingAggregator {
    fn apply(&self, metric: &Metric) {
        self.seen.lock().unwrap().push(metric.clone());
    }

    fn push(&self, acc: &Accumulator<'_>) {
        for m in self.seen.lock().unwrap().iter() {
            let mut fields = Fields::new();
            fields.insert("count".into(), FieldValue::UInt(m.fields().len() as u64));
            acc.add_counter(m.name(), fields, Some(m.tags().clone()), m.time());
        }
    }

    fn reset(&self) {
        self.seen.lock().unwrap().clear();
        self.resets.fetch_add(1, Ordering::Relaxed);
    }
}

/// Active filter with a fixed verdict that leaves fields and tags alone.
pub struct FixedFilter {
    pub accept: bool,
    pub calls: AtomicUsize,
}

impl FixedFilter {
    pub fn new(accept: bool) -> Self {
        Self {
            accept,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl MetricFilter for FixedFilter {
    fn is_active(&self) -> bool {
        true
    }

    fn apply(&self, _name: &str, _fields: &mut Fields, _tags: &mut Tags) -> bool {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.accept
    }
}

/// Inactive filter that fails the test if it is ever applied.
pub struct InactiveFilter;

impl MetricFilter for InactiveFilter {
    fn is_active(&self) -> bool {
        false
    }

    fn apply(&self, _name: &str, _fields: &mut Fields, _tags: &mut Tags) -> bool {
        panic!("inactive filter must not be applied");
    }
}

/// Active filter that accepts everything after adding one tag.
pub struct TagInjectingFilter {
    key: String,
    value: String,
}

impl TagInjectingFilter {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

impl MetricFilter for TagInjectingFilter {
    fn is_active(&self) -> bool {
        true
    }

    fn apply(&self, _name: &str, _fields: &mut Fields, tags: &mut Tags) -> bool {
        tags.insert(self.key.clone(), self.value.clone());
        true
    }
}

pub fn fixed_time() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

pub fn tags(pairs: &[(&str, &str)]) -> Tags {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn fields(pairs: &[(&str, f64)]) -> Fields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), FieldValue::Float(*v)))
        .collect()
}

pub fn cpu_metric() -> Metric {
    Metric::new_gauge(
        "cpu",
        tags(&[("host", "web-1"), ("cpu", "cpu0")]),
        fields(&[("usage_user", 1.5), ("usage_idle", 97.0)]),
        fixed_time(),
    )
    .unwrap()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// In-memory log sink for asserting on emitted events.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a scoped subscriber and return everything it logged.
pub fn capture_logs<F: FnOnce()>(f: F) -> String {
    let buf = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buf.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = buf.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}
