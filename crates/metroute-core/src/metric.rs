//! Metric data model and constructors (panic-free).
//!
//! Construction rules:
//! - A metric always has a non-empty name and at least one field.
//! - Tag keys and values, and field keys, are non-empty.
//! - Float fields must be finite.
//! - A key may be a tag or a field, never both.
//!
//! Tags and fields are stored in `BTreeMap`s so iteration order (and therefore
//! any rendering) is deterministic.

use std::collections::BTreeMap;
use std::fmt;
use std::time::SystemTime;

use crate::error::{MetrouteError, Result};

/// Tag set of a metric (keys unique).
pub type Tags = BTreeMap<String, String>;

/// Field set of a metric (keys unique).
pub type Fields = BTreeMap<String, FieldValue>;

/// Value-type classification of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueType {
    Counter,
    Gauge,
    #[default]
    Untyped,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Counter => "counter",
            ValueType::Gauge => "gauge",
            ValueType::Untyped => "untyped",
        }
    }
}

/// Scalar field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Int(i64),
    UInt(u64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Int(v) => write!(f, "{v}i"),
            FieldValue::UInt(v) => write!(f, "{v}u"),
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Str(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::UInt(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Str(v)
    }
}

/// A single measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    name: String,
    tags: Tags,
    fields: Fields,
    time: SystemTime,
    value_type: ValueType,
    aggregate: bool,
}

impl Metric {
    /// Build an untyped metric.
    pub fn new(
        name: impl Into<String>,
        tags: Tags,
        fields: Fields,
        time: SystemTime,
    ) -> Result<Self> {
        Self::with_type(ValueType::Untyped, name, tags, fields, time)
    }

    /// Build a counter metric.
    pub fn new_counter(
        name: impl Into<String>,
        tags: Tags,
        fields: Fields,
        time: SystemTime,
    ) -> Result<Self> {
        Self::with_type(ValueType::Counter, name, tags, fields, time)
    }

    /// Build a gauge metric.
    pub fn new_gauge(
        name: impl Into<String>,
        tags: Tags,
        fields: Fields,
        time: SystemTime,
    ) -> Result<Self> {
        Self::with_type(ValueType::Gauge, name, tags, fields, time)
    }

    /// Build a metric of the given value type, validating all inputs.
    pub fn with_type(
        value_type: ValueType,
        name: impl Into<String>,
        tags: Tags,
        fields: Fields,
        time: SystemTime,
    ) -> Result<Self> {
        let name = name.into();
        validate(&name, &tags, &fields)?;
        Ok(Self {
            name,
            tags,
            fields,
            time,
            value_type,
            aggregate: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn tags(&self) -> &Tags {
        &self.tags
    }
    pub fn fields(&self) -> &Fields {
        &self.fields
    }
    pub fn time(&self) -> SystemTime {
        self.time
    }
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Whether this metric was produced by an aggregation stage.
    pub fn is_aggregate(&self) -> bool {
        self.aggregate
    }

    pub fn set_aggregate(&mut self, aggregate: bool) {
        self.aggregate = aggregate;
    }

    /// Split into owned parts (name, tags, fields, time).
    pub fn into_parts(self) -> (String, Tags, Fields, SystemTime) {
        (self.name, self.tags, self.fields, self.time)
    }
}

fn validate(name: &str, tags: &Tags, fields: &Fields) -> Result<()> {
    if name.is_empty() {
        return Err(MetrouteError::InvalidMetric("missing measurement name".into()));
    }
    if fields.is_empty() {
        return Err(MetrouteError::InvalidMetric(format!(
            "{name}: metric must have at least one field"
        )));
    }

    for (k, v) in tags {
        if k.is_empty() {
            return Err(MetrouteError::InvalidMetric(format!("{name}: empty tag key")));
        }
        if v.is_empty() {
            return Err(MetrouteError::InvalidMetric(format!(
                "{name}: empty value for tag {k}"
            )));
        }
    }

    for (k, v) in fields {
        if k.is_empty() {
            return Err(MetrouteError::InvalidMetric(format!("{name}: empty field key")));
        }
        if let FieldValue::Float(f) = v {
            if !f.is_finite() {
                return Err(MetrouteError::InvalidMetric(format!(
                    "{name}: field {k} is not a finite number"
                )));
            }
        }
        if tags.contains_key(k) {
            return Err(MetrouteError::InvalidMetric(format!(
                "{name}: key {k} used as both tag and field"
            )));
        }
    }

    Ok(())
}
