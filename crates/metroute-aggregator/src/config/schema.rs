use std::collections::{BTreeMap, HashSet};

use metroute_core::error::{MetrouteError, Result};
use serde::Deserialize;

use crate::filter::Filter;
use crate::running::AggregatorConfig;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetrouteConfig {
    pub version: u32,

    #[serde(default)]
    pub aggregators: Vec<AggregatorSection>,
}

impl MetrouteConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetrouteError::UnsupportedVersion);
        }

        let mut seen = HashSet::new();
        for a in &self.aggregators {
            a.validate()?;
            if !seen.insert(a.name.as_str()) {
                return Err(MetrouteError::Config(format!(
                    "duplicate aggregator name: {}",
                    a.name
                )));
            }
        }
        Ok(())
    }
}

/// One `aggregators[]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggregatorSection {
    pub name: String,

    #[serde(default)]
    pub drop_original: bool,

    #[serde(default)]
    pub name_override: String,
    #[serde(default)]
    pub measurement_prefix: String,
    #[serde(default)]
    pub measurement_suffix: String,

    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    #[serde(default)]
    pub filter: FilterConfig,
}

impl AggregatorSection {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(MetrouteError::Config("aggregators[].name must not be empty".into()));
        }
        if self.tags.keys().any(|k| k.is_empty()) {
            return Err(MetrouteError::Config(format!(
                "aggregator {}: tag keys must not be empty",
                self.name
            )));
        }
        // Compiling is the only way to validate globs.
        Filter::compile(&self.filter).map_err(|e| {
            MetrouteError::Config(format!("aggregator {}: {e}", self.name))
        })?;
        Ok(())
    }

    /// Compile this section into an immutable router config.
    pub fn router_config(&self) -> Result<AggregatorConfig> {
        Ok(AggregatorConfig {
            name: self.name.clone(),
            drop_original: self.drop_original,
            name_override: self.name_override.clone(),
            measurement_prefix: self.measurement_prefix.clone(),
            measurement_suffix: self.measurement_suffix.clone(),
            tags: self.tags.clone(),
            filter: std::sync::Arc::new(Filter::compile(&self.filter)?),
        })
    }
}

/// Metric selectors. All lists hold glob patterns (`*`, `?`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    #[serde(default)]
    pub namepass: Vec<String>,
    #[serde(default)]
    pub namedrop: Vec<String>,

    #[serde(default)]
    pub fieldpass: Vec<String>,
    #[serde(default)]
    pub fielddrop: Vec<String>,

    /// tag key -> value globs; at least one must match.
    #[serde(default)]
    pub tagpass: BTreeMap<String, Vec<String>>,
    /// tag key -> value globs; any match rejects.
    #[serde(default)]
    pub tagdrop: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub taginclude: Vec<String>,
    #[serde(default)]
    pub tagexclude: Vec<String>,
}
