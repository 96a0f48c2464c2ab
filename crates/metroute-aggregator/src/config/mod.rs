//! Aggregator config loader (strict parsing).

pub mod schema;

use std::fs;

use metroute_core::error::{MetrouteError, Result};

pub use schema::{AggregatorSection, FilterConfig, MetrouteConfig};

pub fn load_from_file(path: &str) -> Result<MetrouteConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetrouteError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<MetrouteConfig> {
    let cfg: MetrouteConfig = serde_yaml::from_str(s)
        .map_err(|e| MetrouteError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
