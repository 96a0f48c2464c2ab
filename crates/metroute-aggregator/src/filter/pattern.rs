//! Glob compilation and matching for filter selectors.
//!
//! Patterns follow `glob::Pattern` syntax: `*`, `?`, and `[...]` classes.

use metroute_core::error::{MetrouteError, Result};

/// Compiled glob pattern.
#[derive(Debug, Clone)]
pub struct Glob {
    pattern: glob::Pattern,
}

impl Glob {
    pub fn new(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(MetrouteError::Config("empty glob pattern".into()));
        }
        let pattern = glob::Pattern::new(raw)
            .map_err(|e| MetrouteError::Config(format!("invalid glob pattern {raw}: {e}")))?;
        Ok(Self { pattern })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn is_match(&self, s: &str) -> bool {
        self.pattern.matches(s)
    }
}

pub fn compile_globs(raw: &[String]) -> Result<Vec<Glob>> {
    raw.iter().map(|s| Glob::new(s)).collect()
}

pub fn any_match(globs: &[Glob], s: &str) -> bool {
    globs.iter().any(|g| g.is_match(s))
}
