use std::collections::BTreeMap;

use metroute_core::error::Result;
use metroute_core::{Fields, Tags};

use crate::config::schema::FilterConfig;

use super::pattern::{any_match, compile_globs, Glob};
use super::MetricFilter;

/// Compiled tag selector: tag key -> value globs.
#[derive(Debug, Clone)]
struct TagRule {
    key: String,
    values: Vec<Glob>,
}

impl TagRule {
    fn matches(&self, tags: &Tags) -> bool {
        tags.get(&self.key).is_some_and(|v| any_match(&self.values, v))
    }
}

/// Config-driven filter.
/// Compile once at startup, then share via Arc.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    namepass: Vec<Glob>,
    namedrop: Vec<Glob>,
    fieldpass: Vec<Glob>,
    fielddrop: Vec<Glob>,
    tagpass: Vec<TagRule>,
    tagdrop: Vec<TagRule>,
    taginclude: Vec<Glob>,
    tagexclude: Vec<Glob>,
}

impl Filter {
    pub fn compile(cfg: &FilterConfig) -> Result<Self> {
        Ok(Self {
            namepass: compile_globs(&cfg.namepass)?,
            namedrop: compile_globs(&cfg.namedrop)?,
            fieldpass: compile_globs(&cfg.fieldpass)?,
            fielddrop: compile_globs(&cfg.fielddrop)?,
            tagpass: compile_tag_rules(&cfg.tagpass)?,
            tagdrop: compile_tag_rules(&cfg.tagdrop)?,
            taginclude: compile_globs(&cfg.taginclude)?,
            tagexclude: compile_globs(&cfg.tagexclude)?,
        })
    }

    fn should_name_pass(&self, name: &str) -> bool {
        if !self.namepass.is_empty() && !any_match(&self.namepass, name) {
            return false;
        }
        !any_match(&self.namedrop, name)
    }

    fn should_tags_pass(&self, tags: &Tags) -> bool {
        if !self.tagpass.is_empty() && !self.tagpass.iter().any(|r| r.matches(tags)) {
            return false;
        }
        !self.tagdrop.iter().any(|r| r.matches(tags))
    }

    fn field_selected(&self, key: &str) -> bool {
        if !self.fieldpass.is_empty() && !any_match(&self.fieldpass, key) {
            return false;
        }
        !any_match(&self.fielddrop, key)
    }

    fn tag_selected(&self, key: &str) -> bool {
        if !self.taginclude.is_empty() && !any_match(&self.taginclude, key) {
            return false;
        }
        !any_match(&self.tagexclude, key)
    }
}

impl MetricFilter for Filter {
    fn is_active(&self) -> bool {
        !(self.namepass.is_empty()
            && self.namedrop.is_empty()
            && self.fieldpass.is_empty()
            && self.fielddrop.is_empty()
            && self.tagpass.is_empty()
            && self.tagdrop.is_empty()
            && self.taginclude.is_empty()
            && self.tagexclude.is_empty())
    }

    fn apply(&self, name: &str, fields: &mut Fields, tags: &mut Tags) -> bool {
        if !self.should_name_pass(name) {
            return false;
        }
        if !self.should_tags_pass(tags) {
            return false;
        }

        fields.retain(|k, _| self.field_selected(k));
        if fields.is_empty() {
            return false;
        }

        tags.retain(|k, _| self.tag_selected(k));
        true
    }
}

fn compile_tag_rules(raw: &BTreeMap<String, Vec<String>>) -> Result<Vec<TagRule>> {
    let mut out = Vec::with_capacity(raw.len());
    for (key, values) in raw {
        out.push(TagRule {
            key: key.clone(),
            values: compile_globs(values)?,
        });
    }
    Ok(out)
}
