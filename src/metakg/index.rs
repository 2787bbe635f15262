//! In-memory relation-template index loaded once at startup.

use std::path::Path;

use super::{FilterCriteria, MetaKgIndex, RelationTemplate};
use crate::error::{KgexplainError, Result};

/// Relation templates from one data source, e.g. `biothings`.
#[derive(Debug, Clone, Default)]
pub struct MetaKg {
    source: String,
    templates: Vec<RelationTemplate>,
}

impl MetaKg {
    pub fn from_templates(source: &str, templates: Vec<RelationTemplate>) -> Result<Self> {
        for (i, t) in templates.iter().enumerate() {
            if t.association.input_id.trim().is_empty() {
                return Err(KgexplainError::MetaKg(format!(
                    "template {} ({}) has an empty input_id",
                    i, t.association.api_name
                )));
            }
        }
        Ok(Self {
            source: source.to_string(),
            templates,
        })
    }

    /// Load a JSON array of relation templates.
    pub fn load<P: AsRef<Path>>(source: &str, path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let templates: Vec<RelationTemplate> = serde_json::from_str(&content).map_err(|e| {
            KgexplainError::MetaKg(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        let kg = Self::from_templates(source, templates)?;
        log::info!(
            "Loaded {} relation templates from {} ({})",
            kg.len(),
            path.display(),
            kg.source
        );
        Ok(kg)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl MetaKgIndex for MetaKg {
    fn filter(&self, criteria: &FilterCriteria) -> Vec<RelationTemplate> {
        self.templates
            .iter()
            .filter(|t| criteria.matches(&t.association))
            .cloned()
            .collect()
    }
}
