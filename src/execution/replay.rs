//! Offline execution from previously recorded result records.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use super::Executor;
use crate::error::Result;
use crate::explain::{AnnotatedTemplate, Provenance, ResultRecord};

/// Serves recorded result records for the templates of a batch.
///
/// A recorded record answers a template when its `$input` equals the template's
/// provenance key and it came from the same API and predicate. The record's
/// provenance is replaced by the template's, so direction follows the current query.
#[derive(Debug, Clone, Default)]
pub struct ReplayExecutor {
    records: Vec<ResultRecord>,
}

impl ReplayExecutor {
    pub fn from_records(records: Vec<ResultRecord>) -> Self {
        Self { records }
    }

    /// Load a JSON array of result records.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let records: Vec<ResultRecord> = serde_json::from_str(&content)?;
        log::info!(
            "Loaded {} recorded results from {}",
            records.len(),
            path.as_ref().display()
        );
        Ok(Self::from_records(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

type ReplayKey<'a> = (&'a str, &'a str, &'a str);

#[async_trait]
impl Executor for ReplayExecutor {
    async fn execute(&self, batch: Vec<AnnotatedTemplate>) -> Result<Vec<ResultRecord>> {
        let mut bound: HashMap<ReplayKey<'_>, Vec<&Provenance>> = HashMap::new();
        for template in &batch {
            let assoc = template.association();
            for (key, provenance) in &template.original_input {
                bound
                    .entry((key.as_str(), assoc.api_name.as_str(), assoc.predicate.as_str()))
                    .or_default()
                    .push(provenance);
            }
        }

        let mut out = Vec::new();
        for record in &self.records {
            let lookup = (
                record.input.as_str(),
                record.association.api_name.as_str(),
                record.association.predicate.as_str(),
            );
            let Some(matches) = bound.get(&lookup) else {
                continue;
            };
            for provenance in matches {
                let mut replayed = record.clone();
                replayed.original_input.clear();
                replayed
                    .original_input
                    .insert(record.input.clone(), (*provenance).clone());
                out.push(replayed);
            }
        }

        log::debug!(
            "Replayed {} of {} recorded results for {} edges",
            out.len(),
            self.records.len(),
            batch.len()
        );
        Ok(out)
    }
}
