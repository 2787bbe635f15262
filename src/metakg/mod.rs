//! Meta knowledge graph: API-agnostic one-hop relation templates and the index
//! that filters them by semantic type.
//!
//! A template says "an API can take a value in namespace `input_id` of type
//! `input_type` and return `output_type` nodes via `predicate`". It is not bound
//! to any concrete identifier until the binder annotates it.

mod index;

pub use index::MetaKg;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Schema of a one-hop relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Association {
    /// Namespace a source concept must supply a value for.
    pub input_id: String,
    pub input_type: String,
    #[serde(default)]
    pub output_id: String,
    pub output_type: String,
    pub predicate: String,
    pub api_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A candidate one-hop relation returned by the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationTemplate {
    pub association: Association,
    /// Query-operation fields consumed only by the execution engine.
    #[serde(flatten)]
    pub operation: Map<String, Value>,
}

impl RelationTemplate {
    pub fn new(association: Association) -> Self {
        Self {
            association,
            operation: Map::new(),
        }
    }
}

/// Index lookup criteria. `None` matches anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub input_type: Option<String>,
    /// Matches when the template's output type equals any listed type.
    pub output_type: Option<Vec<String>>,
    pub predicate: Option<String>,
    pub api_name: Option<String>,
}

impl FilterCriteria {
    /// Templates leaving `input_type`, optionally restricted to intermediate types.
    /// An empty type list means any output type.
    pub fn one_hop(input_type: &str, output_types: Option<&[String]>) -> Self {
        Self {
            input_type: Some(input_type.to_string()),
            output_type: output_types.filter(|t| !t.is_empty()).map(|t| t.to_vec()),
            ..Self::default()
        }
    }

    pub fn matches(&self, association: &Association) -> bool {
        if let Some(ref t) = self.input_type {
            if *t != association.input_type {
                return false;
            }
        }
        if let Some(ref types) = self.output_type {
            if !types.iter().any(|t| *t == association.output_type) {
                return false;
            }
        }
        if let Some(ref p) = self.predicate {
            if *p != association.predicate {
                return false;
            }
        }
        if let Some(ref a) = self.api_name {
            if *a != association.api_name {
                return false;
            }
        }
        true
    }
}

/// Read-only relation-template index shared by all queries of a service.
pub trait MetaKgIndex: Send + Sync {
    /// Copies of every template satisfying `criteria`.
    fn filter(&self, criteria: &FilterCriteria) -> Vec<RelationTemplate>;
}
