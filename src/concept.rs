//! Concept records: resolved biomedical entities with namespace-keyed identifiers.
//!
//! A concept arrives already normalized by an identifier-resolution service. It
//! carries one value per identifier namespace (`CHEBI`, `UMLS`, `MESH`, ...) and a
//! canonical `primary` identity. Concepts are read-only for the lifetime of a query.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KgexplainError, Result};

/// A single identifier value. Most namespaces use strings; a few (e.g. `PUBCHEM`)
/// are numeric in upstream resolvers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for IdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdValue::Text(s) => f.write_str(s),
            IdValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for IdValue {
    fn from(s: &str) -> Self {
        IdValue::Text(s.to_string())
    }
}

impl From<String> for IdValue {
    fn from(s: String) -> Self {
        IdValue::Text(s)
    }
}

impl From<u64> for IdValue {
    fn from(n: u64) -> Self {
        IdValue::Number(n.into())
    }
}

/// Canonical identity of a concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryId {
    /// Namespace holding the canonical value, e.g. `CHEBI`.
    pub identifier: String,
    /// Semantic type, e.g. `ChemicalSubstance`.
    pub cls: String,
    pub value: IdValue,
}

/// An input or output concept of an explain query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptRecord {
    pub primary: PrimaryId,
    /// Semantic type used to look up relation templates.
    #[serde(rename = "type")]
    pub semantic_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Identifier values keyed by namespace.
    #[serde(flatten)]
    pub ids: BTreeMap<String, IdValue>,
}

impl ConceptRecord {
    /// Build a concept whose primary identity is also its only identifier.
    pub fn new(namespace: &str, semantic_type: &str, value: impl Into<IdValue>) -> Self {
        let value = value.into();
        let mut ids = BTreeMap::new();
        ids.insert(namespace.to_string(), value.clone());
        Self {
            primary: PrimaryId {
                identifier: namespace.to_string(),
                cls: semantic_type.to_string(),
                value,
            },
            semantic_type: semantic_type.to_string(),
            name: None,
            symbol: None,
            display: None,
            ids,
        }
    }

    pub fn with_id(mut self, namespace: &str, value: impl Into<IdValue>) -> Self {
        self.ids.insert(namespace.to_string(), value.into());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }

    /// Value bound under `namespace`, if the concept has one.
    pub fn get(&self, namespace: &str) -> Option<&IdValue> {
        self.ids.get(namespace)
    }

    pub fn has(&self, namespace: &str) -> bool {
        self.ids.contains_key(namespace)
    }

    /// Canonical identity as a string key.
    pub fn primary_value(&self) -> String {
        self.primary.value.to_string()
    }

    /// Human-readable label: symbol, else name, else the canonical value.
    pub fn label(&self) -> String {
        self.symbol
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| self.primary_value())
    }

    /// Check that `primary.value` is present under `primary.identifier`.
    pub fn validate(&self) -> Result<()> {
        match self.get(&self.primary.identifier) {
            Some(v) if *v == self.primary.value => Ok(()),
            Some(v) => Err(KgexplainError::InvalidInput(format!(
                "concept {}: primary value does not match {} value {}",
                self.primary.value, self.primary.identifier, v
            ))),
            None => Err(KgexplainError::InvalidInput(format!(
                "concept {}: no value under primary namespace {}",
                self.primary.value, self.primary.identifier
            ))),
        }
    }
}
