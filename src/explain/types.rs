//! Records flowing through an explain query: annotated templates going out to the
//! execution engine, result records coming back, and the assembled paths.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::concept::{ConceptRecord, IdValue};
use crate::error::{KgexplainError, Result};
use crate::metakg::{Association, RelationTemplate};

/// Traversal direction: `Left` starts from the query inputs, `Right` from the outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

/// Which concept, in which direction, produced a bound value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub source: Direction,
    pub obj: ConceptRecord,
}

/// A relation template bound to one identifier value of one concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedTemplate {
    #[serde(flatten)]
    pub template: RelationTemplate,
    pub input: Vec<IdValue>,
    /// Exactly one entry, keyed by the provenance key of `input[0]`.
    pub original_input: BTreeMap<String, Provenance>,
}

impl AnnotatedTemplate {
    pub fn association(&self) -> &Association {
        &self.template.association
    }

    pub fn provenance_key(&self) -> Option<&str> {
        self.original_input.keys().next().map(String::as_str)
    }

    pub fn provenance(&self) -> Option<&Provenance> {
        self.original_input.values().next()
    }
}

/// Identity of the intermediate node a result record reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeIdentity {
    pub identifier: String,
    #[serde(default)]
    pub label: String,
}

/// Alternate identifiers of a node, keyed by namespace.
pub type DbIds = BTreeMap<String, Vec<IdValue>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedNode {
    pub id: NodeIdentity,
    #[serde(default)]
    pub db_ids: DbIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputIdMapping {
    pub resolved: ResolvedNode,
}

/// One materialized hop returned by the execution engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Provenance key of the bound value that produced this record.
    #[serde(rename = "$input")]
    pub input: String,
    #[serde(rename = "$original_input")]
    pub original_input: BTreeMap<String, Provenance>,
    /// Identifier of the intermediate node reached.
    #[serde(rename = "$output")]
    pub output: String,
    #[serde(rename = "$association")]
    pub association: Association,
    #[serde(rename = "$output_id_mapping")]
    pub output_id_mapping: OutputIdMapping,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publications: Option<Vec<String>>,
}

impl ResultRecord {
    /// Provenance of `$input`. A record whose `$input` is not a key of its own
    /// `$original_input` breaks the binding contract.
    pub fn provenance(&self) -> Result<&Provenance> {
        self.original_input.get(&self.input).ok_or_else(|| {
            KgexplainError::ContractViolation(format!(
                "result record for {} (via {}) has no provenance for input {}",
                self.output, self.association.api_name, self.input
            ))
        })
    }

    pub fn resolved(&self) -> &ResolvedNode {
        &self.output_id_mapping.resolved
    }
}

/// Result records keyed by direction, then by intermediate node id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedResults {
    pub left: BTreeMap<String, Vec<ResultRecord>>,
    pub right: BTreeMap<String, Vec<ResultRecord>>,
}

impl GroupedResults {
    pub fn side(&self, direction: Direction) -> &BTreeMap<String, Vec<ResultRecord>> {
        match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    pub fn side_mut(&mut self, direction: Direction) -> &mut BTreeMap<String, Vec<ResultRecord>> {
        match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}

/// A two-hop path: input --pred1--> node1 <--pred2-- output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    pub input_id: String,
    pub input_label: String,
    pub pred1: String,
    pub pred1_api: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pred1_publications: Option<Vec<String>>,
    pub node1_id: String,
    pub node1_label: String,
    pub node1_type: String,
    pub pred2: String,
    pub pred2_api: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pred2_publications: Option<Vec<String>>,
    pub output_id: String,
    pub output_label: String,
}

/// What a canonical identity resolves to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResolvedEntry {
    /// An input or output concept.
    Concept(Box<ConceptRecord>),
    /// Alternate identifiers of an intermediate node.
    DbIds(DbIds),
}

pub type ResolvedIdMap = BTreeMap<String, ResolvedEntry>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplainData {
    pub result: Vec<PathRecord>,
    pub resolved_ids: ResolvedIdMap,
}

/// Response of a completed explain query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub data: ExplainData,
    pub log: Vec<String>,
}
