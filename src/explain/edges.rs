//! Candidate edge selection and binding of templates to concept identifiers.

use std::collections::{BTreeMap, BTreeSet};

use crate::concept::{ConceptRecord, IdValue};
use crate::error::{KgexplainError, Result};
use crate::explain::types::{AnnotatedTemplate, Direction, Provenance};
use crate::metakg::{FilterCriteria, MetaKgIndex, RelationTemplate};

/// Namespaces whose values already embed their own prefix (`CHEBI:45783`).
pub const DEFAULT_PREFIXED_NAMESPACES: &[&str] =
    &["MONDO", "DOID", "UBERON", "EFO", "HP", "CHEBI", "CL", "MGI", "NCIT"];

/// Candidate templates per concept, keyed by the concept's position.
pub type EdgeMap = BTreeMap<usize, Vec<RelationTemplate>>;

/// Candidate templates for both traversal directions.
#[derive(Debug, Clone, Default)]
pub struct Edges {
    pub left: EdgeMap,
    pub right: EdgeMap,
}

/// Set of self-prefixing namespaces used to build provenance keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixedNamespaces(BTreeSet<String>);

impl Default for PrefixedNamespaces {
    fn default() -> Self {
        DEFAULT_PREFIXED_NAMESPACES.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for PrefixedNamespaces {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl PrefixedNamespaces {
    pub fn contains(&self, namespace: &str) -> bool {
        self.0.contains(namespace)
    }

    /// Key under which a bound value's provenance is recorded.
    pub fn provenance_key(&self, namespace: &str, value: &IdValue) -> String {
        if self.contains(namespace) {
            value.to_string()
        } else {
            format!("{}:{}", namespace, value)
        }
    }
}

/// Query the index once per concept. `None` when `concepts` is empty.
pub fn select_templates(
    index: &dyn MetaKgIndex,
    concepts: &[ConceptRecord],
    intermediate: Option<&[String]>,
) -> Option<EdgeMap> {
    if concepts.is_empty() {
        return None;
    }
    let map = concepts
        .iter()
        .enumerate()
        .map(|(i, concept)| {
            let criteria = FilterCriteria::one_hop(&concept.semantic_type, intermediate);
            (i, index.filter(&criteria))
        })
        .collect();
    Some(map)
}

/// Candidate templates from inputs (left) and outputs (right) to the intermediate types.
pub fn find_edges(
    index: &dyn MetaKgIndex,
    inputs: &[ConceptRecord],
    outputs: &[ConceptRecord],
    intermediate: Option<&[String]>,
) -> Option<Edges> {
    let left = select_templates(index, inputs, intermediate)?;
    let right = select_templates(index, outputs, intermediate)?;
    Some(Edges { left, right })
}

/// Bind each template to the concept's value under the template's `input_id`.
///
/// Templates whose namespace the concept lacks are dropped. Order is preserved.
pub fn annotate_edges_with_input_id(
    templates: Vec<RelationTemplate>,
    concept: &ConceptRecord,
    direction: Direction,
    prefixed: &PrefixedNamespaces,
) -> Result<Vec<AnnotatedTemplate>> {
    let mut annotated = Vec::with_capacity(templates.len());
    for template in templates {
        let namespace = template.association.input_id.clone();
        if namespace.is_empty() {
            return Err(KgexplainError::InvalidInput(format!(
                "relation template from {} has no input_id",
                template.association.api_name
            )));
        }
        let Some(value) = concept.get(&namespace) else {
            continue;
        };
        let key = prefixed.provenance_key(&namespace, value);
        let mut original_input = BTreeMap::new();
        original_input.insert(
            key,
            Provenance {
                source: direction,
                obj: concept.clone(),
            },
        );
        annotated.push(AnnotatedTemplate {
            template,
            input: vec![value.clone()],
            original_input,
        });
    }
    Ok(annotated)
}
