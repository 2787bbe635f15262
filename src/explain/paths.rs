//! Assembly of two-hop paths through shared intermediate nodes.

use crate::concept::ConceptRecord;
use crate::error::{KgexplainError, Result};
use crate::explain::types::{
    ExplainData, GroupedResults, PathRecord, ResolvedEntry, ResolvedIdMap, ResultRecord,
};

/// Display label of an endpoint concept, identical for both sides.
pub fn label_of(concept: &ConceptRecord) -> String {
    concept.label()
}

/// Cross-join left and right records per shared node into path records.
///
/// Also collects every endpoint concept and intermediate node's alternate ids
/// under their canonical identities; later writes to the same key win.
pub fn assemble_paths(grouped: &GroupedResults, shared: &[String]) -> Result<ExplainData> {
    let mut result = Vec::new();
    let mut resolved_ids = ResolvedIdMap::new();

    for node_id in shared {
        let (Some(left), Some(right)) = (grouped.left.get(node_id), grouped.right.get(node_id)) else {
            return Err(KgexplainError::ContractViolation(format!(
                "shared node {} is not reached from both directions",
                node_id
            )));
        };
        for left_res in left {
            let input = &left_res.provenance()?.obj;
            for right_res in right {
                let output = &right_res.provenance()?.obj;
                result.push(path_record(left_res, input, right_res, output));

                resolved_ids.insert(input.primary_value(), ResolvedEntry::Concept(Box::new(input.clone())));
                resolved_ids.insert(output.primary_value(), ResolvedEntry::Concept(Box::new(output.clone())));
                let node = left_res.resolved();
                resolved_ids.insert(node.id.identifier.clone(), ResolvedEntry::DbIds(node.db_ids.clone()));
            }
        }
    }

    Ok(ExplainData { result, resolved_ids })
}

fn path_record(
    left_res: &ResultRecord,
    input: &ConceptRecord,
    right_res: &ResultRecord,
    output: &ConceptRecord,
) -> PathRecord {
    let node = left_res.resolved();
    PathRecord {
        input_id: input.primary_value(),
        input_label: label_of(input),
        pred1: left_res.association.predicate.clone(),
        pred1_api: left_res.association.api_name.clone(),
        pred1_publications: left_res.publications.clone(),
        node1_id: node.id.identifier.clone(),
        node1_label: node.id.label.clone(),
        node1_type: left_res.association.output_type.clone(),
        pred2: right_res.association.predicate.clone(),
        pred2_api: right_res.association.api_name.clone(),
        pred2_publications: right_res.publications.clone(),
        output_id: output.primary_value(),
        output_label: label_of(output),
    }
}
