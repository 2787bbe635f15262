//! Concepts, relation templates and recorded results shared by the unit tests.

use std::collections::BTreeMap;

use serde_json::json;

use crate::concept::ConceptRecord;
use crate::explain::types::{
    AnnotatedTemplate, DbIds, Direction, NodeIdentity, OutputIdMapping, Provenance, ResolvedNode, ResultRecord,
};
use crate::metakg::{Association, MetaKg, RelationTemplate};

pub fn imatinib() -> ConceptRecord {
    serde_json::from_value(json!({
        "DRUGBANK": "DB00619",
        "CHEBI": "CHEBI:45783",
        "UMLS": "C0935989",
        "MESH": "D000068877",
        "name": "imatinib",
        "primary": {"identifier": "CHEBI", "cls": "ChemicalSubstance", "value": "CHEBI:45783"},
        "display": "CHEBI(CHEBI:45783) DRUGBANK(DB00619) name(imatinib)",
        "type": "ChemicalSubstance"
    }))
    .unwrap()
}

pub fn riluzole() -> ConceptRecord {
    serde_json::from_value(json!({
        "CHEBI": "CHEBI:8863",
        "name": "Riluzole",
        "primary": {"identifier": "CHEBI", "cls": "ChemicalSubstance", "value": "CHEBI:8863"},
        "display": "CHEBI(CHEBI:8863) name(Riluzole)",
        "type": "ChemicalSubstance"
    }))
    .unwrap()
}

pub fn dasatinib() -> ConceptRecord {
    serde_json::from_value(json!({
        "CHEMBL.COMPOUND": "CHEMBL1421",
        "DRUGBANK": "DB01254",
        "PUBCHEM": 3062316,
        "CHEBI": "CHEBI:49375",
        "UMLS": "C1455147",
        "MESH": "D000069439",
        "UNII": "RBZ1571X5H",
        "name": "DASATINIB",
        "primary": {"identifier": "CHEBI", "cls": "ChemicalSubstance", "value": "CHEBI:49375"},
        "type": "ChemicalSubstance"
    }))
    .unwrap()
}

pub fn cml() -> ConceptRecord {
    serde_json::from_value(json!({
        "MONDO": "MONDO:0011996",
        "DOID": "DOID:8552",
        "UMLS": "C0023473",
        "name": "chronic myelogenous leukemia, BCR-ABL1 positive",
        "OMIM": "608232",
        "ORPHANET": "521",
        "primary": {"identifier": "MONDO", "cls": "Disease", "value": "MONDO:0011996"},
        "type": "Disease"
    }))
    .unwrap()
}

fn association(input_id: &str, input_type: &str, output_type: &str, predicate: &str, api: &str) -> Association {
    Association {
        input_id: input_id.to_string(),
        input_type: input_type.to_string(),
        output_id: "NCBIGene".to_string(),
        output_type: output_type.to_string(),
        predicate: predicate.to_string(),
        api_name: api.to_string(),
        source: None,
    }
}

const MYCHEM: (&str, &str, &str) = ("CHEBI", "targets", "MyChem.info API");
const DGIDB: (&str, &str, &str) = ("DRUGBANK", "physically_interacts_with", "DGIdb API");
const BIOLINK: (&str, &str, &str) = ("MONDO", "related_to", "BioLink API");
const SEMMED: (&str, &str, &str) = ("UMLS", "related_to", "SEMMED Disease API");

pub fn meta_kg() -> MetaKg {
    let chem = |(id, pred, api): (&str, &str, &str)| {
        RelationTemplate::new(association(id, "ChemicalSubstance", "Gene", pred, api))
    };
    let disease = |(id, pred, api): (&str, &str, &str)| {
        RelationTemplate::new(association(id, "Disease", "Gene", pred, api))
    };
    MetaKg::from_templates(
        "biothings",
        vec![
            chem(MYCHEM),
            chem(DGIDB),
            disease(BIOLINK),
            disease(SEMMED),
            RelationTemplate::new(association("CHEBI", "ChemicalSubstance", "Disease", "treats", "MyChem.info API")),
        ],
    )
    .unwrap()
}

pub fn gene_label(node: &str) -> &'static str {
    match node {
        "NCBIGene:25" => "ABL1",
        "NCBIGene:613" => "BCR",
        "NCBIGene:5156" => "PDGFRA",
        "NCBIGene:6714" => "SRC",
        "NCBIGene:2902" => "GRIN1",
        _ => "",
    }
}

fn resolved(node: &str) -> OutputIdMapping {
    let mut db_ids: DbIds = BTreeMap::new();
    let local = node.split(':').nth(1).unwrap_or(node);
    db_ids.insert("NCBIGene".to_string(), vec![local.into()]);
    db_ids.insert("SYMBOL".to_string(), vec![gene_label(node).into()]);
    OutputIdMapping {
        resolved: ResolvedNode {
            id: NodeIdentity {
                identifier: node.to_string(),
                label: gene_label(node).to_string(),
            },
            db_ids,
        },
    }
}

fn provenance_map(key: &str, direction: Direction, concept: &ConceptRecord) -> BTreeMap<String, Provenance> {
    let mut map = BTreeMap::new();
    map.insert(
        key.to_string(),
        Provenance {
            source: direction,
            obj: concept.clone(),
        },
    );
    map
}

/// A result record reaching `node` from `concept` via the bound value `key`.
pub fn record(direction: Direction, concept: &ConceptRecord, key: &str, node: &str, predicate: &str) -> ResultRecord {
    ResultRecord {
        input: key.to_string(),
        original_input: provenance_map(key, direction, concept),
        output: node.to_string(),
        association: association("X", &concept.semantic_type, "Gene", predicate, "Test API"),
        output_id_mapping: resolved(node),
        publications: Some(vec!["PMID:1".to_string()]),
    }
}

fn recorded(
    concept: &ConceptRecord,
    key: &str,
    (input_id, predicate, api): (&str, &str, &str),
    node: &str,
) -> ResultRecord {
    ResultRecord {
        input: key.to_string(),
        original_input: provenance_map(key, Direction::Left, concept),
        output: node.to_string(),
        association: association(input_id, &concept.semantic_type, "Gene", predicate, api),
        output_id_mapping: resolved(node),
        publications: None,
    }
}

/// What the execution engine returned for the fixture concepts.
pub fn recorded_results() -> Vec<ResultRecord> {
    let (ima, das, ril, dis) = (imatinib(), dasatinib(), riluzole(), cml());
    vec![
        recorded(&ima, "CHEBI:45783", MYCHEM, "NCBIGene:25"),
        recorded(&ima, "CHEBI:45783", MYCHEM, "NCBIGene:5156"),
        recorded(&ima, "DRUGBANK:DB00619", DGIDB, "NCBIGene:25"),
        recorded(&das, "CHEBI:49375", MYCHEM, "NCBIGene:25"),
        recorded(&das, "CHEBI:49375", MYCHEM, "NCBIGene:6714"),
        recorded(&ril, "CHEBI:8863", MYCHEM, "NCBIGene:2902"),
        recorded(&dis, "MONDO:0011996", BIOLINK, "NCBIGene:25"),
        recorded(&dis, "MONDO:0011996", BIOLINK, "NCBIGene:613"),
        recorded(&dis, "UMLS:C0023473", SEMMED, "NCBIGene:613"),
    ]
}

/// The MyChem `targets` template bound to imatinib's CHEBI id, left side.
pub fn annotated_imatinib() -> AnnotatedTemplate {
    let (input_id, predicate, api) = MYCHEM;
    let concept = imatinib();
    AnnotatedTemplate {
        template: RelationTemplate::new(association(input_id, "ChemicalSubstance", "Gene", predicate, api)),
        input: vec!["CHEBI:45783".into()],
        original_input: provenance_map("CHEBI:45783", Direction::Left, &concept),
    }
}
