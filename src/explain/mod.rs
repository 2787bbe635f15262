//! Two-hop connector queries: "what connects A to B".
//!
//! Templates are selected and bound for every input (left) and output (right)
//! concept, executed as one batch, grouped by direction and reached node, and
//! joined on the nodes both sides reach.

pub mod edges;
pub mod grouping;
pub mod paths;
pub mod query;
pub mod trace;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use edges::{
    annotate_edges_with_input_id, find_edges, select_templates, EdgeMap, Edges, PrefixedNamespaces,
    DEFAULT_PREFIXED_NAMESPACES,
};
pub use grouping::{find_intersections, group_result_by_direction_and_output};
pub use paths::{assemble_paths, label_of};
pub use query::Explainer;
pub use trace::{QueryStage, QueryTrace};
pub use types::{
    AnnotatedTemplate, DbIds, Direction, ExplainData, ExplainResponse, GroupedResults, NodeIdentity,
    OutputIdMapping, PathRecord, Provenance, ResolvedEntry, ResolvedIdMap, ResolvedNode, ResultRecord,
};
