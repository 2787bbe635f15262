//! The explain query pipeline.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::concept::ConceptRecord;
use crate::config::Config;
use crate::error::{KgexplainError, Result};
use crate::execution::{Executor, HttpExecutor, ReplayExecutor};
use crate::explain::edges::{self, EdgeMap, Edges, PrefixedNamespaces};
use crate::explain::grouping::{find_intersections, group_result_by_direction_and_output};
use crate::explain::paths::assemble_paths;
use crate::explain::trace::{QueryStage, QueryTrace};
use crate::explain::types::{
    AnnotatedTemplate, Direction, ExplainData, ExplainResponse, GroupedResults, ResultRecord,
};
use crate::metakg::{MetaKg, MetaKgIndex, RelationTemplate};

/// Finds intermediate nodes connecting input concepts to output concepts.
///
/// Holds only read-only collaborators; every `query` call builds its own state,
/// so one `Explainer` can serve concurrent queries.
pub struct Explainer {
    meta_kg: Arc<dyn MetaKgIndex>,
    executor: Arc<dyn Executor>,
    prefixed: PrefixedNamespaces,
}

impl Explainer {
    pub fn new(
        meta_kg: Arc<dyn MetaKgIndex>,
        executor: Arc<dyn Executor>,
        prefixed: PrefixedNamespaces,
    ) -> Self {
        Self {
            meta_kg,
            executor,
            prefixed,
        }
    }

    /// Build the index and execution engine named by the configuration.
    ///
    /// A replay file takes precedence over a remote endpoint.
    pub fn from_config(config: &Config) -> Result<Self> {
        let path = config.metakg.path.as_ref().ok_or_else(|| {
            KgexplainError::Config("metakg.path is required to build the relation-template index".to_string())
        })?;
        let meta_kg = MetaKg::load(&config.metakg.source, path)?;

        let executor: Arc<dyn Executor> = if let Some(ref replay) = config.execution.replay_path {
            Arc::new(ReplayExecutor::load(replay)?)
        } else if let Some(ref endpoint) = config.execution.endpoint {
            Arc::new(HttpExecutor::new(
                endpoint,
                Duration::from_secs(config.execution.timeout_secs),
            )?)
        } else {
            return Err(KgexplainError::Config(
                "set execution.endpoint or execution.replay_path".to_string(),
            ));
        };

        Ok(Self::new(Arc::new(meta_kg), executor, config.prefixed_namespaces()))
    }

    /// Candidate templates per input (left) and output (right). `None` if either is empty.
    pub fn find_edges(
        &self,
        inputs: &[ConceptRecord],
        outputs: &[ConceptRecord],
        intermediate: Option<&[String]>,
    ) -> Option<Edges> {
        edges::find_edges(self.meta_kg.as_ref(), inputs, outputs, intermediate)
    }

    pub fn annotate_edges_with_input_id(
        &self,
        templates: Vec<RelationTemplate>,
        concept: &ConceptRecord,
        direction: Direction,
    ) -> Result<Vec<AnnotatedTemplate>> {
        edges::annotate_edges_with_input_id(templates, concept, direction, &self.prefixed)
    }

    pub fn group_result_by_direction_and_output(&self, records: Vec<ResultRecord>) -> Result<GroupedResults> {
        group_result_by_direction_and_output(records)
    }

    pub fn find_intersections(&self, grouped: &GroupedResults) -> Vec<String> {
        find_intersections(grouped)
    }

    pub fn output(&self, grouped: &GroupedResults, shared: &[String]) -> Result<ExplainData> {
        assemble_paths(grouped, shared)
    }

    /// Run a full explain query.
    ///
    /// Returns `Ok(None)` when `inputs` or `outputs` is empty. A query that finds
    /// no edges, binds nothing on one side, or has no shared node returns an empty
    /// result with a log naming where it stopped. Execution failures abort the query.
    pub async fn query(
        &self,
        inputs: &[ConceptRecord],
        outputs: &[ConceptRecord],
        intermediate: Option<&[String]>,
    ) -> Result<Option<ExplainResponse>> {
        if inputs.is_empty() || outputs.is_empty() {
            return Ok(None);
        }
        for concept in inputs.iter().chain(outputs) {
            concept.validate()?;
        }

        let mut trace = QueryTrace::new();
        let target = intermediate
            .filter(|types| !types.is_empty())
            .map(|types| types.join(","))
            .unwrap_or_else(|| "All".to_string());

        trace.enter(QueryStage::FindingEdges);
        let Some(edges) = self.find_edges(inputs, outputs, intermediate) else {
            trace.enter(QueryStage::NoResult);
            return Ok(None);
        };

        trace.enter(QueryStage::Binding);
        trace.push("Start to find bte edges connecting from start nodes to intermediate nodes");
        let left = self.bind_side(edges.left, inputs, Direction::Left, &target, &mut trace)?;
        if left.is_empty() {
            trace.push("No bte edges found connecting from start nodes to intermediate nodes, thus the query ends");
            return Ok(Some(empty_response(trace)));
        }

        trace.push("Start to find bte edges connecting from end nodes to intermediate nodes");
        let right = self.bind_side(edges.right, outputs, Direction::Right, &target, &mut trace)?;
        if right.is_empty() {
            trace.push("No bte edges found connecting from end nodes to intermediate nodes, thus the query ends");
            return Ok(Some(empty_response(trace)));
        }

        trace.enter(QueryStage::Executing);
        let mut batch = left;
        batch.extend(right);
        let batch_len = batch.len();
        let records = self.executor.execute(batch).await?;
        log::debug!(
            "[{}] {} records returned for {} edges",
            trace.id(),
            records.len(),
            batch_len
        );

        trace.enter(QueryStage::Grouping);
        let grouped = group_result_by_direction_and_output(records)?;
        let shared = find_intersections(&grouped);

        trace.enter(QueryStage::Assembling);
        let data = assemble_paths(&grouped, &shared)?;
        trace.push(format!(
            "{} [Query Result]: Found {} unique paths connecting from start nodes to end nodes",
            Utc::now().to_rfc2822(),
            data.result.len()
        ));

        trace.enter(QueryStage::Done);
        Ok(Some(ExplainResponse {
            data,
            log: trace.into_lines(),
        }))
    }

    fn bind_side(
        &self,
        edges: EdgeMap,
        concepts: &[ConceptRecord],
        direction: Direction,
        target: &str,
        trace: &mut QueryTrace,
    ) -> Result<Vec<AnnotatedTemplate>> {
        let mut annotated = Vec::new();
        for (i, templates) in edges {
            let concept = &concepts[i];
            let bound = self.annotate_edges_with_input_id(templates, concept, direction)?;
            trace.push(format!(
                "Find {} bte edges connecting from {} to {} nodes",
                bound.len(),
                concept.primary.value,
                target
            ));
            annotated.extend(bound);
        }
        Ok(annotated)
    }
}

fn empty_response(mut trace: QueryTrace) -> ExplainResponse {
    trace.enter(QueryStage::NoResult);
    ExplainResponse {
        data: ExplainData::default(),
        log: trace.into_lines(),
    }
}
