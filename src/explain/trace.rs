//! Per-query trace: the ordered log returned to the caller and the stage the
//! query pipeline is in.

use std::fmt;

use uuid::Uuid;

/// Stages of an explain query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStage {
    Idle,
    FindingEdges,
    Binding,
    Executing,
    Grouping,
    Assembling,
    Done,
    NoResult,
}

impl fmt::Display for QueryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryStage::Idle => "idle",
            QueryStage::FindingEdges => "finding-edges",
            QueryStage::Binding => "binding",
            QueryStage::Executing => "executing",
            QueryStage::Grouping => "grouping",
            QueryStage::Assembling => "assembling",
            QueryStage::Done => "done",
            QueryStage::NoResult => "no-result",
        };
        f.write_str(name)
    }
}

/// Log lines of one query. Every line is mirrored to the `log` facade.
#[derive(Debug)]
pub struct QueryTrace {
    id: Uuid,
    stage: QueryStage,
    lines: Vec<String>,
}

impl Default for QueryTrace {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryTrace {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            stage: QueryStage::Idle,
            lines: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn stage(&self) -> QueryStage {
        self.stage
    }

    pub fn enter(&mut self, stage: QueryStage) {
        log::debug!("[{}] {} -> {}", self.id, self.stage, stage);
        self.stage = stage;
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::info!("[{}] {}", self.id, line);
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_keeps_order() {
        let mut trace = QueryTrace::new();
        trace.push("first");
        trace.push(format!("second {}", 2));
        assert_eq!(trace.lines(), &["first".to_string(), "second 2".to_string()]);
        assert_eq!(trace.into_lines().len(), 2);
    }

    #[test]
    fn test_trace_stage_transitions() {
        let mut trace = QueryTrace::new();
        assert_eq!(trace.stage(), QueryStage::Idle);
        trace.enter(QueryStage::FindingEdges);
        trace.enter(QueryStage::NoResult);
        assert_eq!(trace.stage(), QueryStage::NoResult);
        assert_eq!(QueryStage::FindingEdges.to_string(), "finding-edges");
    }

    #[test]
    fn test_traces_are_independent() {
        let a = QueryTrace::new();
        let b = QueryTrace::new();
        assert_ne!(a.id(), b.id());
    }
}
