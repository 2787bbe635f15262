//! Batch execution of annotated templates.
//!
//! The engine behind this seam makes the actual API calls (batching, retries and
//! rate limiting are its concern) and returns one result record per reached node.

pub mod http;
pub mod replay;

pub use http::HttpExecutor;
pub use replay::ReplayExecutor;

use async_trait::async_trait;

use crate::error::Result;
use crate::explain::{AnnotatedTemplate, ResultRecord};

/// Executes one merged batch of annotated templates.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, batch: Vec<AnnotatedTemplate>) -> Result<Vec<ResultRecord>>;
}
