use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::Executor;
use crate::error::{KgexplainError, Result};
use crate::explain::{AnnotatedTemplate, ResultRecord};

/// Request body sent to the execution service
#[derive(Serialize)]
struct ExecuteRequest<'a> {
    edges: &'a [AnnotatedTemplate],
}

/// Response body from the execution service. A body without `result` is an error.
#[derive(Deserialize)]
struct ExecuteResponse {
    result: Vec<ResultRecord>,
}

/// Client for a remote batch execution service
///
/// Posts the whole batch in one request. Failures are reported as
/// `KgexplainError::Execution` and are not retried here.
pub struct HttpExecutor {
    client: Client,
    endpoint: Url,
}

impl HttpExecutor {
    /// Create a new executor
    ///
    /// # Arguments
    ///
    /// * `endpoint` - URL accepting `POST {"edges": [...]}`
    /// * `timeout` - Whole-request timeout
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| KgexplainError::Config(format!("Invalid execution endpoint {}: {}", endpoint, e)))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Executor for HttpExecutor {
    async fn execute(&self, batch: Vec<AnnotatedTemplate>) -> Result<Vec<ResultRecord>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let start = std::time::Instant::now();
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ExecuteRequest { edges: &batch })
            .send()
            .await
            .map_err(|e| KgexplainError::Execution(format!("Network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(KgexplainError::Execution(format!(
                "Execution service error {}: {}",
                status, body
            )));
        }

        let parsed: ExecuteResponse = response
            .json()
            .await
            .map_err(|e| KgexplainError::Execution(format!("Failed to parse response: {}", e)))?;

        log::debug!(
            "Executed {} edges in {:?}, {} records",
            batch.len(),
            start.elapsed(),
            parsed.result.len()
        );
        Ok(parsed.result)
    }
}
