//! RemoteClient — network client for a running graph server
//!
//! Renders each logical operation to one Cypher statement and posts it to
//! the server's HTTP API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::collections::HashMap;
use tracing::debug;

use protsim::config::GraphConfig;
use protsim::graph::PropertyValue;

use crate::client::GraphClient;
use crate::cypher::{render_neighbors, render_write, APPLIED};
use crate::error::{SdkError, SdkResult};
use crate::models::{Neighbor, NeighborQuery, QueryResult, ServerStatus, WriteTx};

/// Network client that connects to a running graph server.
///
/// Uses HTTP transport for `/api/query` and `/api/status` endpoints.
pub struct RemoteClient {
    http_base_url: String,
    http_client: Client,
    credentials: Option<(String, String)>,
}

impl RemoteClient {
    /// Create a new RemoteClient connecting to the given HTTP base URL.
    ///
    /// # Example
    /// ```no_run
    /// # use protsim_sdk::RemoteClient;
    /// let client = RemoteClient::new("http://localhost:8080");
    /// ```
    pub fn new(http_base_url: &str) -> Self {
        Self {
            http_base_url: http_base_url.trim_end_matches('/').to_string(),
            http_client: Client::new(),
            credentials: None,
        }
    }

    /// Send HTTP basic auth with every request. An empty user disables it.
    pub fn with_credentials(mut self, user: &str, password: &str) -> Self {
        self.credentials = if user.is_empty() {
            None
        } else {
            Some((user.to_string(), password.to_string()))
        };
        self
    }

    pub fn from_config(config: &GraphConfig) -> Self {
        Self::new(&config.uri).with_credentials(&config.user, &config.password)
    }

    pub fn base_url(&self) -> &str {
        &self.http_base_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some((user, password)) => request.basic_auth(user, Some(password)),
            None => request,
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> SdkError {
        if err.is_connect() || err.is_timeout() {
            SdkError::Connection(format!("{}: {}", self.http_base_url, err))
        } else {
            SdkError::Http(err)
        }
    }

    /// Execute a POST request to /api/query
    async fn post_query(&self, cypher: &str) -> SdkResult<QueryResult> {
        let url = format!("{}/api/query", self.http_base_url);
        let body = serde_json::json!({ "query": cypher });
        debug!(%cypher, "posting query");

        let response = self
            .authorize(self.http_client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            let result: QueryResult = response.json().await?;
            return Ok(result);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SdkError::Connection(format!(
                "{} rejected credentials ({})",
                self.http_base_url, status
            )));
        }

        let error_body: serde_json::Value = response
            .json()
            .await
            .unwrap_or_else(|_| serde_json::json!({"error": "Unknown error"}));
        let msg = error_body
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown error")
            .to_string();
        Err(SdkError::Query(msg))
    }
}

fn applied_count(result: &QueryResult) -> i64 {
    let column = result.column(APPLIED).unwrap_or(0);
    result
        .records
        .first()
        .and_then(|row| row.get(column))
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .unwrap_or(0)
}

fn parse_neighbors(result: &QueryResult, query: &NeighborQuery) -> SdkResult<Vec<Neighbor>> {
    let missing = |column: &str| SdkError::Query(format!("missing column '{}' in result", column));
    let name_col = result.column("name").ok_or_else(|| missing("name"))?;
    let rank_col = result.column("rank").ok_or_else(|| missing("rank"))?;

    let mut neighbors = Vec::with_capacity(result.len());
    for row in &result.records {
        let name = row.get(name_col).and_then(|v| v.as_str());
        let rank = row.get(rank_col).and_then(|v| v.as_f64());
        let (Some(name), Some(rank)) = (name, rank) else {
            continue;
        };

        let mut properties = HashMap::new();
        for key in &query.properties {
            let value = result
                .column(key)
                .and_then(|col| row.get(col))
                .map(PropertyValue::from_json)
                .unwrap_or(PropertyValue::Null);
            properties.insert(key.clone(), value);
        }
        neighbors.push(Neighbor {
            name: name.to_string(),
            rank,
            properties,
        });
    }
    Ok(neighbors)
}

#[async_trait]
impl GraphClient for RemoteClient {
    async fn write(&self, tx: &WriteTx) -> SdkResult<()> {
        let result = match self.post_query(&render_write(tx)).await {
            Ok(result) => result,
            Err(SdkError::Query(reason)) => return Err(SdkError::write(tx.describe(), reason)),
            Err(e) => return Err(e),
        };

        if applied_count(&result) == 0 {
            return Err(SdkError::write(tx.describe(), "no matching nodes"));
        }
        Ok(())
    }

    async fn top_neighbors(&self, query: &NeighborQuery) -> SdkResult<Vec<Neighbor>> {
        let result = self.post_query(&render_neighbors(query)).await?;
        parse_neighbors(&result, query)
    }

    async fn status(&self) -> SdkResult<ServerStatus> {
        let url = format!("{}/api/status", self.http_base_url);
        let response = self
            .authorize(self.http_client.get(&url))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if response.status().is_success() {
            let status: ServerStatus = response.json().await?;
            Ok(status)
        } else {
            Err(SdkError::Connection(format!(
                "Status endpoint returned {}",
                response.status()
            )))
        }
    }

    async fn ping(&self) -> SdkResult<String> {
        let status = self.status().await?;
        if status.status == "healthy" {
            Ok("PONG".to_string())
        } else {
            Err(SdkError::Connection(format!(
                "Server unhealthy: {}",
                status.status
            )))
        }
    }
}
