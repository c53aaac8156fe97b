//! Neo4j connection client.

use std::path::Path;

use anyhow::{Context, Result};
use keurex_core::KeurexResult;
use neo4rs::{ConfigBuilder, Graph, Query};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Configuration for connecting to the asset graph.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "keurex_dev".to_string(),
        }
    }
}

impl GraphConfig {
    /// Load connection settings from a JSON settings file.
    pub fn from_settings_file(path: &Path) -> KeurexResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Build a config from environment variables, falling back to defaults.
    ///
    /// Recognizes `KEUREX_GRAPH_URI`, `KEUREX_GRAPH_USER` and
    /// `KEUREX_GRAPH_PASSWORD`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            uri: std::env::var("KEUREX_GRAPH_URI").unwrap_or(defaults.uri),
            user: std::env::var("KEUREX_GRAPH_USER").unwrap_or(defaults.user),
            password: std::env::var("KEUREX_GRAPH_PASSWORD").unwrap_or(defaults.password),
        }
    }
}

/// Client for read-only asset graph queries.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// Note: neo4rs uses a lazy deadpool — `Graph::connect` only creates the
    /// pool object and does NOT establish a real bolt connection yet. We run
    /// a cheap `RETURN 1` ping immediately so that callers get a fast
    /// failure when the database is unreachable instead of hanging silently.
    pub async fn connect(config: &GraphConfig) -> Result<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db("neo4j")
            .max_connections(4)  // Single-shot batch job, keep the pool small
            .fetch_size(2000)
            .build()
            .context("Failed to build graph config")?;

        let graph = Graph::connect(neo4j_config)
            .await
            .context("Failed to create graph connection pool")?;

        // Ping to force an actual TCP+bolt handshake so failures surface here.
        graph.run(Query::new("RETURN 1".to_string())).await
            .context("Graph database is not responding to queries")?;

        Ok(Self { graph })
    }

    /// Execute a Cypher query and return results as rows.
    pub async fn query(&self, query: Query) -> Result<Vec<neo4rs::Row>> {
        let mut result = self.graph.execute(query).await
            .context("Graph query failed")?;

        let mut rows = Vec::new();
        while let Ok(Some(row)) = result.next().await {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a Cypher query and return a single scalar value.
    pub async fn query_scalar<T: DeserializeOwned>(&self, query: Query, field: &str) -> Result<Option<T>> {
        let rows = self.query(query).await?;
        if let Some(row) = rows.into_iter().next() {
            let val: T = row.get(field)
                .map_err(|e| anyhow::anyhow!("Failed to get field '{}': {:?}", field, e))?;
            Ok(Some(val))
        } else {
            Ok(None)
        }
    }

    /// Get node and relationship counts for status display.
    pub async fn get_counts(&self) -> Result<GraphCounts> {
        let node_query = Query::new("MATCH (n) RETURN count(n) as count".to_string());
        let rel_query = Query::new("MATCH ()-[r]->() RETURN count(r) as count".to_string());

        let node_count: i64 = self.query_scalar(node_query, "count").await?
            .unwrap_or(0);
        let rel_count: i64 = self.query_scalar(rel_query, "count").await?
            .unwrap_or(0);

        Ok(GraphCounts {
            nodes: node_count as usize,
            relationships: rel_count as usize,
        })
    }
}

/// Node and relationship counts.
#[derive(Debug, Clone)]
pub struct GraphCounts {
    pub nodes: usize,
    pub relationships: usize,
}
