//! GraphQL request and response envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

/// Relay connection: `{ edges: [{ node: T }] }`.
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

/// Decode a response body. Any `errors` entry wins over `data`.
pub fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    let response: GraphqlResponse<T> =
        serde_json::from_str(body).map_err(|e| ClientError::Parse(e.to_string()))?;
    if !response.errors.is_empty() {
        return Err(ClientError::GraphQl(
            response.errors.into_iter().map(|e| e.message).collect(),
        ));
    }
    response
        .data
        .ok_or_else(|| ClientError::Parse("response has neither data nor errors".into()))
}
