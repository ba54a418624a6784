use serde::Deserialize;
use thiserror::Error;

pub const UNEVALUATED: &str = "unevaluated";

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub nodes: Vec<NodeDescriptor>,
    pub edges: Vec<EdgeDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeDescriptor {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeDescriptor(pub String, pub String);

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed graph document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("node {index} has an empty name")]
    EmptyName { index: usize },
    #[error("duplicate node name `{0}`")]
    DuplicateNode(String),
    #[error("edge ({from} -> {to}) references unknown node `{missing}`")]
    DanglingEdge {
        from: String,
        to: String,
        missing: String,
    },
}

/// Parses a graph document. Strict JSON first, then JSON5 for documents
/// written as JS object literals (unquoted keys, single quotes, trailing
/// commas). When both fail the strict error is reported.
pub fn parse_document(input: &str) -> Result<Document, DocumentError> {
    match serde_json::from_str::<Document>(input) {
        Ok(document) => Ok(document),
        Err(json_err) => match json5::from_str::<Document>(input) {
            Ok(document) => Ok(document),
            Err(_) => Err(DocumentError::Malformed(json_err)),
        },
    }
}
