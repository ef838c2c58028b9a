//! Error types for graph construction, traversal and document loading.

use thiserror::Error;

/// Errors that can occur while building or walking a lineage graph
#[derive(Error, Debug)]
pub enum GraphError {
    /// An edge endpoint, traversal start or lookup referenced an absent vertex
    #[error("vertex not found in graph: {vertex}")]
    MissingVertex { vertex: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GraphError {
    pub fn missing_vertex<V: std::fmt::Debug>(vertex: V) -> Self {
        GraphError::MissingVertex {
            vertex: format!("{:?}", vertex),
        }
    }

    /// True when the error is a precondition failure on an absent vertex
    pub fn is_missing_vertex(&self) -> bool {
        matches!(self, GraphError::MissingVertex { .. })
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
