use crate::error::{GraphError, Result};
use crate::types::{AncestryDocument, GraphDocument};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Serialization format of an input document, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("json") => Ok(DocumentFormat::Json),
            Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
            _ => Err(GraphError::InvalidInput(format!(
                "unsupported document extension: {:?} (expected .json, .yaml or .yml)",
                path
            ))),
        }
    }
}

/// Loads graph and ancestry documents from disk
#[derive(Debug, Clone)]
pub struct DocumentParser {
    path: PathBuf,
    format: DocumentFormat,
}

impl DocumentParser {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let format = DocumentFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a `{ vertices, edges }` graph document
    pub fn load_graph(&self) -> Result<GraphDocument> {
        let document: GraphDocument = self.load()?;
        info!(
            "Loaded graph document with {} vertices and {} edges",
            document.vertices.len(),
            document.edges.len()
        );
        Ok(document)
    }

    /// Parse a `{ pairs }` ancestry document
    pub fn load_ancestry(&self) -> Result<AncestryDocument> {
        let document: AncestryDocument = self.load()?;
        info!("Loaded ancestry document with {} pairs", document.pairs.len());
        Ok(document)
    }

    fn load<T: DeserializeOwned>(&self) -> Result<T> {
        debug!("Reading document from: {:?}", self.path);
        let content = fs::read_to_string(&self.path)?;

        let document = match self.format {
            DocumentFormat::Json => serde_json::from_str(&content)?,
            DocumentFormat::Yaml => serde_yaml::from_str(&content)?,
        };
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_graph_json() {
        let file = write_temp(".json", r#"{"vertices": [1, 2, 3], "edges": [[1, 2], [2, 3]]}"#);
        let parser = DocumentParser::new(file.path()).unwrap();
        let document = parser.load_graph().unwrap();

        assert_eq!(document.vertices, vec![1, 2, 3]);
        assert_eq!(document.edges, vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn test_load_ancestry_yaml() {
        let file = write_temp(".yml", "pairs:\n  - [1, 3]\n  - [2, 3]\n  - [10, 1]\n");
        let parser = DocumentParser::new(file.path()).unwrap();
        let document = parser.load_ancestry().unwrap();

        assert_eq!(document.pairs, vec![(1, 3), (2, 3), (10, 1)]);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = DocumentParser::new("graph.txt").unwrap_err();
        assert!(matches!(err, GraphError::InvalidInput(_)));
    }

    #[test]
    fn test_malformed_document() {
        let file = write_temp(".json", r#"{"edges": "nope"}"#);
        let parser = DocumentParser::new(file.path()).unwrap();
        assert!(matches!(parser.load_graph(), Err(GraphError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let parser = DocumentParser::new("/definitely/not/here.yaml").unwrap();
        assert!(matches!(parser.load_ancestry(), Err(GraphError::Io(_))));
    }
}
