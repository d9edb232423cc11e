//! Step graph files
//!
//! Graphs are stored as `{ steps: [...] }` in TOML, YAML or JSON. The format
//! is picked from the file extension.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::{GraphError, Step, StepGraph};

/// Example graph shipped with the binary
pub const BUNDLED_GRAPH: &str = include_str!("../graphs/project-setup.toml");

/// On-disk representation of a step graph
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GraphFile {
    /// Steps in display order
    pub steps: Vec<Step>,
}

/// Supported graph file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Toml,
    Yaml,
    Json,
}

impl GraphFormat {
    /// Pick the format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(GraphFormat::Toml),
            "yaml" | "yml" => Some(GraphFormat::Yaml),
            "json" => Some(GraphFormat::Json),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("unsupported graph file extension: {0}")]
    UnsupportedFormat(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid step graph: {0}")]
    Invalid(#[from] GraphError),
}

/// Parse graph text in the given format
pub fn parse_graph(text: &str, format: GraphFormat) -> Result<StepGraph, LoadError> {
    let file: GraphFile = match format {
        GraphFormat::Toml => toml::from_str(text)?,
        GraphFormat::Yaml => serde_yaml::from_str(text)?,
        GraphFormat::Json => serde_json::from_str(text)?,
    };
    Ok(StepGraph::new(file.steps)?)
}

/// Read and validate a graph file
pub fn load_graph(path: impl AsRef<Path>) -> Result<StepGraph, LoadError> {
    let path = path.as_ref();
    let format = GraphFormat::from_path(path)
        .ok_or_else(|| LoadError::UnsupportedFormat(path.display().to_string()))?;
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let graph = parse_graph(&text, format)?;
    tracing::debug!(path = %path.display(), steps = graph.len(), "graph loaded");
    Ok(graph)
}

/// The bundled project-setup graph
pub fn bundled_graph() -> Result<StepGraph, LoadError> {
    parse_graph(BUNDLED_GRAPH, GraphFormat::Toml)
}

/// Serialize a graph back to a file representation
pub fn to_graph_file(graph: &StepGraph) -> GraphFile {
    GraphFile {
        steps: graph.steps().to_vec(),
    }
}
