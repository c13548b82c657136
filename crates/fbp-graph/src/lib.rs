//! FBP graph loading
//!
//! Turns a graph source file into the list of nodes it declares. Two formats are supported:
//! - JSON graph documents (`.json`) with a `properties` object and a `processes` map
//! - the textual FBP notation (`.fbp`), e.g. `'hello' -> IN Say(core/Output)`
//!
//! Only what dependency resolution needs is modelled: graph properties and, for every
//! node, the component it instantiates (if any).

pub mod annotations;
pub mod errors;
pub mod json;
pub mod notation;

pub use errors::GraphError;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Supported graph source formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Json,
    Fbp,
}

impl GraphFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(GraphFormat::Json),
            Some("fbp") => Some(GraphFormat::Fbp),
            _ => None,
        }
    }
}

/// Graph-level properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<Value>,
}

/// Runtime requested by a graph's `environment` property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment<'a> {
    /// No environment given
    Unspecified,
    /// Either `"environment": "noflo-nodejs"` or `"environment": {"type": "noflo-nodejs"}`
    Runtime(&'a str),
    /// Present, but not in a shape that names a runtime
    Unrecognized,
}

impl GraphProperties {
    /// Non-empty `id` property
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Runtime the graph is meant for
    pub fn environment(&self) -> Environment<'_> {
        let Some(environment) = self.environment.as_ref().filter(|v| is_truthy(v)) else {
            return Environment::Unspecified;
        };
        if let Some(kind) = environment.get("type").filter(|v| is_truthy(v)) {
            return match kind.as_str() {
                Some(runtime) => Environment::Runtime(runtime),
                None => Environment::Unrecognized,
            };
        }
        match environment.as_str() {
            Some(runtime) => Environment::Runtime(runtime),
            None => Environment::Unrecognized,
        }
    }

    /// Whether the graph is flagged as a `main` (entry) graph
    pub fn is_main(&self) -> bool {
        self.main.as_ref().is_some_and(is_truthy)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A process (node) in a graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    /// Component instantiated by the node; `None` for placeholder nodes
    pub component: Option<String>,
}

/// A loaded graph definition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    pub properties: GraphProperties,
    pub nodes: Vec<Node>,
}

impl Graph {
    /// Component identifiers referenced by the graph's nodes, in node order
    ///
    /// Nodes without a component are skipped. Duplicates are kept, resolution
    /// deduplicates later.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .filter_map(|node| node.component.as_deref())
            .filter(|component| !component.is_empty())
    }
}

/// Load a graph from disk, picking the parser from the file extension
pub fn load_graph(path: &Path) -> Result<Graph, GraphError> {
    let format =
        GraphFormat::from_path(path).ok_or_else(|| GraphError::UnsupportedFormat(path.into()))?;
    let source = fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = parse_graph(&source, path, format)?;
    debug!("Loaded graph {:?} with {} nodes", path, graph.nodes.len());
    Ok(graph)
}

/// Parse graph source text in the given format
pub fn parse_graph(source: &str, path: &Path, format: GraphFormat) -> Result<Graph, GraphError> {
    match format {
        GraphFormat::Json => json::parse_json(source, path),
        GraphFormat::Fbp => notation::parse_fbp(source, path),
    }
}
