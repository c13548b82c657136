//! JSON graph documents
//!
//! ```json
//! {
//!   "properties": { "id": "Hello", "environment": { "type": "noflo-nodejs" } },
//!   "processes": { "say": { "component": "core/Output" } },
//!   "connections": []
//! }
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

use crate::{Graph, GraphError, GraphProperties, Node};

#[derive(Debug, Deserialize)]
struct JsonGraph {
    #[serde(default)]
    properties: GraphProperties,
    #[serde(default)]
    processes: Map<String, Value>,
}

/// Parse only the `properties` object of a JSON graph
pub fn parse_properties(source: &str, path: &Path) -> Result<GraphProperties, GraphError> {
    Ok(parse_document(source, path)?.properties)
}

/// Parse a JSON graph document
pub fn parse_json(source: &str, path: &Path) -> Result<Graph, GraphError> {
    let document = parse_document(source, path)?;
    let nodes = document
        .processes
        .into_iter()
        .map(|(id, process)| {
            let component = process
                .get("component")
                .and_then(Value::as_str)
                .map(str::to_string);
            Node { id, component }
        })
        .collect();

    Ok(Graph {
        properties: document.properties,
        nodes,
    })
}

fn parse_document(source: &str, path: &Path) -> Result<JsonGraph, GraphError> {
    serde_json::from_str(source).map_err(|source| GraphError::Json {
        path: path.to_path_buf(),
        source,
    })
}
