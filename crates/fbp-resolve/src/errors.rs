use fbp_graph::GraphError;
use thiserror::Error;

/// Errors that can occur while resolving component dependencies
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Component {0} not available")]
    ComponentNotAvailable(String),

    #[error("Graph source not available for {0}")]
    GraphSourceMissing(String),

    #[error("Missing components: {}", .0.join(", "))]
    MissingComponents(Vec<String>),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
