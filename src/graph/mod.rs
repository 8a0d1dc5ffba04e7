//! Graph data model and the filter/statistics pipeline.
//!
//! Raw JSON records ([`GraphData`]) are filtered by edge weight and
//! connectivity, then built into a [`Graph`]: a [`NodeRegistry`] keyed by node
//! id plus a list of [`Edge`]s that reference their endpoints by id. Derived
//! per-node statistics live in [`GraphStats`].

pub mod config;
pub mod edge;
pub mod element;
pub mod error;
pub mod node;
pub mod pipeline;
pub mod registry;
pub mod stats;
pub mod types;

pub use config::FilterConfig;
pub use edge::Edge;
pub use element::{Element, ElementKind, GraphElement};
pub use error::GraphError;
pub use node::{Node, Position};
pub use pipeline::{build_graph, filter_graph, parse_graph};
pub use registry::{Graph, NodeRegistry};
pub use stats::{GraphStats, StrongestConnection, TooltipContent};
pub use types::{GraphData, GraphLink, GraphNode};
