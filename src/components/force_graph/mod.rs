//! Force-directed graph visualization component.
//!
//! Renders a weighted graph on an HTML canvas with:
//! - Node color and radius encoding total weight and degree
//! - Edge color, width, opacity and target length encoding edge weight
//! - Physics-based layout via the `force_graph` engine
//! - Pan, zoom, and mouse/multi-touch node dragging
//! - A hover tooltip with per-node statistics
//!
//! # Example
//!
//! ```ignore
//! let graph = build_graph(&data, &FilterConfig::default())?;
//! let stats = GraphStats::compute(&graph);
//! let encodings = Encodings::new(&graph, &stats, &EncodingConfig::default());
//! let prepared = PreparedGraph { graph, stats, encodings };
//!
//! view! { <ForceGraphCanvas prepared=prepared config=SimulationConfig::default() /> }
//! ```

mod component;
pub mod drag;
pub mod encoding;
mod render;
pub mod scale;
pub mod state;
pub mod theme;

pub use component::{ForceGraphCanvas, PreparedGraph};
pub use encoding::{EdgeVisual, EncodingConfig, Encodings};
pub use state::SimulationConfig;
pub use theme::Theme;
