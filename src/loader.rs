//! Loading configuration and graph data into the page.

use log::info;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlScriptElement, Response};

use crate::components::force_graph::{Encodings, PreparedGraph};
use crate::config::AppConfig;
use crate::graph::{GraphData, GraphError, GraphStats, build_graph, parse_graph};

/// Failure to get a renderable graph onto the page.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The browser fetch itself failed, or its body was unreadable.
	#[error("failed to fetch graph data: {0}")]
	Fetch(String),

	/// The server answered with a non-success HTTP status.
	#[error("graph data request failed with status {0}")]
	Status(u16),

	/// The data arrived but could not be parsed or built.
	#[error(transparent)]
	Graph(#[from] GraphError),
}

fn js_error(value: JsValue) -> LoadError {
	LoadError::Fetch(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// Read the text of a `<script>` element by id.
fn script_text(id: &str) -> Option<String> {
	let document = web_sys::window()?.document()?;
	let script: HtmlScriptElement = document.get_element_by_id(id)?.dyn_into().ok()?;
	script.text().ok()
}

/// Load configuration overrides from a script element with id="graph-config".
/// Falls back to defaults when the element is absent, malformed, or holds
/// values that fail [`AppConfig::validate`].
pub fn load_config() -> AppConfig {
	match script_text("graph-config") {
		Some(json) => AppConfig::from_overrides(&json),
		None => AppConfig::default(),
	}
}

async fn fetch_text(url: &str) -> Result<String, LoadError> {
	let window = web_sys::window().ok_or_else(|| LoadError::Fetch("no window".to_string()))?;
	let request: js_sys::Promise = window.fetch_with_str(url);
	let response: Response = JsFuture::from(request)
		.await
		.map_err(js_error)?
		.dyn_into()
		.map_err(js_error)?;
	if !response.ok() {
		return Err(LoadError::Status(response.status()));
	}
	let body = JsFuture::from(response.text().map_err(js_error)?)
		.await
		.map_err(js_error)?;
	body.as_string()
		.ok_or_else(|| LoadError::Fetch("response body is not text".to_string()))
}

/// Filter the raw graph and derive statistics and encodings.
pub fn prepare(data: &GraphData, config: &AppConfig) -> Result<PreparedGraph, GraphError> {
	let graph = build_graph(data, &config.filter)?;
	let stats = GraphStats::compute(&graph);
	let encodings = Encodings::new(&graph, &stats, &config.encoding);
	Ok(PreparedGraph {
		graph,
		stats,
		encodings,
	})
}

/// Fetch `config.data_url` and prepare it for rendering.
pub async fn load_graph(config: &AppConfig) -> Result<PreparedGraph, LoadError> {
	let json = fetch_text(&config.data_url).await?;
	let data = parse_graph(&json)?;
	info!(
		"artist-network: loaded {} nodes, {} edges",
		data.nodes.len(),
		data.edges.len()
	);
	Ok(prepare(&data, config)?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::Element;

	#[test]
	fn prepare_runs_the_whole_pipeline() {
		let data = GraphData::from_parts(
			["A", "B", "C"],
			[("A", "B", 500.0), ("B", "C", 300.0)],
		);
		let prepared = prepare(&data, &AppConfig::default()).unwrap();
		let ids: Vec<_> = prepared.graph.nodes.iter().map(|n| n.id()).collect();
		assert_eq!(ids, ["A", "B"]);
		assert_eq!(prepared.stats.total_weight("A"), 500.0);
		assert_eq!(prepared.stats.total_weight("B"), 500.0);
	}

	#[test]
	fn prepare_surfaces_graph_errors() {
		let data = GraphData::from_parts(["A"], [("A", "missing", 900.0)]);
		let err = prepare(&data, &AppConfig::default()).unwrap_err();
		assert_eq!(
			LoadError::from(err).to_string(),
			"edge A-missing references unknown node \"missing\""
		);
	}
}
