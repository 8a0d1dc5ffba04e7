//! artist-network: interactive force-directed visualization of weighted graphs.
//!
//! Loads `graphData.json`, keeps edges above a weight threshold and the nodes
//! they connect, derives per-node statistics and visual encodings, and renders
//! the result on a canvas with physics-based layout, pan/zoom, dragging and
//! hover tooltips.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, info, warn};

pub mod components;
pub mod config;
pub mod cooccurrence;
pub mod graph;
pub mod loader;

pub use components::force_graph::{ForceGraphCanvas, PreparedGraph};
pub use config::AppConfig;
pub use graph::{Edge, Element, GraphData, GraphLink, GraphNode, Node};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("artist-network: logging initialized");
}

/// Main application component.
/// Fetches the graph data and renders the force-directed visualization.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = loader::load_config();
	let graph = RwSignal::new(None::<Result<PreparedGraph, String>>);

	let load_config = config.clone();
	spawn_local(async move {
		let result = loader::load_graph(&load_config).await.map_err(|e| {
			warn!("artist-network: {}", e);
			e.to_string()
		});
		graph.set(Some(result));
	});

	let simulation = config.simulation;

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Artist Network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="graph-page">
			{move || match graph.get() {
				None => view! { <p class="status">"Loading graph..."</p> }.into_any(),
				Some(Ok(prepared)) => {
					view! { <ForceGraphCanvas prepared=prepared config=simulation.clone() /> }
						.into_any()
				}
				Some(Err(message)) => view! { <p class="status error">{message}</p> }.into_any(),
			}}
		</div>
	}
}
