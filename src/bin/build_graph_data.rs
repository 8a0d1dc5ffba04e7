//! Builds `graphData.json` from a directory of playlist dump files.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use artist_network::cooccurrence::{
	CoOccurrence, DEFAULT_MIN_WEIGHT, DEFAULT_PLAYLIST_LIMIT, PlaylistFile,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Build a weighted artist co-occurrence graph from playlist dumps")]
struct Args {
	/// Directory containing `*.json` playlist dump files.
	#[arg(short, long)]
	input: PathBuf,

	/// Where to write the graph JSON.
	#[arg(short, long, default_value = "graphData.json")]
	output: PathBuf,

	/// Maximum number of playlists to read.
	#[arg(long, default_value_t = DEFAULT_PLAYLIST_LIMIT)]
	limit: usize,

	/// Minimum co-occurrence count for an edge.
	#[arg(long, default_value_t = DEFAULT_MIN_WEIGHT)]
	min_weight: u64,
}

fn main() -> Result<()> {
	let args = Args::parse();

	let mut files: Vec<PathBuf> = fs::read_dir(&args.input)
		.with_context(|| format!("reading {}", args.input.display()))?
		.filter_map(|entry| entry.ok().map(|e| e.path()))
		.filter(|path| path.extension().is_some_and(|ext| ext == "json"))
		.collect();
	files.sort();

	let mut counts = CoOccurrence::new();
	for path in files {
		if counts.playlists() >= args.limit {
			break;
		}
		let text =
			fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
		let file: PlaylistFile = serde_json::from_str(&text)
			.with_context(|| format!("parsing {}", path.display()))?;
		counts.add_playlists(&file.playlists, args.limit);
	}
	println!("Selected {} playlists.", counts.playlists());

	if let Some((a, b, weight)) = counts.strongest() {
		println!("Strongest pair: {a} - {b} ({weight})");
	}

	let data = counts.into_graph(args.min_weight);
	let json = serde_json::to_string_pretty(&data)?;
	fs::write(&args.output, json)
		.with_context(|| format!("writing {}", args.output.display()))?;
	println!(
		"Wrote {} nodes and {} edges to {}",
		data.nodes.len(),
		data.edges.len(),
		args.output.display()
	);
	Ok(())
}
