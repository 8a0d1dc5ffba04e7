//! Builds a weighted artist graph from playlist dumps.
//!
//! Two artists are connected once for every playlist they both appear in. The
//! resulting [`GraphData`] is what the visualization loads as `graphData.json`.

use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

use crate::graph::{GraphData, GraphLink, GraphNode};

/// Co-occurrence count below which a pair is not emitted.
pub const DEFAULT_MIN_WEIGHT: u64 = 1000;

/// Number of playlists read when no limit is given.
pub const DEFAULT_PLAYLIST_LIMIT: usize = 1_000_000;

/// One playlist dump file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlaylistFile {
	/// Playlists in file order. Other top-level keys are ignored.
	#[serde(default)]
	pub playlists: Vec<Playlist>,
}

/// A playlist; only its tracks matter here.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Playlist {
	/// Tracks in play order.
	#[serde(default)]
	pub tracks: Vec<Track>,
}

/// A track entry.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Track {
	/// Artist name or URI, e.g. `spotify:artist:Drake`.
	pub artist_name: Option<String>,
}

/// Artist key of a track's `artist_name`: the text after the last `:`, so
/// URIs and bare names reduce to the same node.
pub fn artist_key(artist_name: &str) -> &str {
	artist_name.rsplit(':').next().unwrap_or(artist_name)
}

impl Playlist {
	/// Distinct, non-empty artist keys in this playlist, sorted.
	pub fn artists(&self) -> BTreeSet<&str> {
		self.tracks
			.iter()
			.filter_map(|t| t.artist_name.as_deref())
			.map(artist_key)
			.filter(|name| !name.is_empty())
			.collect()
	}
}

/// Pair counts keyed by `(smaller, larger)` artist name.
#[derive(Clone, Debug, Default)]
pub struct CoOccurrence {
	counts: HashMap<(String, String), u64>,
	playlists: usize,
}

impl CoOccurrence {
	/// Empty counts.
	pub fn new() -> Self {
		Self::default()
	}

	/// Count every artist pair in `playlist` once.
	pub fn add_playlist(&mut self, playlist: &Playlist) {
		self.playlists += 1;
		let artists: Vec<&str> = playlist.artists().into_iter().collect();
		for (i, a) in artists.iter().enumerate() {
			for b in &artists[i + 1..] {
				*self
					.counts
					.entry((a.to_string(), b.to_string()))
					.or_insert(0) += 1;
			}
		}
	}

	/// Add playlists until `limit` have been counted in total. Returns how
	/// many were added by this call.
	pub fn add_playlists<'a>(
		&mut self,
		playlists: impl IntoIterator<Item = &'a Playlist>,
		limit: usize,
	) -> usize {
		let remaining = limit.saturating_sub(self.playlists);
		let before = self.playlists;
		for playlist in playlists.into_iter().take(remaining) {
			self.add_playlist(playlist);
		}
		self.playlists - before
	}

	/// Playlists counted so far.
	pub fn playlists(&self) -> usize {
		self.playlists
	}

	/// Number of playlists containing both `a` and `b`, in either order.
	pub fn count(&self, a: &str, b: &str) -> u64 {
		let key = if a <= b { (a, b) } else { (b, a) };
		self.counts
			.get(&(key.0.to_string(), key.1.to_string()))
			.copied()
			.unwrap_or(0)
	}

	/// The most frequent pair, ties broken by name.
	pub fn strongest(&self) -> Option<(&str, &str, u64)> {
		self.counts
			.iter()
			.max_by(|(ka, a), (kb, b)| a.cmp(b).then_with(|| kb.cmp(ka)))
			.map(|((a, b), &w)| (a.as_str(), b.as_str(), w))
	}

	/// Edges with at least `min_weight` co-occurrences, heaviest first, and the
	/// artists they connect, sorted by name.
	pub fn into_graph(self, min_weight: u64) -> GraphData {
		let mut edges: Vec<((String, String), u64)> = self
			.counts
			.into_iter()
			.filter(|&(_, weight)| weight >= min_weight)
			.collect();
		edges.sort_by(|(ka, a), (kb, b)| b.cmp(a).then_with(|| ka.cmp(kb)));

		let artists: BTreeSet<&str> = edges
			.iter()
			.flat_map(|((a, b), _)| [a.as_str(), b.as_str()])
			.collect();
		let nodes = artists
			.into_iter()
			.map(|id| GraphNode { id: id.to_string() })
			.collect();

		let edges = edges
			.into_iter()
			.map(|((source, target), weight)| GraphLink {
				source,
				target,
				weight: weight as f64,
			})
			.collect();

		GraphData { nodes, edges }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn playlist(artists: &[&str]) -> Playlist {
		Playlist {
			tracks: artists
				.iter()
				.map(|a| Track {
					artist_name: Some(a.to_string()),
				})
				.collect(),
		}
	}

	#[test]
	fn counts_each_pair_once_per_playlist() {
		let mut counts = CoOccurrence::new();
		counts.add_playlist(&playlist(&["Drake", "Adele", "Drake"]));
		counts.add_playlist(&playlist(&["Adele", "Drake", "Sia"]));
		assert_eq!(counts.count("Drake", "Adele"), 2);
		assert_eq!(counts.count("Adele", "Sia"), 1);
		assert_eq!(counts.count("Sia", "Nobody"), 0);
		assert_eq!(counts.playlists(), 2);
		assert_eq!(counts.strongest(), Some(("Adele", "Drake", 2)));
	}

	fn build(lists: &[Playlist], limit: usize, min_weight: u64) -> GraphData {
		let mut counts = CoOccurrence::new();
		counts.add_playlists(lists, limit);
		counts.into_graph(min_weight)
	}

	#[test]
	fn threshold_drops_pairs_and_lonely_artists() {
		let lists = [
			playlist(&["A", "B"]),
			playlist(&["A", "B", "C"]),
			playlist(&["B", "A"]),
		];
		let data = build(&lists, DEFAULT_PLAYLIST_LIMIT, 2);
		assert_eq!(data.edges, vec![GraphLink::new("A", "B", 3.0)]);
		let ids: Vec<_> = data.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["A", "B"]);
	}

	#[test]
	fn limit_caps_playlists_read() {
		let lists = [playlist(&["A", "B"]), playlist(&["A", "B"])];
		let data = build(&lists, 1, 1);
		assert_eq!(data.edges[0].weight, 1.0);
	}

	#[test]
	fn limit_spans_several_batches() {
		let lists = [playlist(&["A", "B"]), playlist(&["A", "B"])];
		let mut counts = CoOccurrence::new();
		assert_eq!(counts.add_playlists(&lists, 3), 2);
		assert_eq!(counts.add_playlists(&lists, 3), 1);
		assert_eq!(counts.add_playlists(&lists, 3), 0);
		assert_eq!(counts.playlists(), 3);
		assert_eq!(counts.count("A", "B"), 3);
	}

	#[test]
	fn artist_uris_reduce_to_their_last_segment() {
		assert_eq!(artist_key("spotify:artist:Drake"), "Drake");
		assert_eq!(artist_key("Adele"), "Adele");
		let mut counts = CoOccurrence::new();
		counts.add_playlist(&playlist(&["spotify:artist:Drake", "Drake", "x:Adele", "trailing:"]));
		assert_eq!(counts.count("Adele", "Drake"), 1);
		assert_eq!(counts.strongest(), Some(("Adele", "Drake", 1)));
	}

	#[test]
	fn edges_sorted_heaviest_first() {
		let lists = [
			playlist(&["A", "B", "C"]),
			playlist(&["B", "C"]),
			playlist(&["B", "C"]),
		];
		let data = build(&lists, 10, 1);
		let weights: Vec<_> = data.edges.iter().map(|e| e.weight).collect();
		assert_eq!(weights, [3.0, 1.0, 1.0]);
		assert_eq!((data.edges[1].source.as_str(), data.edges[1].target.as_str()), ("A", "B"));
	}

	#[test]
	fn parses_playlist_dump() {
		let json = r#"{"info": {}, "playlists": [
			{"name": "x", "tracks": [{"artist_name": "A"}, {"track_name": "no artist"}]}
		]}"#;
		let file: PlaylistFile = serde_json::from_str(json).unwrap();
		assert_eq!(file.playlists[0].artists().len(), 1);
	}
}
