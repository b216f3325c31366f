//! Connections the user draws by hand on the canvas.
//!
//! These live next to the displayed subgraph, never inside the dataset, and
//! are never sent to the backend. They vanish whenever the displayed subgraph
//! is recomputed.

use super::filter::Subgraph;

/// A hand-drawn connection between two displayed nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManualEdge {
	/// Node the connection starts at.
	pub source: String,
	/// Node the connection points to.
	pub target: String,
}

/// View-only set of manual connections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overlay {
	edges: Vec<ManualEdge>,
}

impl Overlay {
	/// Records `source -> target` if both ends are displayed, the ends differ,
	/// and no displayed or manual edge already connects them that way.
	/// Returns whether the connection was added.
	pub fn connect(&mut self, displayed: &Subgraph, source: &str, target: &str) -> bool {
		if source == target || !displayed.contains_node(source) || !displayed.contains_node(target) {
			return false;
		}
		if displayed.contains_edge(source, target) || self.contains(source, target) {
			return false;
		}
		self.edges.push(ManualEdge {
			source: source.to_string(),
			target: target.to_string(),
		});
		true
	}

	/// True if a manual `source -> target` connection exists.
	pub fn contains(&self, source: &str, target: &str) -> bool {
		self.edges
			.iter()
			.any(|edge| edge.source == source && edge.target == target)
	}

	/// Manual connections in the order they were drawn.
	pub fn edges(&self) -> &[ManualEdge] {
		&self.edges
	}

	/// True if nothing has been drawn.
	pub fn is_empty(&self) -> bool {
		self.edges.is_empty()
	}

	/// Forgets every manual connection.
	pub fn clear(&mut self) {
		self.edges.clear();
	}
}
