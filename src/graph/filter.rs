//! Neighbour-induced subgraph around a focal node.

use std::collections::HashSet;

use super::types::{GraphData, GraphEdge, GraphNode};

/// The nodes and edges handed to the canvas.
///
/// Always a subset of the dataset it was derived from, in the dataset's order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subgraph {
	/// Displayed nodes.
	pub nodes: Vec<GraphNode>,
	/// Displayed edges. Both endpoints of each are in `nodes`.
	pub edges: Vec<GraphEdge>,
}

impl Subgraph {
	/// The whole dataset, unfiltered.
	pub fn full(data: &GraphData) -> Self {
		Self {
			nodes: data.nodes.clone(),
			edges: data.edges.clone(),
		}
	}

	/// True if a node with this identifier is displayed.
	pub fn contains_node(&self, id: &str) -> bool {
		self.nodes.iter().any(|node| node.id == id)
	}

	/// True if an edge `source -> target` is displayed.
	pub fn contains_edge(&self, source: &str, target: &str) -> bool {
		self.edges
			.iter()
			.any(|edge| edge.source == source && edge.target == target)
	}
}

/// Computes the focal node, every node sharing an edge with it, and every
/// edge incident to it.
///
/// Returns `None` when `focal` is empty or names no node in `data`. Callers
/// keep whatever they were showing in that case.
pub fn neighborhood(data: &GraphData, focal: &str) -> Option<Subgraph> {
	if focal.is_empty() || !data.contains_node(focal) {
		return None;
	}

	let edges: Vec<GraphEdge> = data
		.edges
		.iter()
		.filter(|edge| edge.touches(focal))
		.cloned()
		.collect();

	let mut members: HashSet<&str> = edges
		.iter()
		.flat_map(|edge| [edge.source.as_str(), edge.target.as_str()])
		.collect();
	members.insert(focal);

	let nodes = data
		.nodes
		.iter()
		.filter(|node| members.contains(node.id.as_str()))
		.cloned()
		.collect();

	Some(Subgraph { nodes, edges })
}
