//! Referential checks applied to a dataset before it is installed.
//!
//! The backend happily emits edges to entities it never listed as nodes
//! (automations may reference entities that no longer exist). Such edges are
//! dropped here, so every edge the filter sees has both endpoints present.

use std::collections::HashSet;

use super::types::{GraphData, GraphEdge};

/// An edge removed because at least one endpoint is unknown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DanglingEdge {
	/// The removed edge.
	pub edge: GraphEdge,
	/// The endpoint identifiers that matched no node.
	pub missing: Vec<String>,
}

/// Removes dangling edges from `data`, returning what was dropped.
///
/// Nodes and the relative order of surviving edges are untouched.
pub fn drop_dangling_edges(data: &mut GraphData) -> Vec<DanglingEdge> {
	let known: HashSet<String> = data.nodes.iter().map(|node| node.id.clone()).collect();
	let mut dropped = Vec::new();

	data.edges.retain(|edge| {
		let missing: Vec<String> = [&edge.source, &edge.target]
			.into_iter()
			.filter(|id| !known.contains(id.as_str()))
			.cloned()
			.collect();
		if missing.is_empty() {
			true
		} else {
			dropped.push(DanglingEdge {
				edge: edge.clone(),
				missing,
			});
			false
		}
	});

	dropped
}
