//! Input for the graph canvas, derived from the displayed subgraph.

use crate::graph::{GraphEdge, GraphNode, Subgraph, is_automation};

/// How a node is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeRole {
	/// Classified as an automation.
	Automation,
	/// Tagged `entity`.
	Entity,
	/// Anything else.
	#[default]
	Other,
}

impl NodeRole {
	/// Role of a graph node: automation first, then the `entity` tag.
	pub fn of(node: &GraphNode) -> Self {
		if is_automation(node) {
			NodeRole::Automation
		} else if node.kind.as_deref() == Some("entity") {
			NodeRole::Entity
		} else {
			NodeRole::Other
		}
	}
}

/// How an edge is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkStyle {
	/// Entity triggers automation. Drawn with flowing dashes.
	Trigger,
	/// Automation acts on entity.
	Action,
	/// Entities linked through an automation.
	Related,
	/// No relation name.
	Plain,
	/// Drawn by hand, view only.
	Manual,
}

impl LinkStyle {
	/// Style for an edge's relation name.
	pub fn of(edge: &GraphEdge) -> Self {
		match edge.relation.as_deref() {
			Some("trigger") => LinkStyle::Trigger,
			Some("action") => LinkStyle::Action,
			Some("related") => LinkStyle::Related,
			_ => LinkStyle::Plain,
		}
	}

	/// Whether the dash pattern scrolls along the edge.
	pub fn flows(self) -> bool {
		matches!(self, LinkStyle::Trigger)
	}
}

/// A node on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasNode {
	/// Node identifier.
	pub id: String,
	/// Text drawn next to the node.
	pub label: String,
	/// Fill colour and label policy.
	pub role: NodeRole,
}

/// A directed edge on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasLink {
	/// Source node identifier.
	pub source: String,
	/// Target node identifier.
	pub target: String,
	/// Stroke and dash style.
	pub style: LinkStyle,
}

/// Everything the canvas draws except the manual overlay.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanvasGraph {
	/// Nodes to draw.
	pub nodes: Vec<CanvasNode>,
	/// Edges between drawn nodes.
	pub links: Vec<CanvasLink>,
	/// The selected automation, pinned at the centre.
	pub focal: Option<String>,
}

impl CanvasGraph {
	/// Builds canvas input from a displayed subgraph and the current selection.
	///
	/// `focal` is ignored unless it names a displayed node.
	pub fn from_subgraph(subgraph: &Subgraph, focal: &str) -> Self {
		Self {
			nodes: subgraph
				.nodes
				.iter()
				.map(|node| CanvasNode {
					id: node.id.clone(),
					label: node.display_label().to_string(),
					role: NodeRole::of(node),
				})
				.collect(),
			links: subgraph
				.edges
				.iter()
				.map(|edge| CanvasLink {
					source: edge.source.clone(),
					target: edge.target.clone(),
					style: LinkStyle::of(edge),
				})
				.collect(),
			focal: subgraph
				.contains_node(focal)
				.then(|| focal.to_string()),
		}
	}
}
