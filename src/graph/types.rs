//! Graph data structures as served by the backend's `/api/graph` endpoint.
//!
//! The backend speaks the React Flow document shape, where the classification
//! tag and label live inside a nested `data` object. The flat shape
//! (`{ "id", "type", "label" }`) is accepted too.

use serde::Deserialize;

/// A node in the graph: an entity or an automation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawNode")]
pub struct GraphNode {
	/// Unique identifier, e.g. `automation.morning` or `light.kitchen`.
	pub id: String,
	/// Classification tag (`"automation"`, `"entity"`, ...). May be missing.
	pub kind: Option<String>,
	/// Optional display label. Falls back to `id` when absent or empty.
	pub label: Option<String>,
}

impl GraphNode {
	/// Builds a node from its parts.
	pub fn new(id: impl Into<String>, kind: Option<&str>, label: Option<&str>) -> Self {
		Self {
			id: id.into(),
			kind: kind.map(str::to_string),
			label: label.map(str::to_string),
		}
	}

	/// The label to show for this node.
	pub fn display_label(&self) -> &str {
		self.label
			.as_deref()
			.filter(|label| !label.is_empty())
			.unwrap_or(&self.id)
	}
}

/// Wire shape of a node before the nested `data` object is flattened.
#[derive(Deserialize)]
struct RawNode {
	id: String,
	#[serde(default, rename = "type")]
	kind: Option<String>,
	#[serde(default)]
	label: Option<String>,
	#[serde(default)]
	data: Option<RawNodeData>,
}

#[derive(Default, Deserialize)]
struct RawNodeData {
	#[serde(default, rename = "type")]
	kind: Option<String>,
	#[serde(default)]
	label: Option<String>,
}

impl From<RawNode> for GraphNode {
	fn from(raw: RawNode) -> Self {
		// The top-level `type` is the renderer's node kind in the React Flow
		// shape, so the nested classification takes precedence.
		let data = raw.data.unwrap_or_default();
		Self {
			id: raw.id,
			kind: data.kind.or(raw.kind),
			label: data.label.or(raw.label),
		}
	}
}

/// A connection between two nodes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GraphEdge {
	/// Backend edge identifier (`e-{source}-{target}`), if provided.
	#[serde(default)]
	pub id: Option<String>,
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Relationship name: `trigger`, `action` or `related`.
	#[serde(default, rename = "label")]
	pub relation: Option<String>,
}

impl GraphEdge {
	/// Builds an unlabelled edge.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			id: None,
			source: source.into(),
			target: target.into(),
			relation: None,
		}
	}

	/// Attaches a relationship name.
	pub fn with_relation(mut self, relation: &str) -> Self {
		self.relation = Some(relation.to_string());
		self
	}

	/// True when `id` is either endpoint.
	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}

	/// True for entity -> automation trigger edges.
	pub fn is_trigger(&self) -> bool {
		self.relation.as_deref() == Some("trigger")
	}
}

/// One snapshot of the backend graph. Replaced wholesale on every load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct GraphData {
	/// Entities and automations, in backend order.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Directed relations between nodes.
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
}

impl GraphData {
	/// True if a node with this identifier exists.
	pub fn contains_node(&self, id: &str) -> bool {
		self.nodes.iter().any(|node| node.id == id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_react_flow_document() {
		let json = r#"{
			"nodes": [
				{
					"id": "automation.morning",
					"type": "default",
					"data": { "label": "Morning Routine", "type": "automation", "details": {} },
					"position": { "x": 10.0, "y": -4.5 }
				},
				{ "id": "light.kitchen", "data": { "label": "light.kitchen", "type": "entity" } }
			],
			"edges": [
				{
					"id": "e-automation.morning-light.kitchen",
					"source": "automation.morning",
					"target": "light.kitchen",
					"label": "action",
					"animated": false
				}
			]
		}"#;

		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].kind.as_deref(), Some("automation"));
		assert_eq!(data.nodes[0].display_label(), "Morning Routine");
		assert_eq!(data.edges[0].relation.as_deref(), Some("action"));
		assert!(!data.edges[0].is_trigger());
	}

	#[test]
	fn parses_flat_nodes_and_missing_edges() {
		let json = r#"{ "nodes": [{ "id": "sensor.motion", "type": "sensor" }] }"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.nodes[0], GraphNode::new("sensor.motion", Some("sensor"), None));
		assert!(data.edges.is_empty());
	}

	#[test]
	fn display_label_falls_back_to_id() {
		assert_eq!(GraphNode::new("light.a", None, None).display_label(), "light.a");
		assert_eq!(GraphNode::new("light.a", None, Some("")).display_label(), "light.a");
		assert_eq!(GraphNode::new("light.a", None, Some("Lamp")).display_label(), "Lamp");
	}
}
