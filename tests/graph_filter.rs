//! End-to-end checks of the automation filter against backend-shaped JSON.

// Test target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use ha_validator::graph::{
	AutomationCandidate, Explorer, GraphData, ViewPhase, automation_candidates, default_selection,
	neighborhood,
};

const MORNING: &str = r#"{
	"nodes": [
		{ "id": "automation.morning", "type": "automation", "label": "Morning Routine" },
		{ "id": "light.kitchen", "type": "light" },
		{ "id": "sensor.motion", "type": "sensor" }
	],
	"edges": [
		{ "source": "automation.morning", "target": "light.kitchen" },
		{ "source": "sensor.motion", "target": "light.kitchen" }
	]
}"#;

const REACT_FLOW: &str = r#"{
	"nodes": [
		{ "id": "sensor.door", "type": "custom", "position": { "x": 0, "y": 0 },
		  "data": { "label": "Front door", "type": "entity" } },
		{ "id": "automation.door_alert", "type": "custom", "position": { "x": 0, "y": 0 },
		  "data": { "label": "Door alert", "type": "automation" } },
		{ "id": "notify.phone", "type": "custom", "position": { "x": 0, "y": 0 },
		  "data": { "label": "", "type": "entity" } },
		{ "id": "automation.vacation", "type": "custom", "position": { "x": 0, "y": 0 },
		  "data": { "type": "automation" } }
	],
	"edges": [
		{ "id": "e-sensor.door-automation.door_alert", "source": "sensor.door",
		  "target": "automation.door_alert", "label": "trigger", "animated": true },
		{ "id": "e-automation.door_alert-notify.phone", "source": "automation.door_alert",
		  "target": "notify.phone", "label": "action", "animated": false }
	]
}"#;

fn parse(json: &str) -> GraphData {
	serde_json::from_str(json).unwrap()
}

fn ids(nodes: &[ha_validator::graph::GraphNode]) -> Vec<&str> {
	nodes.iter().map(|node| node.id.as_str()).collect()
}

#[test]
fn morning_routine_scenario() {
	let data = parse(MORNING);

	let candidates = automation_candidates(&data.nodes);
	assert_eq!(
		candidates,
		[AutomationCandidate {
			id: "automation.morning".into(),
			label: "Morning Routine".into(),
		}]
	);
	assert_eq!(default_selection(&candidates), Some("automation.morning"));

	let view = neighborhood(&data, "automation.morning").unwrap();
	assert_eq!(ids(&view.nodes), ["automation.morning", "light.kitchen"]);
	assert_eq!(view.edges, [data.edges[0].clone()]);
	assert!(!view.contains_node("sensor.motion"));
}

#[test]
fn explorer_reproduces_scenario() {
	let mut explorer = Explorer::new();
	let report = explorer.load(parse(MORNING));

	assert_eq!(report.nodes, 3);
	assert_eq!(report.selection.as_deref(), Some("automation.morning"));
	assert_eq!(explorer.phase(), ViewPhase::Filtered);
	assert_eq!(ids(&explorer.displayed().nodes), ["automation.morning", "light.kitchen"]);
	assert_eq!(explorer.displayed().edges.len(), 1);
}

#[test]
fn react_flow_payload_is_understood() {
	let data = parse(REACT_FLOW);

	let candidates = automation_candidates(&data.nodes);
	let labels: Vec<&str> = candidates.iter().map(|c| c.label.as_str()).collect();
	assert_eq!(labels, ["Door alert", "automation.vacation"]);

	let view = neighborhood(&data, "automation.door_alert").unwrap();
	assert_eq!(ids(&view.nodes), ["sensor.door", "automation.door_alert", "notify.phone"]);
	assert_eq!(view.edges.len(), 2);
	assert!(view.edges[0].is_trigger());
	assert_eq!(view.nodes[2].display_label(), "notify.phone");
}

#[test]
fn view_is_subset_of_dataset() {
	let data = parse(REACT_FLOW);
	for node in &data.nodes {
		let view = neighborhood(&data, &node.id).unwrap();
		assert!(view.nodes.iter().all(|n| data.nodes.contains(n)));
		assert!(view.edges.iter().all(|e| data.edges.contains(e)));
		assert!(view.edges.iter().all(|e| e.touches(&node.id)));
		assert!(
			view.nodes
				.iter()
				.all(|n| n.id == node.id || view.edges.iter().any(|e| e.touches(&n.id)))
		);
		assert!(view.contains_node(&node.id));
	}
}

#[test]
fn isolated_automation_shows_only_itself() {
	let data = parse(REACT_FLOW);
	let view = neighborhood(&data, "automation.vacation").unwrap();
	assert_eq!(ids(&view.nodes), ["automation.vacation"]);
	assert!(view.edges.is_empty());
}

#[test]
fn filtering_the_view_again_changes_nothing() {
	let data = parse(MORNING);
	let view = neighborhood(&data, "light.kitchen").unwrap();
	let again = neighborhood(
		&GraphData {
			nodes: view.nodes.clone(),
			edges: view.edges.clone(),
		},
		"light.kitchen",
	)
	.unwrap();
	assert_eq!(view, again);
}

#[test]
fn dataset_without_automations_falls_back_to_full_view() {
	let data = parse(r#"{ "nodes": [{ "id": "light.a" }, { "id": "light.b" }], "edges": [] }"#);
	let mut explorer = Explorer::new();
	explorer.load(data);

	assert_eq!(explorer.phase(), ViewPhase::NoCandidates);
	assert!(explorer.candidates().is_empty());
	assert_eq!(ids(&explorer.displayed().nodes), ["light.a", "light.b"]);
}

#[test]
fn missing_collections_default_to_empty() {
	let data = parse("{}");
	assert!(data.nodes.is_empty() && data.edges.is_empty());
	assert!(neighborhood(&data, "automation.any").is_none());
}
