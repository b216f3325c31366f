//! Single-writer state behind the dashboard graph.
//!
//! The only persisted inputs are the dataset and the selection. The displayed
//! subgraph is derived from them, and kept only because an unresolvable
//! selection must leave the previous view in place.
//!
//! ```text
//! Unloaded --load--> NoCandidates   (no automations: whole dataset shown)
//!          \-load--> Filtered       (first automation selected)
//! Filtered --select--> Filtered     (new view, or unchanged if unresolvable)
//! any      --load--> NoCandidates | Filtered
//! ```

use log::{debug, warn};

use super::candidates::{AutomationCandidate, automation_candidates, default_selection};
use super::filter::{Subgraph, neighborhood};
use super::integrity::drop_dangling_edges;
use super::overlay::Overlay;
use super::types::GraphData;

/// Where the explorer sits in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewPhase {
	/// No dataset has been installed yet.
	#[default]
	Unloaded,
	/// Dataset present but nothing is filtering it; the full graph is shown.
	NoCandidates,
	/// A focal node is selected and its neighbourhood is shown.
	Filtered,
}

/// Identifies one graph fetch. Only the newest ticket may install its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// Summary of an installed dataset, for logging and the status line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadReport {
	/// Nodes in the installed dataset.
	pub nodes: usize,
	/// Edges kept after dropping dangling ones.
	pub edges: usize,
	/// Edges removed because an endpoint was missing.
	pub dropped_edges: usize,
	/// Number of automation candidates.
	pub candidates: usize,
	/// Default selection applied by the load, if any.
	pub selection: Option<String>,
}

/// Dataset, selection, derived view and manual overlay.
#[derive(Clone, Debug, Default)]
pub struct Explorer {
	dataset: Option<GraphData>,
	candidates: Vec<AutomationCandidate>,
	selection: String,
	focal: Option<String>,
	displayed: Subgraph,
	overlay: Overlay,
	phase: ViewPhase,
	generation: u64,
}

impl Explorer {
	/// An explorer with no dataset.
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts a fetch. Any ticket handed out earlier becomes stale.
	pub fn begin_load(&mut self) -> LoadTicket {
		self.generation += 1;
		LoadTicket(self.generation)
	}

	/// True if no newer fetch has started since `ticket` was issued.
	pub fn is_current(&self, ticket: LoadTicket) -> bool {
		ticket.0 == self.generation
	}

	/// Installs the result of the fetch identified by `ticket`.
	///
	/// Results of superseded fetches are discarded and `None` is returned.
	pub fn finish_load(&mut self, ticket: LoadTicket, data: GraphData) -> Option<LoadReport> {
		if !self.is_current(ticket) {
			debug!("ha-validator: discarding graph from superseded fetch {:?}", ticket);
			return None;
		}
		Some(self.load(data))
	}

	/// Replaces the dataset and applies the default selection.
	pub fn load(&mut self, mut data: GraphData) -> LoadReport {
		let dropped = drop_dangling_edges(&mut data);
		for dangling in &dropped {
			warn!(
				"ha-validator: dropping edge {} -> {}, unknown node(s): {}",
				dangling.edge.source,
				dangling.edge.target,
				dangling.missing.join(", ")
			);
		}

		self.candidates = automation_candidates(&data.nodes);
		self.overlay.clear();

		match default_selection(&self.candidates).map(str::to_string) {
			Some(first) => {
				// The first candidate exists in `data`, so this always resolves.
				self.displayed = neighborhood(&data, &first).unwrap_or_default();
				self.focal = Some(first.clone());
				self.selection = first;
				self.phase = ViewPhase::Filtered;
			}
			None => {
				self.displayed = Subgraph::full(&data);
				self.focal = None;
				self.selection.clear();
				self.phase = ViewPhase::NoCandidates;
			}
		}

		let report = LoadReport {
			nodes: data.nodes.len(),
			edges: data.edges.len(),
			dropped_edges: dropped.len(),
			candidates: self.candidates.len(),
			selection: (!self.selection.is_empty()).then(|| self.selection.clone()),
		};
		self.dataset = Some(data);
		report
	}

	/// Changes the focal node.
	///
	/// Only takes effect when `id` names a node of the current dataset;
	/// otherwise selection and view are left as they were. Returns whether
	/// the selection changed.
	pub fn select(&mut self, id: &str) -> bool {
		let Some(data) = &self.dataset else {
			debug!("ha-validator: selection {:?} before any dataset", id);
			return false;
		};
		let Some(view) = neighborhood(data, id) else {
			debug!("ha-validator: selection {:?} does not resolve, keeping view", id);
			return false;
		};

		self.displayed = view;
		self.selection = id.to_string();
		self.focal = Some(id.to_string());
		self.overlay.clear();
		self.phase = ViewPhase::Filtered;
		true
	}

	/// Adds a view-only connection between two displayed nodes.
	pub fn connect(&mut self, source: &str, target: &str) -> bool {
		self.overlay.connect(&self.displayed, source, target)
	}

	/// Current lifecycle phase.
	pub fn phase(&self) -> ViewPhase {
		self.phase
	}

	/// The installed dataset, if any.
	pub fn dataset(&self) -> Option<&GraphData> {
		self.dataset.as_ref()
	}

	/// Automation candidates of the installed dataset, stable until the next load.
	pub fn candidates(&self) -> &[AutomationCandidate] {
		&self.candidates
	}

	/// Current focal identifier. Empty means no selection, otherwise it
	/// names a node of the installed dataset.
	pub fn selection(&self) -> &str {
		&self.selection
	}

	/// The node the displayed view is centred on, `None` for the full view.
	pub fn focal(&self) -> Option<&str> {
		self.focal.as_deref()
	}

	/// Nodes and edges for the canvas.
	pub fn displayed(&self) -> &Subgraph {
		&self.displayed
	}

	/// View-only connections drawn on the current view.
	pub fn overlay(&self) -> &Overlay {
		&self.overlay
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{GraphEdge, GraphNode};

	fn home() -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode::new("sensor.motion", Some("entity"), None),
				GraphNode::new("automation.morning", Some("automation"), Some("Morning")),
				GraphNode::new("light.kitchen", Some("entity"), None),
				GraphNode::new("automation.night", None, None),
			],
			edges: vec![
				GraphEdge::new("sensor.motion", "automation.morning").with_relation("trigger"),
				GraphEdge::new("automation.morning", "light.kitchen").with_relation("action"),
				GraphEdge::new("automation.night", "light.kitchen").with_relation("action"),
			],
		}
	}

	fn entities_only() -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode::new("light.a", Some("entity"), None),
				GraphNode::new("light.b", Some("entity"), None),
			],
			edges: vec![GraphEdge::new("light.a", "light.b")],
		}
	}

	#[test]
	fn starts_unloaded_and_empty() {
		let explorer = Explorer::new();
		assert_eq!(explorer.phase(), ViewPhase::Unloaded);
		assert!(explorer.dataset().is_none());
		assert!(explorer.displayed().nodes.is_empty());
		assert_eq!(explorer.selection(), "");
	}

	#[test]
	fn load_selects_first_automation() {
		let mut explorer = Explorer::new();
		let report = explorer.load(home());

		assert_eq!(explorer.phase(), ViewPhase::Filtered);
		assert_eq!(explorer.selection(), "automation.morning");
		assert_eq!(report.candidates, 2);
		assert_eq!(report.selection.as_deref(), Some("automation.morning"));
		assert_eq!(explorer.displayed().nodes.len(), 3);
		assert_eq!(explorer.displayed().edges.len(), 2);
	}

	#[test]
	fn load_without_automations_shows_everything() {
		let mut explorer = Explorer::new();
		let report = explorer.load(entities_only());

		assert_eq!(explorer.phase(), ViewPhase::NoCandidates);
		assert_eq!(explorer.selection(), "");
		assert_eq!(explorer.focal(), None);
		assert_eq!(report.selection, None);
		assert_eq!(explorer.displayed(), &Subgraph::full(&entities_only()));
	}

	#[test]
	fn select_switches_focus() {
		let mut explorer = Explorer::new();
		explorer.load(home());

		assert!(explorer.select("automation.night"));
		let ids: Vec<&str> = explorer.displayed().nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["light.kitchen", "automation.night"]);
		assert_eq!(explorer.phase(), ViewPhase::Filtered);
	}

	#[test]
	fn unresolvable_selection_keeps_previous_view() {
		let mut explorer = Explorer::new();
		explorer.load(home());
		let before = explorer.displayed().clone();

		assert!(!explorer.select("automation.deleted"));
		assert_eq!(explorer.displayed(), &before);
		assert_eq!(explorer.selection(), "automation.morning");
		assert_eq!(explorer.focal(), Some("automation.morning"));
		assert_eq!(explorer.phase(), ViewPhase::Filtered);
	}

	#[test]
	fn empty_selection_keeps_filtered_view() {
		let mut explorer = Explorer::new();
		explorer.load(home());
		explorer.select("automation.night");
		let before = explorer.displayed().clone();

		assert!(!explorer.select(""));
		assert_eq!(explorer.phase(), ViewPhase::Filtered);
		assert_eq!(explorer.selection(), "automation.night");
		assert_eq!(explorer.displayed(), &before);
		assert!(explorer.dataset().is_some_and(|d| d.contains_node(explorer.selection())));
	}

	#[test]
	fn selection_before_load_is_ignored() {
		let mut explorer = Explorer::new();
		assert!(!explorer.select("automation.morning"));
		assert_eq!(explorer.selection(), "");
		assert_eq!(explorer.phase(), ViewPhase::Unloaded);
	}

	#[test]
	fn fallback_view_survives_empty_selection() {
		let mut explorer = Explorer::new();
		explorer.load(entities_only());
		assert!(!explorer.select(""));
		assert_eq!(explorer.phase(), ViewPhase::NoCandidates);
		assert_eq!(explorer.displayed().nodes.len(), 2);
	}

	#[test]
	fn reload_replaces_dataset_and_candidates() {
		let mut explorer = Explorer::new();
		explorer.load(home());
		explorer.select("automation.night");

		explorer.load(entities_only());
		assert!(explorer.candidates().is_empty());
		assert_eq!(explorer.phase(), ViewPhase::NoCandidates);

		explorer.load(home());
		assert_eq!(explorer.selection(), "automation.morning");
	}

	#[test]
	fn dangling_edges_are_dropped_on_load() {
		let mut data = home();
		data.edges.push(GraphEdge::new("automation.morning", "switch.removed"));

		let mut explorer = Explorer::new();
		let report = explorer.load(data);

		assert_eq!(report.dropped_edges, 1);
		assert_eq!(report.edges, 3);
		assert!(!explorer.displayed().contains_node("switch.removed"));
		assert_eq!(explorer.displayed().edges.len(), 2);
	}

	#[test]
	fn stale_fetch_is_discarded() {
		let mut explorer = Explorer::new();
		let first = explorer.begin_load();
		let second = explorer.begin_load();

		assert!(explorer.finish_load(second, home()).is_some());
		assert!(explorer.finish_load(first, entities_only()).is_none());
		assert_eq!(explorer.phase(), ViewPhase::Filtered);
		assert_eq!(explorer.dataset(), Some(&home()));
	}

	#[test]
	fn overlay_is_cleared_by_recompute() {
		let mut explorer = Explorer::new();
		explorer.load(home());

		assert!(explorer.connect("sensor.motion", "light.kitchen"));
		assert_eq!(explorer.overlay().edges().len(), 1);
		assert_eq!(explorer.dataset().map(|d| d.edges.len()), Some(3));

		explorer.select("automation.night");
		assert!(explorer.overlay().is_empty());
	}
}
