//! Automation candidates for the focal-node selector.
//!
//! A node counts as an automation when its classification tag says so, or
//! when its identifier lives in the `automation.` domain. The second check
//! covers datasets where the tag is missing or inconsistent.

use super::types::GraphNode;

/// Classification tag carried by automation nodes.
pub const AUTOMATION_KIND: &str = "automation";

/// Identifier prefix of the Home Assistant automation domain.
pub const AUTOMATION_PREFIX: &str = "automation.";

/// An entry of the selection control: identifier plus label to show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutomationCandidate {
	/// Node identifier, used as the selection value.
	pub id: String,
	/// Text shown in the selector: the node label, or the id without one.
	pub label: String,
}

/// True if the node is tagged `"automation"`.
pub fn has_automation_kind(node: &GraphNode) -> bool {
	node.kind.as_deref() == Some(AUTOMATION_KIND)
}

/// True if the node identifier starts with `automation.`.
pub fn has_automation_prefix(node: &GraphNode) -> bool {
	node.id.starts_with(AUTOMATION_PREFIX)
}

/// Either of the two automation checks.
pub fn is_automation(node: &GraphNode) -> bool {
	has_automation_kind(node) || has_automation_prefix(node)
}

/// Collects every automation node, in input order.
pub fn automation_candidates(nodes: &[GraphNode]) -> Vec<AutomationCandidate> {
	nodes
		.iter()
		.filter(|node| is_automation(node))
		.map(|node| AutomationCandidate {
			id: node.id.clone(),
			label: node.display_label().to_string(),
		})
		.collect()
}

/// The selection a freshly loaded dataset starts with: the first candidate.
pub fn default_selection(candidates: &[AutomationCandidate]) -> Option<&str> {
	candidates.first().map(|candidate| candidate.id.as_str())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn predicates_are_independent() {
		let tagged = GraphNode::new("script.wake", Some("automation"), None);
		let prefixed = GraphNode::new("automation.night", Some("entity"), None);
		let neither = GraphNode::new("light.kitchen", Some("entity"), None);

		assert!(has_automation_kind(&tagged) && !has_automation_prefix(&tagged));
		assert!(!has_automation_kind(&prefixed) && has_automation_prefix(&prefixed));
		assert!(is_automation(&tagged) && is_automation(&prefixed));
		assert!(!is_automation(&neither));
	}

	#[test]
	fn prefix_must_include_the_dot() {
		let node = GraphNode::new("automations_panel", None, None);
		assert!(!is_automation(&node));
	}

	#[test]
	fn candidates_keep_input_order_and_label_fallback() {
		let nodes = vec![
			GraphNode::new("automation.zeta", None, None),
			GraphNode::new("light.kitchen", Some("entity"), Some("Kitchen")),
			GraphNode::new("automation.alpha", Some("automation"), Some("Alpha")),
		];

		let candidates = automation_candidates(&nodes);
		assert_eq!(
			candidates,
			vec![
				AutomationCandidate {
					id: "automation.zeta".into(),
					label: "automation.zeta".into(),
				},
				AutomationCandidate {
					id: "automation.alpha".into(),
					label: "Alpha".into(),
				},
			]
		);
		assert_eq!(default_selection(&candidates), Some("automation.zeta"));
	}

	#[test]
	fn no_candidates_means_no_default() {
		assert!(automation_candidates(&[]).is_empty());
		assert_eq!(default_selection(&[]), None);
	}
}
