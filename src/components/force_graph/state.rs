//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node metadata, the
//! pan/zoom transform, hover highlighting and the shift-drag gesture used to
//! draw manual connections.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::ScaledValues;
use super::theme::{Color, Theme};
use super::types::{CanvasGraph, LinkStyle, NodeRole};
use crate::graph::ManualEdge;

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub role: NodeRole,
	pub color: Color,
	/// Size multiplier (1.0 = normal).
	pub size: f64,
	pub focal: bool,
}

/// An edge as the renderer sees it.
#[derive(Clone, Copy, Debug)]
pub struct LinkInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub style: LinkStyle,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// A connection being drawn with shift-drag: source node plus cursor in graph space.
#[derive(Clone, Debug)]
pub struct LinkDraft {
	pub source: DefaultNodeIdx,
	pub x: f64,
	pub y: f64,
}

/// Hover highlight with smoothed per-node intensity.
///
/// The hovered node and its neighbours ease towards 1.0, everything else
/// decays towards 0.0.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	pub hovered: Option<DefaultNodeIdx>,
	targets: HashSet<DefaultNodeIdx>,
	intensity: HashMap<DefaultNodeIdx, f64>,
	max: f64,
}

impl HighlightState {
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>, links: &[LinkInfo]) {
		if self.hovered == node {
			return;
		}
		self.hovered = node;
		self.targets.clear();

		if let Some(idx) = node {
			self.targets.insert(idx);
			for link in links {
				if link.source == idx {
					self.targets.insert(link.target);
				} else if link.target == idx {
					self.targets.insert(link.source);
				}
			}
		}
	}

	/// Moves intensities towards their targets by exponential smoothing.
	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 6.0;
		const FADE_OUT_SPEED: f64 = 4.0;

		let fade_in = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out = (-FADE_OUT_SPEED * dt).exp();

		for &idx in &self.targets {
			let value = self.intensity.entry(idx).or_insert(0.0);
			*value += (1.0 - *value) * fade_in;
		}

		let mut max: f64 = 0.0;
		self.intensity.retain(|idx, value| {
			if !self.targets.contains(idx) {
				*value *= fade_out;
			}
			max = max.max(*value);
			*value > 0.005
		});
		self.max = max;
	}

	pub fn node(&self, idx: DefaultNodeIdx) -> f64 {
		self.intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Geometric mean of both endpoints.
	pub fn link(&self, a: DefaultNodeIdx, b: DefaultNodeIdx) -> f64 {
		(self.node(a) * self.node(b)).sqrt()
	}

	/// Strongest current highlight, used to dim everything else.
	pub fn max(&self) -> f64 {
		self.max
	}
}

/// Core canvas state: physics simulation plus interaction tracking.
///
/// Rebuilt whenever the displayed subgraph changes. Manual connections are
/// added in place so drawing one does not reset the layout.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub links: Vec<LinkInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub draft: Option<LinkDraft>,
	pub highlight: HighlightState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	index: HashMap<String, DefaultNodeIdx>,
}

impl ForceGraphState {
	pub fn new(data: &CanvasGraph, manual: &[ManualEdge], width: f64, height: f64, theme: &Theme) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 180.0,
			force_spring: 0.06,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let mut degree: HashMap<&str, usize> = HashMap::new();
		for link in &data.links {
			*degree.entry(link.source.as_str()).or_insert(0) += 1;
			*degree.entry(link.target.as_str()).or_insert(0) += 1;
		}
		let max_degree = degree.values().copied().max().unwrap_or(1).max(1);

		let mut index = HashMap::new();
		let ring = data.nodes.len().max(1) as f64;
		for (i, node) in data.nodes.iter().enumerate() {
			let focal = data.focal.as_deref() == Some(node.id.as_str());
			let angle = (i as f64) * 2.0 * PI / ring;
			let (x, y) = if focal {
				(0.0, 0.0)
			} else {
				((120.0 * angle.cos()) as f32, (120.0 * angle.sin()) as f32)
			};

			let degree_factor =
				(degree.get(node.id.as_str()).copied().unwrap_or(0) as f64 / max_degree as f64).sqrt();
			let size = match (focal, node.role) {
				(true, _) => 2.0,
				(false, NodeRole::Automation) => 1.3 + 0.3 * degree_factor,
				(false, _) => 0.8 + 0.4 * degree_factor,
			};

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				// Pin the focal automation at the centre of the view.
				is_anchor: focal,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					role: node.role,
					color: theme.node_color(node.role),
					size,
					focal,
				},
			});
			index.insert(node.id.clone(), idx);
		}

		let mut state = Self {
			graph,
			links: Vec::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			draft: None,
			highlight: HighlightState::default(),
			width,
			height,
			flow_time: 0.0,
			index,
		};

		for link in &data.links {
			state.add_link(&link.source, &link.target, link.style);
		}
		state.add_manual(manual);
		state
	}

	/// Adds the manual connections not already on the canvas.
	pub fn add_manual(&mut self, manual: &[ManualEdge]) {
		for edge in manual {
			if !self.has_link(&edge.source, &edge.target, LinkStyle::Manual) {
				self.add_link(&edge.source, &edge.target, LinkStyle::Manual);
			}
		}
	}

	fn add_link(&mut self, source: &str, target: &str, style: LinkStyle) {
		let (Some(&src), Some(&tgt)) = (self.index.get(source), self.index.get(target)) else {
			return;
		};
		self.graph.add_edge(src, tgt, EdgeData::default());
		self.links.push(LinkInfo {
			source: src,
			target: tgt,
			style,
		});
	}

	fn has_link(&self, source: &str, target: &str, style: LinkStyle) -> bool {
		let (Some(&src), Some(&tgt)) = (self.index.get(source), self.index.get(target)) else {
			return false;
		};
		self.links
			.iter()
			.any(|l| l.source == src && l.target == tgt && l.style == style)
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64, scale: &ScaledValues) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let reach = scale.node_radius * node.data.user_data.size + scale.hit_slop;
			if (dx * dx + dy * dy).sqrt() < reach {
				found = Some(node.index());
			}
		});
		found
	}

	/// Identifier of the node at `idx`.
	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.highlight.set_hover(node, &self.links);
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;
		self.highlight.tick(dt as f64);
	}

	/// Zooms by `factor` keeping the screen point `(x, y)` fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = k;
	}

	/// Keeps the view centred on the same point when the canvas changes size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}
