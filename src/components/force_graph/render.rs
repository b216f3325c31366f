//! Canvas rendering for the automation graph.
//!
//! Drawing order gives the z-order:
//! 1. Background (screen space)
//! 2. Edges, then the connection being drawn (world space)
//! 3. Dimmed nodes, then highlighted nodes and the focal ring on top
//! 4. Vignette (screen space)

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ForceGraphState, LinkInfo, NodeInfo};
use super::theme::Theme;
use super::types::{LinkStyle, NodeRole};

/// Node centre and drawn radius, in world space.
type Positions = HashMap<DefaultNodeIdx, (f64, f64, f64)>;

/// Cubic ease so highlight transitions start and end softly.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, config: &ScaleConfig, theme: &Theme) {
	let scale = ScaledValues::new(config, state.transform.k);
	let positions = node_positions(state, &scale);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	let dash_offset = ScaledValues::dash_offset(state.flow_time, config.flow_speed);
	for link in &state.links {
		draw_link(state, ctx, config, &scale, theme, &positions, link, dash_offset);
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	draw_draft(state, ctx, &scale, theme, &positions);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();

	if theme.vignette > 0.0 {
		draw_vignette(state, ctx, theme);
	}
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	match ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, state.width.max(state.height) * 0.8) {
		Ok(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		Err(_) => ctx.set_fill_style_str(&theme.background.to_css()),
	}
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_vignette(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	let Ok(gradient) = ctx.create_radial_gradient(
		cx,
		cy,
		state.width.min(state.height) * 0.3,
		cx,
		cy,
		state.width.max(state.height) * 0.7,
	) else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(1.0, &format!("rgba(0, 0, 0, {})", theme.vignette));
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

#[allow(clippy::too_many_arguments)]
fn draw_link(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
	positions: &Positions,
	link: &LinkInfo,
	dash_offset: f64,
) {
	let (Some(&(x1, y1, start)), Some(&(x2, y2, end))) =
		(positions.get(&link.source), positions.get(&link.target))
	else {
		return;
	};
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}

	let edge_t = smooth_step(state.highlight.link(link.source, link.target));
	let max_t = smooth_step(state.highlight.max());
	let (alpha, width) = if edge_t > 0.01 {
		(0.7 + 0.3 * edge_t, scale.edge_width * (1.0 + 0.5 * edge_t))
	} else if max_t > 0.01 {
		(1.0 - 0.7 * max_t, scale.edge_width)
	} else {
		(1.0, scale.edge_width)
	};

	let color = theme.link_color(link.style).fade(alpha);
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(width);

	match link.style {
		LinkStyle::Trigger | LinkStyle::Manual => {
			let (dash, gap) = config.dash_pattern;
			let _ = ctx.set_line_dash(&js_sys::Array::of2(&JsValue::from_f64(dash), &JsValue::from_f64(gap)));
			ctx.set_line_dash_offset(if link.style.flows() { dash_offset } else { 0.0 });
		}
		_ => {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}
	}

	let (ux, uy) = (dx / dist, dy / dist);

	ctx.begin_path();
	ctx.move_to(x1 + ux * start, y1 + uy * start);
	ctx.line_to(
		x2 - ux * (end + scale.arrow_size),
		y2 - uy * (end + scale.arrow_size),
	);
	ctx.stroke();

	// Arrow head at the target.
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_fill_style_str(&color.to_css());
	let (tip_x, tip_y) = (x2 - ux * end, y2 - uy * end);
	let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
	let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

/// Rubber-band line from the source node to the cursor during shift-drag.
fn draw_draft(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	positions: &Positions,
) {
	let Some(draft) = &state.draft else {
		return;
	};
	let Some(&(x, y, _)) = positions.get(&draft.source) else {
		return;
	};
	ctx.set_stroke_style_str(&theme.link.manual.to_css());
	ctx.set_line_width(scale.edge_width * 1.5);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(2.0 * scale.edge_width),
		&JsValue::from_f64(3.0 * scale.edge_width),
	));
	ctx.begin_path();
	ctx.move_to(x, y);
	ctx.line_to(draft.x, draft.y);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn node_positions(state: &ForceGraphState, scale: &ScaledValues) -> Positions {
	let mut positions = HashMap::new();
	state.graph.visit_nodes(|node| {
		let radius = scale.node_radius * node.data.user_data.size;
		positions.insert(node.index(), (node.x() as f64, node.y() as f64, radius));
	});
	positions
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme) {
	let max_t = smooth_step(state.highlight.max());
	let dim = max_t > 0.01;

	// Pass 1: nodes outside the highlight.
	state.graph.visit_nodes(|node| {
		if state.highlight.node(node.index()) > 0.001 {
			return;
		}
		let alpha = if dim { 1.0 - 0.7 * max_t } else { 1.0 };
		draw_node(ctx, node, scale, theme, alpha, 1.0);
	});

	// Pass 2: highlighted and transitioning nodes on top.
	state.graph.visit_nodes(|node| {
		let node_t = state.highlight.node(node.index());
		if node_t <= 0.001 {
			return;
		}
		let eased = smooth_step(node_t);
		let hovered = state.highlight.hovered == Some(node.index());
		let grow = if hovered { 0.4 } else { 0.2 };
		let dim_alpha = 1.0 - 0.7 * max_t;
		draw_node(ctx, node, scale, theme, dim_alpha + (1.0 - dim_alpha) * eased, 1.0 + grow * eased);
	});
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &force_graph::Node<NodeInfo>,
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
	radius_mult: f64,
) {
	let info = &node.data.user_data;
	let (x, y) = (node.x() as f64, node.y() as f64);
	let radius = scale.node_radius * info.size * radius_mult;

	ctx.set_global_alpha(alpha);

	match ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius) {
		Ok(gradient) => {
			let _ = gradient.add_color_stop(0.0, &info.color.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &info.color.to_css());
			let _ = gradient.add_color_stop(1.0, &info.color.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		Err(_) => ctx.set_fill_style_str(&info.color.to_css()),
	}
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.fill();

	if info.focal {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius + scale.ring_offset, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&theme.node.focal_ring.to_css());
		ctx.set_line_width(scale.ring_width);
		ctx.stroke();
	}

	// Entities are labelled only when they stand out.
	let labelled = info.focal || radius_mult > 1.0 || info.role == NodeRole::Automation;
	if labelled && alpha > 0.5 {
		ctx.set_fill_style_str(&theme.node.label.to_css());
		ctx.set_font(&scale.label_font);
		let _ = ctx.fill_text(&info.label, x + radius + 4.0, y + 3.0);
	}

	ctx.set_global_alpha(1.0);
}
