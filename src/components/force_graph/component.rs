//! Leptos component wrapping the automation graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, panning, zooming and shift-drag connections. An
//! animation loop runs via `requestAnimationFrame`, stepping the physics
//! simulation and redrawing each frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ForceGraphState, LinkDraft};
use super::theme::Theme;
use super::types::CanvasGraph;
use crate::graph::ManualEdge;

/// Bundles graph simulation state with visual configuration.
struct GraphContext {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
}

type SharedContext = Rc<RefCell<Option<GraphContext>>>;
type SharedClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Canvas size: explicit props first, then the parent element, then a fallback.
fn canvas_size(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	let from_parent = |measure: fn(&web_sys::Element) -> i32, fallback: f64| {
		parent
			.as_ref()
			.map(|p| measure(p) as f64)
			.filter(|v| *v > 0.0)
			.unwrap_or(fallback)
	};
	(
		width.unwrap_or_else(|| from_parent(web_sys::Element::client_width, 1000.0)),
		height.unwrap_or_else(|| from_parent(web_sys::Element::client_height, 600.0)),
	)
}

/// Mouse position relative to the canvas.
fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders the displayed subgraph as an interactive force-directed graph.
///
/// `data` is rebuilt into a fresh simulation whenever it changes. `manual`
/// connections are added to the running simulation without resetting the
/// layout. Shift-dragging from one node onto another calls `on_connect` with
/// `(source, target)`; the canvas itself never records the connection.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<CanvasGraph>,
	#[prop(into)] manual: Signal<Vec<ManualEdge>>,
	#[prop(into)] on_connect: Callback<(String, String)>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: SharedClosure = Rc::new(RefCell::new(None));
	let resize_cb: SharedClosure = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = canvas_size(&canvas, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("ha-validator: canvas 2d context unavailable");
			return;
		};

		let theme = Theme::default();
		*context_init.borrow_mut() = Some(GraphContext {
			state: ForceGraphState::new(&data.get_untracked(), &manual.get_untracked(), w, h, &theme),
			scale: ScaleConfig::default(),
			theme,
		});

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = canvas_size(&canvas_resize, width, height);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.state.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(0.016);
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let window: Option<Window> = web_sys::window();
				if let Some(window) = window {
					let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// New displayed subgraph: new simulation.
	let context_data = context.clone();
	Effect::new(move |_| {
		let graph = data.get();
		if let Some(ref mut c) = *context_data.borrow_mut() {
			let (w, h) = (c.state.width, c.state.height);
			c.state = ForceGraphState::new(&graph, &manual.get_untracked(), w, h, &c.theme);
		}
	});

	// New manual connections: extend the running simulation.
	let context_manual = context.clone();
	Effect::new(move |_| {
		let edges = manual.get();
		if let Some(ref mut c) = *context_manual.borrow_mut() {
			c.state.add_manual(&edges);
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			let scale = ScaledValues::new(&c.scale, c.state.transform.k);
			let (gx, gy) = c.state.screen_to_graph(x, y);
			match c.state.node_at_position(x, y, &scale) {
				Some(idx) if ev.shift_key() => {
					c.state.draft = Some(LinkDraft {
						source: idx,
						x: gx,
						y: gy,
					});
				}
				Some(idx) => {
					c.state.drag.node_idx = Some(idx);
					c.state.drag.start_x = x;
					c.state.drag.start_y = y;
					c.state.graph.visit_nodes(|node| {
						if node.index() == idx {
							c.state.drag.node_start_x = node.x();
							c.state.drag.node_start_y = node.y();
						}
					});
				}
				None => {
					c.state.pan.active = true;
					c.state.pan.start_x = x;
					c.state.pan.start_y = y;
					c.state.pan.transform_start_x = c.state.transform.x;
					c.state.pan.transform_start_y = c.state.transform.y;
				}
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.drag.node_idx.is_none() {
				let scale = ScaledValues::new(&c.scale, c.state.transform.k);
				let hovered = c.state.node_at_position(x, y, &scale);
				c.state.set_hover(hovered);
			}

			let (gx, gy) = c.state.screen_to_graph(x, y);
			if let Some(draft) = c.state.draft.as_mut() {
				draft.x = gx;
				draft.y = gy;
			} else if let Some(idx) = c.state.drag.node_idx {
				let k = c.state.transform.k;
				let (nx, ny) = (
					c.state.drag.node_start_x + ((x - c.state.drag.start_x) / k) as f32,
					c.state.drag.node_start_y + ((y - c.state.drag.start_y) / k) as f32,
				);
				c.state.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			} else if c.state.pan.active {
				c.state.transform.x = c.state.pan.transform_start_x + (x - c.state.pan.start_x);
				c.state.transform.y = c.state.pan.transform_start_y + (y - c.state.pan.start_y);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let point = local_point(canvas_ref, &ev);
		let request = {
			let mut borrowed = context_mu.borrow_mut();
			let Some(c) = borrowed.as_mut() else {
				return;
			};
			let draft = c.state.draft.take();
			c.state.drag.node_idx = None;
			c.state.pan.active = false;

			let scale = ScaledValues::new(&c.scale, c.state.transform.k);
			match (draft, point) {
				(Some(draft), Some((x, y))) => c
					.state
					.node_at_position(x, y, &scale)
					.filter(|target| *target != draft.source)
					.and_then(|target| Some((c.state.node_id(draft.source)?, c.state.node_id(target)?))),
				_ => None,
			}
		};
		// Run outside the borrow: the callback feeds back into `manual`.
		if let Some(pair) = request {
			on_connect.run(pair);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.drag.node_idx = None;
			c.state.pan.active = false;
			c.state.draft = None;
			c.state.set_hover(None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: Option<HtmlCanvasElement> = canvas_ref.get_untracked().map(Into::into);
		let Some(canvas) = canvas else {
			return;
		};
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
