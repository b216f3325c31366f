//! Zoom-dependent sizes for canvas drawing.
//!
//! Drawing happens in world space after the pan/zoom transform. Some elements
//! should keep a constant pixel size on screen (strokes, text) and others
//! should grow with zoom but not shrink into invisibility (nodes, arrows).

/// How a size reacts to the zoom factor `k`.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size in pixels.
	Screen,
	/// World-space size whose on-screen size stays within bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Base sizes and how they scale.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node_radius: f64,
	pub node_behavior: ScaleBehavior,
	/// Extra pick tolerance around a node, in screen pixels.
	pub hit_slop: f64,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Below this zoom the label's world size stops growing, so labels keep
	/// shrinking on screen as the view zooms out.
	pub label_min_k: f64,
	/// Edge stroke in screen pixels.
	pub edge_width: f64,
	/// Dash pattern (dash, gap) in world units.
	pub dash_pattern: (f64, f64),
	/// Flow animation speed (world units per second).
	pub flow_speed: f64,
	pub arrow_size: f64,
	pub arrow_behavior: ScaleBehavior,
	/// Focal ring stroke and gap in screen pixels.
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: 7.0,
			node_behavior: ScaleBehavior::Clamped {
				min_screen: 4.0,
				max_screen: f64::INFINITY,
			},
			hit_slop: 4.0,
			label_size: 11.0,
			label_min_k: 0.5,
			edge_width: 1.5,
			dash_pattern: (6.0, 4.0),
			flow_speed: 14.0,
			arrow_size: 6.0,
			arrow_behavior: ScaleBehavior::Clamped {
				min_screen: 3.0,
				max_screen: 16.0,
			},
			ring_width: 2.0,
			ring_offset: 3.0,
		}
	}
}

/// Sizes for one frame, all in world space.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub node_radius: f64,
	pub hit_slop: f64,
	pub label_font: String,
	pub edge_width: f64,
	pub arrow_size: f64,
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_px = config.label_size / k.max(config.label_min_k);
		Self {
			node_radius: config.node_behavior.apply(config.node_radius, k),
			hit_slop: config.hit_slop / k,
			label_font: format!("{label_px}px sans-serif"),
			edge_width: config.edge_width / k,
			arrow_size: config.arrow_behavior.apply(config.arrow_size, k),
			ring_width: config.ring_width / k,
			ring_offset: config.ring_offset / k,
		}
	}

	/// Dash offset for the flow animation at `time` seconds.
	pub fn dash_offset(time: f64, flow_speed: f64) -> f64 {
		-time * flow_speed
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamped_sizes_keep_a_minimum_on_screen() {
		let behavior = ScaleBehavior::Clamped {
			min_screen: 4.0,
			max_screen: 10.0,
		};
		// Zoomed out: 7 world units would be 3.5px, so it grows to 4px.
		assert_eq!(behavior.apply(7.0, 0.5), 8.0);
		// Zoomed far in: capped at 10px on screen.
		assert_eq!(behavior.apply(7.0, 5.0), 2.0);
		assert_eq!(behavior.apply(7.0, 1.0), 7.0);
	}

	#[test]
	fn screen_sizes_divide_by_zoom() {
		assert_eq!(ScaleBehavior::Screen.apply(2.0, 2.0), 1.0);
		assert_eq!(ScaleBehavior::World.apply(2.0, 2.0), 2.0);

		let scaled = ScaledValues::new(&ScaleConfig::default(), 2.0);
		assert_eq!(scaled.edge_width, 0.75);
		assert_eq!(scaled.label_font, "5.5px sans-serif");
	}

	#[test]
	fn labels_shrink_on_screen_below_min_zoom() {
		let config = ScaleConfig::default();
		// At the floor the world size is 22, i.e. 11px on screen.
		assert_eq!(ScaledValues::new(&config, 0.5).label_font, "22px sans-serif");
		// Further out it stays 22 world units, so only 5.5px on screen.
		assert_eq!(ScaledValues::new(&config, 0.25).label_font, "22px sans-serif");
	}
}
