//! Colours for the automation graph.
//!
//! Nodes are coloured by role (automation, entity, anything else) and edges by
//! relation, so trigger and action paths read apart at a glance.

use super::types::{LinkStyle, NodeRole};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Scales the existing alpha by `factor`.
	pub fn fade(self, factor: f64) -> Self {
		Self {
			a: self.a * factor.clamp(0.0, 1.0),
			..self
		}
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		let up = |c: u8| (c as f64 + (255.0 - c as f64) * f) as u8;
		Self {
			r: up(self.r),
			g: up(self.g),
			b: up(self.b),
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		let down = |c: u8| (c as f64 * f) as u8;
		Self {
			r: down(self.r),
			g: down(self.g),
			b: down(self.b),
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Node fill per role.
#[derive(Clone, Debug)]
pub struct NodeColors {
	pub automation: Color,
	pub entity: Color,
	pub other: Color,
	/// Ring drawn around the focal node.
	pub focal_ring: Color,
	pub label: Color,
}

/// Edge stroke per relation.
#[derive(Clone, Debug)]
pub struct LinkColors {
	pub trigger: Color,
	pub action: Color,
	pub related: Color,
	pub plain: Color,
	/// Hand-drawn connections from the overlay.
	pub manual: Color,
}

/// Complete canvas theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	pub background_secondary: Color,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
	pub node: NodeColors,
	pub link: LinkColors,
}

impl Theme {
	pub fn node_color(&self, role: NodeRole) -> Color {
		match role {
			NodeRole::Automation => self.node.automation,
			NodeRole::Entity => self.node.entity,
			NodeRole::Other => self.node.other,
		}
	}

	pub fn link_color(&self, style: LinkStyle) -> Color {
		match style {
			LinkStyle::Trigger => self.link.trigger,
			LinkStyle::Action => self.link.action,
			LinkStyle::Related => self.link.related,
			LinkStyle::Plain => self.link.plain,
			LinkStyle::Manual => self.link.manual,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(248, 250, 252),
			background_secondary: Color::rgb(255, 255, 255),
			vignette: 0.04,
			node: NodeColors {
				automation: Color::rgb(37, 99, 235),
				entity: Color::rgb(16, 163, 127),
				other: Color::rgb(120, 130, 145),
				focal_ring: Color::rgba(37, 99, 235, 0.55),
				label: Color::rgb(31, 41, 55),
			},
			link: LinkColors {
				trigger: Color::rgba(234, 88, 12, 0.8),
				action: Color::rgba(37, 99, 235, 0.7),
				related: Color::rgba(120, 130, 145, 0.6),
				plain: Color::rgba(120, 130, 145, 0.5),
				manual: Color::rgba(147, 51, 234, 0.85),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(37, 99, 235).to_css(), "#2563eb");
		assert_eq!(Color::rgba(0, 0, 0, 0.5).to_css(), "rgba(0, 0, 0, 0.500)");
		assert_eq!(Color::rgba(10, 10, 10, 0.8).fade(0.5).a, 0.4);
	}

	#[test]
	fn lighten_and_darken_hit_the_extremes() {
		let c = Color::rgb(100, 50, 0);
		assert_eq!(c.lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(c.darken(1.0), Color::rgb(0, 0, 0));
		assert_eq!(c.lighten(0.0), c);
	}
}
