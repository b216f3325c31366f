//! Force-directed canvas for the automation graph.
//!
//! Renders the displayed subgraph on an HTML canvas with:
//! - Physics-based node positioning via force simulation, focal node pinned
//! - Pan, zoom, and node dragging interactions
//! - Neighbour highlighting on hover
//! - Colours by node role and edge relation, flowing dashes on trigger edges
//! - Shift-drag between two nodes to request a manual connection
//!
//! # Example
//!
//! ```ignore
//! use ha_validator::components::force_graph::{CanvasGraph, ForceGraphCanvas};
//!
//! let data = Signal::derive(move || CanvasGraph::from_subgraph(&subgraph, "automation.morning"));
//! let manual = Signal::derive(Vec::new);
//!
//! view! { <ForceGraphCanvas data manual on_connect=|(s, t)| log::info!("{s} -> {t}") /> }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use theme::Theme;
pub use types::{CanvasGraph, CanvasLink, CanvasNode, LinkStyle, NodeRole};
