//! Automation-focused graph derivation.
//!
//! Everything in here is a pure function of the dataset returned by the
//! backend plus the user's current selection. Nothing touches the DOM, so the
//! whole module is exercised by native unit tests.
//!
//! - [`candidates`]: which nodes can be picked as the focal automation
//! - [`filter`]: the focal node plus its immediate neighbours
//! - [`integrity`]: dropping edges whose endpoints are missing
//! - [`overlay`]: view-only connections drawn by hand
//! - [`explorer`]: the single-writer container tying dataset and selection together

pub mod candidates;
pub mod explorer;
pub mod filter;
pub mod integrity;
pub mod overlay;
mod types;

pub use candidates::{AutomationCandidate, automation_candidates, default_selection, is_automation};
pub use explorer::{Explorer, LoadReport, LoadTicket, ViewPhase};
pub use filter::{Subgraph, neighborhood};
pub use overlay::{ManualEdge, Overlay};
pub use types::{GraphData, GraphEdge, GraphNode};
