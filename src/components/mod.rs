//! UI components.

pub mod dashboard;
pub mod force_graph;
