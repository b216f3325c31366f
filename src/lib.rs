//! ha-validator: dashboard for inspecting Home Assistant automation graphs.
//!
//! This crate provides a WASM client that fetches the entity/automation graph
//! from the validator backend, narrows it to one automation's neighbourhood,
//! and renders the result with physics-based layout, pan/zoom and hover effects.
//! The filtering core in [`graph`] has no browser dependencies.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod graph;

pub use api::ApiClient;
pub use components::dashboard::Dashboard;
pub use config::AppConfig;
pub use error::ApiError;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("ha-validator: logging initialized");
}

/// Main application component.
/// Reads the runtime config from the DOM and renders the dashboard.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = AppConfig::load();
	info!("ha-validator: using backend {}", config.api_url);

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="HA Validator" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Dashboard client=ApiClient::new(config) />
	}
}
