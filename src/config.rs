//! Runtime configuration for the dashboard.
//!
//! The backend URL is resolved, in order, from a JSON script element with
//! id="app-config" in the host page, the `HA_VALIDATOR_API_URL` variable at
//! build time, and finally `http://localhost:8000`.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// Backend URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Dashboard settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
	/// Base URL of the validator backend, without trailing slash.
	#[serde(default = "build_time_api_url")]
	pub api_url: String,
}

fn build_time_api_url() -> String {
	option_env!("HA_VALIDATOR_API_URL")
		.unwrap_or(DEFAULT_API_URL)
		.to_string()
}

impl Default for AppConfig {
	fn default() -> Self {
		Self::with_api_url(build_time_api_url())
	}
}

impl AppConfig {
	/// Config pointing at `api_url`.
	pub fn with_api_url(api_url: impl Into<String>) -> Self {
		let api_url: String = api_url.into();
		Self {
			api_url: api_url.trim_end_matches('/').to_string(),
		}
	}

	/// Parses the JSON embedded in the host page.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		let parsed: AppConfig = serde_json::from_str(text)?;
		Ok(Self::with_api_url(parsed.api_url))
	}

	/// Reads the config element from the DOM, falling back to the default.
	pub fn load() -> Self {
		let Some(text) = config_script_text() else {
			return Self::default();
		};
		match Self::from_json(&text) {
			Ok(config) => {
				info!("ha-validator: backend at {}", config.api_url);
				config
			}
			Err(e) => {
				warn!("ha-validator: ignoring malformed app-config: {}", e);
				Self::default()
			}
		}
	}

	/// Full URL for a backend path such as `/api/graph`.
	pub fn endpoint(&self, path: &str) -> String {
		format!("{}/{}", self.api_url, path.trim_start_matches('/'))
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("app-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn trims_trailing_slashes() {
		let config = AppConfig::with_api_url("http://ha.local:8000//");
		assert_eq!(config.api_url, "http://ha.local:8000");
		assert_eq!(config.endpoint("/api/graph"), "http://ha.local:8000/api/graph");
		assert_eq!(config.endpoint("health"), "http://ha.local:8000/health");
	}

	#[test]
	fn parses_embedded_json() {
		let config = AppConfig::from_json(r#"{ "api_url": "https://validator.example/" }"#).unwrap();
		assert_eq!(config.api_url, "https://validator.example");
	}

	#[test]
	fn missing_url_uses_build_time_default() {
		let config = AppConfig::from_json("{}").unwrap();
		assert_eq!(config, AppConfig::default());
		assert!(AppConfig::from_json("not json").is_err());
	}
}
