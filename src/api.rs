//! HTTP client for the validator backend.
//!
//! Three endpoints are used: the health probe, the graph snapshot, and the
//! sync trigger that re-ingests Home Assistant state. Requests go through
//! gloo-net in the browser; native builds only exist for unit tests and get
//! stubs that report a network error.

use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::graph::GraphData;

/// Response of `GET /health`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
	/// `"ok"` when healthy.
	pub status: String,
}

impl HealthResponse {
	/// True if the backend reports itself healthy.
	pub fn is_ok(&self) -> bool {
		self.status == "ok"
	}
}

/// Counts returned by `POST /api/sync`. Display only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SyncSummary {
	/// Entities ingested from Home Assistant.
	pub entity_count: u64,
	/// Automations ingested from Home Assistant.
	pub automation_count: u64,
}

/// Thin client bound to one backend base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
	config: AppConfig,
}

impl ApiClient {
	/// Client for the backend named by `config`.
	pub fn new(config: AppConfig) -> Self {
		Self { config }
	}

	/// URL of the health probe.
	pub fn health_url(&self) -> String {
		self.config.endpoint("/health")
	}

	/// URL of the graph snapshot.
	pub fn graph_url(&self) -> String {
		self.config.endpoint("/api/graph")
	}

	/// URL of the sync trigger.
	pub fn sync_url(&self) -> String {
		self.config.endpoint("/api/sync")
	}

	/// Probe backend health.
	pub async fn health(&self) -> Result<HealthResponse, ApiError> {
		transport::get_json(&self.health_url()).await
	}

	/// Fetch the full graph snapshot.
	pub async fn fetch_graph(&self) -> Result<GraphData, ApiError> {
		transport::get_json(&self.graph_url()).await
	}

	/// Ask the backend to re-ingest entities and automations.
	pub async fn trigger_sync(&self) -> Result<SyncSummary, ApiError> {
		transport::post_json(&self.sync_url()).await
	}
}

#[cfg(target_arch = "wasm32")]
mod transport {
	use gloo_net::http::{Request, Response};
	use serde::de::DeserializeOwned;

	use crate::error::ApiError;

	pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
		let resp = Request::get(url)
			.send()
			.await
			.map_err(|e| ApiError::Network(e.to_string()))?;
		read_json(resp).await
	}

	pub async fn post_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
		let resp = Request::post(url)
			.send()
			.await
			.map_err(|e| ApiError::Network(e.to_string()))?;
		read_json(resp).await
	}

	async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
		if !resp.ok() {
			return Err(ApiError::Status {
				status: resp.status(),
				status_text: resp.status_text(),
			});
		}
		resp.json::<T>()
			.await
			.map_err(|e| ApiError::Decode(e.to_string()))
	}
}

#[cfg(not(target_arch = "wasm32"))]
mod transport {
	use serde::de::DeserializeOwned;

	use crate::error::ApiError;

	pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
		Err(unsupported(url))
	}

	pub async fn post_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
		Err(unsupported(url))
	}

	fn unsupported(url: &str) -> ApiError {
		ApiError::Network(format!("{url}: HTTP is only available in the browser"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoints_follow_config() {
		let client = ApiClient::new(AppConfig::with_api_url("http://localhost:8000/"));
		assert_eq!(client.health_url(), "http://localhost:8000/health");
		assert_eq!(client.graph_url(), "http://localhost:8000/api/graph");
		assert_eq!(client.sync_url(), "http://localhost:8000/api/sync");
	}

	#[test]
	fn decodes_response_bodies() {
		let health: HealthResponse = serde_json::from_str(r#"{ "status": "ok" }"#).unwrap();
		assert!(health.is_ok());

		let summary: SyncSummary =
			serde_json::from_str(r#"{ "entity_count": 412, "automation_count": 17 }"#).unwrap();
		assert_eq!(
			summary,
			SyncSummary {
				entity_count: 412,
				automation_count: 17,
			}
		);
	}
}
