//! Errors raised at the backend boundary.
//!
//! The graph core is total and has no error type. Only the HTTP calls in
//! [`crate::api`] can fail, and the dashboard turns these into status text.

use thiserror::Error;

/// Failure of a request to the validator backend.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
	/// The request never produced a response.
	#[error("network error: {0}")]
	Network(String),

	/// The backend answered with a non-2xx status.
	#[error("HTTP {status}: {status_text}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Reason phrase sent with the status.
		status_text: String,
	},

	/// The response body was not the expected JSON.
	#[error("JSON parse error: {0}")]
	Decode(String),
}
