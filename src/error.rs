//! Resolver-level error types shared across transports, providers, and sessions.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical resolver error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Request construction problem raised before any transport was consulted.
	#[error(transparent)]
	RequestBuild(#[from] RequestBuildError),
	/// Transport failure (network, unexpected status, undecodable body).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Profile payload omitted a required identity field.
	#[error(transparent)]
	MissingField(#[from] MissingFieldError),
	/// Roles payload was not an array of strings.
	#[error(transparent)]
	RolesShape(#[from] RolesShapeError),
}

/// Request construction failures (no network involved).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum RequestBuildError {
	/// Bearer token contains bytes that cannot travel inside an `Authorization` header.
	#[error("Bearer token contains characters that are not allowed in an Authorization header.")]
	MalformedBearerToken,
}

/// Transport-level failures (network, status, decoding).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {endpoint} endpoint.")]
	Network {
		/// Which lookup failed.
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Endpoint answered outside the 2xx range.
	#[error("The {endpoint} endpoint returned HTTP status {status}.")]
	UnexpectedStatus {
		/// Which lookup failed.
		endpoint: &'static str,
		/// HTTP status code returned by the endpoint.
		status: u16,
		/// Truncated response body, when one was returned.
		body_preview: Option<String>,
	},
	/// Endpoint responded with malformed JSON that could not be parsed.
	#[error("The {endpoint} endpoint returned malformed JSON.")]
	MalformedJson {
		/// Which lookup failed.
		endpoint: &'static str,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error, labeling the lookup it interrupted.
	pub fn network(
		endpoint: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}
}

/// Raised when the profile payload lacks a required identity field or its type is wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ThisError)]
#[error("Profile payload field `{field}` is missing or not a string.")]
pub struct MissingFieldError {
	/// Name of the absent or mistyped field.
	pub field: &'static str,
}

/// Raised when the roles payload is not a JSON array of strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ThisError)]
#[error("Roles payload must be a JSON array of strings, found {found}.")]
pub struct RolesShapeError {
	/// JSON type that was actually found.
	pub found: &'static str,
}
