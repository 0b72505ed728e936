//! Transport primitives for identity lookups.
//!
//! The module exposes [`JsonHttpClient`] as the crate's only dependency on an HTTP stack:
//! implementations execute a [`JsonRequest`] and resolve with the raw status and body. The
//! [`request_json`] helper layers the shared response policy on top so every lookup behaves the
//! same way regardless of transport: network failures are wrapped with the endpoint label,
//! non-2xx statuses surface as errors that name the status, and bodies decode into
//! [`JsonDocument`] values with path-aware parse errors.

// std
use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::AUTHORIZATION;
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	error::{MissingFieldError, RequestBuildError, RolesShapeError, TransportError},
	session::AccessToken,
};

const BODY_PREVIEW_LIMIT: usize = 256;

/// Boxed future returned by [`JsonHttpClient`] implementations.
pub type TransportFuture<'a, E> = Pin<Box<dyn Future<Output = Result<RawResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing identity lookups.
///
/// The trait acts as the resolver's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so a resolver can share them behind `Arc<C>` across many sessions,
/// and the futures they return must be `Send` so resolver futures inherit the same guarantee.
/// Transports only perform the call; status handling and JSON decoding live in [`request_json`],
/// which keeps custom transports from drifting away from the crate's response policy.
pub trait JsonHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Executes a GET request and resolves with the raw response.
	fn execute(&self, request: JsonRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// GET request description dispatched through [`JsonHttpClient`] implementations.
#[derive(Clone, Debug)]
pub struct JsonRequest {
	/// Target URL.
	pub url: Url,
	/// Bearer credential attached as `Authorization: Bearer <token>`, when present.
	pub bearer: Option<AccessToken>,
}
impl JsonRequest {
	/// Builds an anonymous GET request.
	pub fn get(url: Url) -> Self {
		Self { url, bearer: None }
	}

	/// Builds a GET request authenticated with the caller's bearer token.
	///
	/// Tokens containing ASCII control characters cannot travel inside an `Authorization` header
	/// and are rejected before any network activity.
	pub fn bearer(url: Url, token: &AccessToken) -> Result<Self, RequestBuildError> {
		if token.expose().bytes().any(|byte| byte.is_ascii_control()) {
			return Err(RequestBuildError::MalformedBearerToken);
		}

		Ok(Self { url, bearer: Some(token.clone()) })
	}

	/// Renders the `Authorization` header value for the attached credential.
	pub fn authorization_header(&self) -> Option<String> {
		self.bearer.as_ref().map(|token| format!("Bearer {}", token.expose()))
	}
}

/// Raw response surfaced by transports before any decoding takes place.
#[derive(Clone, Debug)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Returns `true` for statuses in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Executes `request` through `client` and decodes the body as JSON.
///
/// `endpoint` labels the lookup in every error this helper produces. Non-2xx statuses become
/// [`TransportError::UnexpectedStatus`], whose message names the status and which carries a
/// truncated body preview for diagnostics.
pub async fn request_json<C>(
	client: &C,
	endpoint: &'static str,
	request: JsonRequest,
) -> Result<JsonDocument>
where
	C: ?Sized + JsonHttpClient,
{
	let response = client
		.execute(request)
		.await
		.map_err(|source| TransportError::network(endpoint, source))?;

	if !response.is_success() {
		return Err(TransportError::UnexpectedStatus {
			endpoint,
			status: response.status,
			body_preview: preview(&response.body),
		}
		.into());
	}

	JsonDocument::from_slice(endpoint, &response.body).map_err(Into::into)
}

/// Parsed JSON payload with the field accessors identity lookups rely on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonDocument(Value);
impl JsonDocument {
	/// Decodes a payload, preserving the JSON path of any parse failure.
	pub fn from_slice(endpoint: &'static str, bytes: &[u8]) -> Result<Self, TransportError> {
		let mut deserializer = serde_json::Deserializer::from_slice(bytes);

		serde_path_to_error::deserialize(&mut deserializer)
			.map(Self)
			.map_err(|source| TransportError::MalformedJson { endpoint, source })
	}

	/// Returns the string stored under `field` at the document root.
	pub fn get_str(&self, field: &'static str) -> Result<&str, MissingFieldError> {
		self.0.get(field).and_then(Value::as_str).ok_or(MissingFieldError { field })
	}

	/// Interprets the document root as an array of strings, preserving order.
	pub fn string_array(&self) -> Result<Vec<String>, RolesShapeError> {
		let Some(items) = self.0.as_array() else {
			return Err(RolesShapeError { found: json_type_name(&self.0) });
		};

		items
			.iter()
			.map(|item| {
				item.as_str()
					.map(str::to_owned)
					.ok_or(RolesShapeError { found: json_type_name(item) })
			})
			.collect()
	}

	/// Borrows the underlying JSON value for provider-specific fields.
	pub fn value(&self) -> &Value {
		&self.0
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Identity endpoints answer lookups directly, so custom clients should disable redirect
/// following to keep bearer headers away from unrelated hosts.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestJsonClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestJsonClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestJsonClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestJsonClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl JsonHttpClient for ReqwestJsonClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: JsonRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let header = request.authorization_header();
			let mut builder = client.get(request.url);

			if let Some(value) = header {
				builder = builder.header(AUTHORIZATION, value);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(RawResponse { status, body })
		})
	}
}

fn preview(body: &[u8]) -> Option<String> {
	if body.is_empty() {
		return None;
	}

	let text = String::from_utf8_lossy(body);

	if text.chars().count() <= BODY_PREVIEW_LIMIT {
		return Some(text.into_owned());
	}

	let mut buf = String::new();

	for (idx, ch) in text.chars().enumerate() {
		if idx >= BODY_PREVIEW_LIMIT {
			buf.push('…');

			break;
		}
		buf.push(ch);
	}

	Some(buf)
}

fn json_type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	struct CannedClient {
		status: u16,
		body: &'static str,
	}
	impl JsonHttpClient for CannedClient {
		type TransportError = std::convert::Infallible;

		fn execute(&self, _request: JsonRequest) -> TransportFuture<'_, Self::TransportError> {
			let response = RawResponse { status: self.status, body: self.body.as_bytes().to_vec() };

			Box::pin(async move { Ok(response) })
		}
	}

	fn lookup_url() -> Url {
		Url::parse("http://localhost:45101/oauth/r/api/v1/user/details")
			.expect("Failed to parse lookup URL fixture.")
	}

	#[tokio::test]
	async fn request_json_names_the_status_on_failure() {
		let client = CannedClient { status: 503, body: "upstream unavailable" };
		let err = request_json(&client, "profile", JsonRequest::get(lookup_url()))
			.await
			.expect_err("Non-2xx statuses should surface as errors.");

		assert!(matches!(
			&err,
			Error::Transport(TransportError::UnexpectedStatus {
				endpoint: "profile",
				status: 503,
				..
			})
		));
		assert!(err.to_string().contains("503"));
	}

	#[tokio::test]
	async fn request_json_decodes_success_bodies() {
		let client = CannedClient { status: 200, body: r#"{"email":"abc.d@x.com","sub":"abc.d"}"# };
		let document = request_json(&client, "profile", JsonRequest::get(lookup_url()))
			.await
			.expect("2xx JSON bodies should decode.");

		assert_eq!(document.get_str("email"), Ok("abc.d@x.com"));
		assert_eq!(document.get_str("sub"), Ok("abc.d"));
	}

	#[tokio::test]
	async fn request_json_rejects_undecodable_bodies() {
		let client = CannedClient { status: 200, body: "not json at all" };
		let err = request_json(&client, "roles", JsonRequest::get(lookup_url()))
			.await
			.expect_err("Undecodable bodies should surface as errors.");

		assert!(matches!(
			err,
			Error::Transport(TransportError::MalformedJson { endpoint: "roles", .. })
		));
	}

	#[test]
	fn document_reports_missing_and_mistyped_fields() {
		let document = JsonDocument::from_slice("profile", br#"{"email":42}"#)
			.expect("Fixture payload should decode.");

		assert_eq!(document.get_str("email"), Err(MissingFieldError { field: "email" }));
		assert_eq!(document.get_str("sub"), Err(MissingFieldError { field: "sub" }));
	}

	#[test]
	fn string_array_preserves_order_and_rejects_other_shapes() {
		let roles = JsonDocument::from_slice("roles", br#"["abc","def"]"#)
			.expect("Roles fixture should decode.")
			.string_array()
			.expect("Array-of-strings payloads should convert.");

		assert_eq!(roles, ["abc", "def"]);

		let err = JsonDocument::from_slice("roles", br#"{"abc":"def"}"#)
			.expect("Object fixture should decode.")
			.string_array()
			.expect_err("Objects are not arrays of strings.");

		assert_eq!(err, RolesShapeError { found: "an object" });

		let err = JsonDocument::from_slice("roles", br#"["abc",7]"#)
			.expect("Mixed fixture should decode.")
			.string_array()
			.expect_err("Arrays with non-string items should be rejected.");

		assert_eq!(err, RolesShapeError { found: "a number" });
	}

	#[test]
	fn bearer_requests_reject_control_characters() {
		let err = JsonRequest::bearer(lookup_url(), &AccessToken::new("bad\ntoken"))
			.expect_err("Control characters cannot travel in an Authorization header.");

		assert_eq!(err, RequestBuildError::MalformedBearerToken);

		let request = JsonRequest::bearer(lookup_url(), &AccessToken::new("good-token"))
			.expect("Plain tokens should build.");

		assert_eq!(request.authorization_header().as_deref(), Some("Bearer good-token"));
	}

	#[test]
	fn preview_truncates_long_bodies() {
		assert_eq!(preview(b""), None);
		assert_eq!(preview(b"short").as_deref(), Some("short"));

		let long = "x".repeat(BODY_PREVIEW_LIMIT + 10);
		let truncated = preview(long.as_bytes()).expect("Non-empty bodies should preview.");

		assert_eq!(truncated.chars().count(), BODY_PREVIEW_LIMIT + 1);
		assert!(truncated.ends_with('…'));
	}
}
