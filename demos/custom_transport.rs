//! Demonstrates wiring a custom transport into the resolver.
//!
//! 1. Implement [`JsonHttpClient`] for a type that executes [`JsonRequest`]s however it likes.
//! 2. Hand the transport to [`AuthnResolver::with_http_client`].
//! 3. Watch transport failures and unexpected statuses come back through the resolver's error
//!    type with the endpoint label attached.

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
};
// crates.io
use color_eyre::Result;
use url::Url;
// self
use identity_resolver::{
	http::{JsonHttpClient, JsonRequest, RawResponse, TransportFuture},
	provider::ProviderConfig,
	resolver::AuthnResolver,
	session::SessionState,
};

const PROFILE_BODY: &[u8] = b"{\"email\":\"demo.user@example.com\",\"sub\":\"demo.user\"}";
const ROLES_BODY: &[u8] = b"[\"demo.read\",\"demo.write\"]";

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let authz_url: Url = "http://authz.local".parse()?;
	let config = ProviderConfig::builder().authz_url(authz_url).build();
	let resolver = AuthnResolver::with_http_client(config, MockJsonClient::success());
	let mut session = SessionState::new("demo-access-token");
	let email = resolver.resolve_email(&mut session).await?;

	println!("E-mail resolved through the mock transport: {email}.");
	println!("Username cached by the same lookup: {}.", session.user);
	println!("Roles cached by the same lookup: {:?}.", session.roles);

	let failing_resolver = AuthnResolver::with_http_client(
		ProviderConfig::default(),
		MockJsonClient::transport_error(MockTransportError::DnsFailure { host: "localhost" }),
	);
	let mut failing_session = SessionState::new("demo-access-token");

	match failing_resolver.resolve_email(&mut failing_session).await {
		Ok(_) => println!("Mock transport unexpectedly succeeded."),
		Err(e) => println!("Transport error mapped by the resolver: {e}"),
	}

	let missing_resolver =
		AuthnResolver::with_http_client(ProviderConfig::default(), MockJsonClient::not_found());
	let mut missing_session = SessionState::new("demo-access-token");

	match missing_resolver.resolve_email(&mut missing_session).await {
		Ok(_) => println!("Mock transport unexpectedly resolved an identity."),
		Err(e) => println!("Unexpected status mapped by the resolver: {e}"),
	}

	Ok(())
}

#[derive(Clone, Debug)]
enum MockTransportError {
	DnsFailure {
		host: &'static str,
	},
	#[allow(unused)]
	BackendTimeout,
}
impl Display for MockTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::DnsFailure { host } => write!(f, "DNS lookup failed for {host}"),
			Self::BackendTimeout => write!(f, "Profile endpoint timed out"),
		}
	}
}
impl StdError for MockTransportError {}

#[derive(Clone)]
enum MockBehavior {
	Success,
	TransportError(MockTransportError),
	NotFound,
}

#[derive(Clone)]
struct MockJsonClient {
	behavior: MockBehavior,
}
impl MockJsonClient {
	fn success() -> Self {
		Self { behavior: MockBehavior::Success }
	}

	fn transport_error(error: MockTransportError) -> Self {
		Self { behavior: MockBehavior::TransportError(error) }
	}

	fn not_found() -> Self {
		Self { behavior: MockBehavior::NotFound }
	}
}
impl JsonHttpClient for MockJsonClient {
	type TransportError = MockTransportError;

	fn execute(&self, request: JsonRequest) -> TransportFuture<'_, Self::TransportError> {
		let behavior = self.behavior.clone();

		Box::pin(async move {
			match behavior {
				MockBehavior::Success => {
					if request.url.path() == "/roles" {
						Ok(RawResponse { status: 200, body: ROLES_BODY.to_vec() })
					} else {
						Ok(RawResponse { status: 200, body: PROFILE_BODY.to_vec() })
					}
				},
				MockBehavior::TransportError(error) => Err(error),
				MockBehavior::NotFound => {
					Ok(RawResponse { status: 404, body: b"user not found".to_vec() })
				},
			}
		})
	}
}
