//! Demonstrates resolving a session's e-mail, username, and roles with the default reqwest
//! transport against a mock authentication backend.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use identity_resolver::{provider::ProviderConfig, resolver::AuthnResolver, session::SessionState};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let profile_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/oauth/r/api/v1/user/details")
				.header("authorization", "Bearer demo-access-token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"email\":\"demo.user@example.com\",\"sub\":\"demo.user\"}");
		})
		.await;
	let roles_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/roles").query_param("user_id", "demo.user");
			then.status(200)
				.header("content-type", "application/json")
				.body("[\"billing.read\",\"billing.write\"]");
		})
		.await;
	let config = ProviderConfig::builder()
		.profile_url(Url::parse(&server.url("/oauth/r/api/v1/user/details"))?)
		.authz_url(Url::parse(&server.base_url())?)
		.build();
	let resolver = AuthnResolver::new(config);
	let mut session = SessionState::new("demo-access-token");
	let email = resolver.resolve_email(&mut session).await?;
	let user = resolver.resolve_username(&mut session).await?;

	println!("Resolved e-mail: {email}.");
	println!("Resolved username: {user}.");
	println!("Roles from the authorization service: {:?}.", session.roles);
	println!("Lookups answered from the session cache: {}.", resolver.metrics.cache_hits());

	profile_mock.assert_async().await;
	roles_mock.assert_async().await;

	Ok(())
}
