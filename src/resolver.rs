//! Lazy identity resolution against the authentication service.
//!
//! [`AuthnResolver`] turns a session's bearer token into identity facts on demand. The first
//! successful resolution fills the session's cached e-mail, username, and roles; later calls
//! answer from that cache without touching the network. A failed attempt leaves the session
//! untouched so the next call retries the lookup. Roles are best-effort enrichment: the
//! profile lookup must succeed, while a roles failure is logged and discarded.

mod metrics;
pub use metrics::ResolveMetrics;

// crates.io
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	http::{self, JsonHttpClient, JsonRequest},
	obs::{self, FetchKind, FetchOutcome, FetchSpan},
	provider::{IdentityProvider, ProviderConfig, ROLES_PATH, ROLES_USER_PARAM, ResolveFuture},
	session::SessionState,
};
#[cfg(feature = "reqwest")]
use crate::http::ReqwestJsonClient;

/// Stable provider name reported through [`IdentityProvider::name`].
pub const PROVIDER_NAME: &str = "authn";

#[cfg(feature = "reqwest")]
/// Resolver specialized for the crate's default reqwest transport.
pub type ReqwestResolver = AuthnResolver<ReqwestJsonClient>;

/// Resolves identity facts for sessions authenticated against one backend.
///
/// The resolver owns the endpoint configuration and a shared transport so callers can clone it
/// cheaply across tasks. Construction never validates endpoints or touches the network; work
/// only happens inside [`AuthnResolver::resolve_email`] and [`AuthnResolver::resolve_username`],
/// and only when the session does not already carry the requested fact.
#[derive(Clone)]
pub struct AuthnResolver<C>
where
	C: ?Sized + JsonHttpClient,
{
	/// Endpoint + scope bundle the resolver queries.
	pub config: ProviderConfig,
	/// HTTP client wrapper used for every outbound lookup.
	pub http_client: Arc<C>,
	/// Shared metrics recorder for lookup outcomes.
	pub metrics: Arc<ResolveMetrics>,
}
impl<C> AuthnResolver<C>
where
	C: ?Sized + JsonHttpClient,
{
	/// Creates a resolver that reuses the caller-provided transport.
	pub fn with_http_client(config: ProviderConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self { config, http_client: http_client.into(), metrics: Default::default() }
	}

	/// Returns the e-mail address tied to `session`'s access token.
	///
	/// Answers from the session cache when possible, otherwise fetches the profile (and, when
	/// configured, roles) and caches the result on the session.
	pub async fn resolve_email(&self, session: &mut SessionState) -> Result<String> {
		if session.has_email() {
			self.metrics.record_cache_hit();

			return Ok(session.email.clone());
		}

		self.fetch_details(session).await?;

		Ok(session.email.clone())
	}

	/// Returns the username tied to `session`'s access token.
	///
	/// Answers from the session cache when possible, otherwise fetches the profile (and, when
	/// configured, roles) and caches the result on the session.
	pub async fn resolve_username(&self, session: &mut SessionState) -> Result<String> {
		if session.has_user() {
			self.metrics.record_cache_hit();

			return Ok(session.user.clone());
		}

		self.fetch_details(session).await?;

		Ok(session.user.clone())
	}

	/// Runs the full lookup pipeline: profile first, then roles.
	///
	/// Both profile fields are extracted before either is committed, so a payload missing `sub`
	/// leaves the session's e-mail untouched as well. A profile failure aborts the pipeline;
	/// a roles failure is logged and discarded.
	async fn fetch_details(&self, session: &mut SessionState) -> Result<()> {
		const KIND: FetchKind = FetchKind::Profile;

		let span = FetchSpan::new(KIND, "fetch_details");

		obs::record_fetch_outcome(KIND, FetchOutcome::Attempt);
		self.metrics.record_profile_fetch();

		let result: Result<()> = span
			.instrument(async {
				let request =
					JsonRequest::bearer(self.config.profile_url.clone(), &session.access_token)?;
				let document =
					http::request_json(self.http_client.as_ref(), KIND.as_str(), request).await?;
				let email = document.get_str("email")?.to_owned();
				let user = document.get_str("sub")?.to_owned();

				session.email = email;
				session.user = user;

				Ok(())
			})
			.await;

		match &result {
			Ok(_) => obs::record_fetch_outcome(KIND, FetchOutcome::Success),
			Err(_) => {
				self.metrics.record_profile_failure();
				obs::record_fetch_outcome(KIND, FetchOutcome::Failure);
			},
		}

		result?;

		if let Err(error) = self.fetch_roles(session).await {
			self.metrics.record_roles_discard();
			obs::warn_roles_discarded(&error);
		}

		Ok(())
	}

	/// Fetches the roles list from the authorization service.
	///
	/// A no-op when no `authz_url` is configured. The lookup is anonymous: the bearer token is
	/// never forwarded to the authorization service.
	async fn fetch_roles(&self, session: &mut SessionState) -> Result<()> {
		const KIND: FetchKind = FetchKind::Roles;

		let Some(authz_url) = self.config.authz_url.as_ref() else {
			return Ok(());
		};
		let span = FetchSpan::new(KIND, "fetch_roles");

		obs::record_fetch_outcome(KIND, FetchOutcome::Attempt);

		let result = span
			.instrument(async {
				let request = JsonRequest::get(roles_url(authz_url, &session.user));
				let document =
					http::request_json(self.http_client.as_ref(), KIND.as_str(), request).await?;

				session.roles = Some(document.string_array()?);

				Ok(())
			})
			.await;

		match &result {
			Ok(_) => obs::record_fetch_outcome(KIND, FetchOutcome::Success),
			Err(_) => obs::record_fetch_outcome(KIND, FetchOutcome::Failure),
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl AuthnResolver<ReqwestJsonClient> {
	/// Creates a new resolver for the provided endpoint configuration.
	///
	/// The resolver provisions its own reqwest-backed transport so callers do not need to pass
	/// HTTP handles explicitly. Use [`AuthnResolver::with_http_client`] to supply a tuned client
	/// or a custom transport instead.
	pub fn new(config: ProviderConfig) -> Self {
		Self::with_http_client(config, ReqwestJsonClient::default())
	}
}
impl<C> IdentityProvider for AuthnResolver<C>
where
	C: ?Sized + JsonHttpClient,
{
	fn name(&self) -> &'static str {
		PROVIDER_NAME
	}

	fn config(&self) -> &ProviderConfig {
		&self.config
	}

	fn resolve_email<'a>(&'a self, session: &'a mut SessionState) -> ResolveFuture<'a, String> {
		Box::pin(self.resolve_email(session))
	}

	fn resolve_username<'a>(&'a self, session: &'a mut SessionState) -> ResolveFuture<'a, String> {
		Box::pin(self.resolve_username(session))
	}
}
impl<C> Debug for AuthnResolver<C>
where
	C: ?Sized + JsonHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthnResolver").field("config", &self.config).finish()
	}
}

fn roles_url(base: &Url, user: &str) -> Url {
	let query = form_urlencoded::Serializer::new(String::new())
		.append_pair(ROLES_USER_PARAM, user)
		.finish();
	let mut url = base.clone();

	url.set_path(ROLES_PATH);
	url.set_query(Some(&query));

	url
}
