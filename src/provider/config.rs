//! Identity backend endpoints and the builder that fills in their defaults.

// self
use crate::_prelude::*;

/// Default authorization (login) endpoint.
pub const DEFAULT_LOGIN_URL: &str = "http://localhost:45101/oauth/authorize";
/// Default token redemption endpoint.
pub const DEFAULT_REDEEM_URL: &str = "http://localhost:45101/oauth/token";
/// Default profile details endpoint.
pub const DEFAULT_PROFILE_URL: &str = "http://localhost:45101/oauth/r/api/v1/user/details";
/// Default scope requested during login.
pub const DEFAULT_SCOPE: &str = "user.profile";
/// Path substituted onto the authorization endpoint for roles lookups.
pub const ROLES_PATH: &str = "/roles";
/// Query parameter carrying the username in roles lookups.
pub const ROLES_USER_PARAM: &str = "user_id";

/// Endpoint + scope bundle describing one identity backend.
///
/// Every endpoint except `authz_url` falls back to a localhost default when left unset, so a
/// config built with [`ProviderConfig::default`] talks to a locally running backend out of the
/// box. `authz_url` has no default: without it, roles lookups are skipped entirely.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
	/// Authorization (login) endpoint users are redirected to.
	pub login_url: Url,
	/// Token redemption endpoint.
	pub redeem_url: Url,
	/// Profile details endpoint answering bearer-authenticated lookups.
	pub profile_url: Url,
	/// Authorization service base for roles lookups; `None` disables them.
	pub authz_url: Option<Url>,
	/// Scope requested during login.
	pub scope: String,
}
impl ProviderConfig {
	/// Starts building a config from the localhost defaults.
	pub fn builder() -> ProviderConfigBuilder {
		ProviderConfigBuilder::default()
	}
}
impl Default for ProviderConfig {
	fn default() -> Self {
		Self::builder().build()
	}
}

/// Builder for [`ProviderConfig`].
#[derive(Clone, Debug, Default)]
pub struct ProviderConfigBuilder {
	/// Authorization (login) endpoint override.
	pub login_url: Option<Url>,
	/// Token redemption endpoint override.
	pub redeem_url: Option<Url>,
	/// Profile details endpoint override.
	pub profile_url: Option<Url>,
	/// Authorization service base for roles lookups.
	pub authz_url: Option<Url>,
	/// Scope override; empty strings fall back to the default scope.
	pub scope: Option<String>,
}
impl ProviderConfigBuilder {
	/// Sets the authorization (login) endpoint.
	pub fn login_url(mut self, login_url: Url) -> Self {
		self.login_url = Some(login_url);

		self
	}

	/// Sets the token redemption endpoint.
	pub fn redeem_url(mut self, redeem_url: Url) -> Self {
		self.redeem_url = Some(redeem_url);

		self
	}

	/// Sets the profile details endpoint.
	pub fn profile_url(mut self, profile_url: Url) -> Self {
		self.profile_url = Some(profile_url);

		self
	}

	/// Sets the authorization service base, enabling roles lookups.
	pub fn authz_url(mut self, authz_url: Url) -> Self {
		self.authz_url = Some(authz_url);

		self
	}

	/// Sets the scope requested during login.
	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Finalizes the config, substituting defaults for every unset field except `authz_url`.
	pub fn build(self) -> ProviderConfig {
		ProviderConfig {
			login_url: self.login_url.unwrap_or_else(|| default_url(DEFAULT_LOGIN_URL)),
			redeem_url: self.redeem_url.unwrap_or_else(|| default_url(DEFAULT_REDEEM_URL)),
			profile_url: self.profile_url.unwrap_or_else(|| default_url(DEFAULT_PROFILE_URL)),
			authz_url: self.authz_url,
			scope: match self.scope {
				Some(scope) if !scope.is_empty() => scope,
				_ => DEFAULT_SCOPE.into(),
			},
		}
	}
}

fn default_url(raw: &'static str) -> Url {
	raw.parse().expect("Hard-coded default endpoints always parse.")
}
