//! Rust's lazy OAuth 2.0 identity resolver - turn a caller's bearer token into cached emails,
//! usernames, and authorization roles with pluggable transports and transport-aware observability.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod error;
pub mod http;
pub mod obs;
pub mod provider;
pub mod resolver;
pub mod session;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{http::ReqwestJsonClient, provider::ProviderConfig, resolver::AuthnResolver};

	/// Resolver type alias used by reqwest-backed integration tests.
	pub type ReqwestTestResolver = AuthnResolver<ReqwestJsonClient>;

	/// Constructs an [`AuthnResolver`] wired to the crate's default reqwest transport.
	pub fn build_reqwest_test_resolver(config: ProviderConfig) -> ReqwestTestResolver {
		AuthnResolver::with_http_client(config, ReqwestJsonClient::default())
	}

	/// Rewrites `url` to target `base`'s scheme, host, and port while keeping its own path, so
	/// mock backends can serve the crate's default endpoint paths.
	pub fn rehost(url: &Url, base: &Url) -> Url {
		let mut rehosted = url.clone();

		rehosted.set_scheme(base.scheme()).expect("Failed to rewrite the URL scheme for tests.");
		rehosted.set_host(base.host_str()).expect("Failed to rewrite the URL host for tests.");
		rehosted.set_port(base.port()).expect("Failed to rewrite the URL port for tests.");

		rehosted
	}

	/// Builds a provider config whose primary endpoints target `authn_base` with the default
	/// paths kept, and whose authorization service, when provided, targets `authz_base`.
	pub fn test_provider_config(authn_base: &Url, authz_base: Option<&Url>) -> ProviderConfig {
		let defaults = ProviderConfig::default();
		let mut builder = ProviderConfig::builder()
			.login_url(rehost(&defaults.login_url, authn_base))
			.redeem_url(rehost(&defaults.redeem_url, authn_base))
			.profile_url(rehost(&defaults.profile_url, authn_base));

		if let Some(base) = authz_base {
			builder = builder.authz_url(base.clone());
		}

		builder.build()
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
