//! Provider-facing configuration (data) and the resolution contract (behavior).
//!
//! `config` exposes [`ProviderConfig`], the endpoint + scope bundle describing one identity
//! backend along with the localhost defaults used when a field is left unset.
//! [`IdentityProvider`] defines the object-safe contract callers program against: lazily
//! resolve the email or username tied to a session's access token, filling the session's
//! cached identity as a side effect.

pub mod config;
pub use config::*;

// self
use crate::{_prelude::*, session::SessionState};

/// Boxed future returned by [`IdentityProvider`] implementations.
pub type ResolveFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Contract for turning a session's access token into identity facts.
///
/// Implementations resolve lazily: when the session already carries the requested fact the
/// cached value is returned without touching the network, otherwise the backend is queried
/// and the session updated in place. The trait is object safe so callers can hold providers
/// behind `Arc<dyn IdentityProvider>` without naming the transport type.
pub trait IdentityProvider
where
	Self: Send + Sync,
{
	/// Short stable name identifying the provider implementation.
	fn name(&self) -> &'static str;

	/// Endpoint configuration the provider resolves against.
	fn config(&self) -> &ProviderConfig;

	/// Resolves the e-mail address tied to `session`'s access token.
	///
	/// An error means the identity could not be resolved; the session's cached fields are left
	/// untouched so a later call can retry the lookup.
	fn resolve_email<'a>(&'a self, session: &'a mut SessionState) -> ResolveFuture<'a, String>;

	/// Resolves the username tied to `session`'s access token.
	///
	/// An error means the identity could not be resolved; the session's cached fields are left
	/// untouched so a later call can retry the lookup.
	fn resolve_username<'a>(&'a self, session: &'a mut SessionState) -> ResolveFuture<'a, String>;
}
