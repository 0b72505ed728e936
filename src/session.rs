//! Session-scoped identity state mutated by the resolver.

// self
use crate::_prelude::*;

/// Redacted bearer credential wrapper keeping token material out of logs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccessToken(String);
impl AccessToken {
	/// Wraps a caller-supplied bearer token.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for AccessToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessToken").field(&"<redacted>").finish()
	}
}
impl Display for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Mutable per-session identity state owned by the host.
///
/// The resolver treats an empty `email` or `user` as "not yet resolved" and writes each of them
/// at most once per session; `roles` stays `None` until an authorization lookup succeeds. The
/// access token is supplied by the caller and never mutated here. One `SessionState` belongs to
/// one in-flight request; share the resolver, not the session.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
	/// Bearer token presented by the caller.
	pub access_token: AccessToken,
	/// Resolved email address; empty until a profile fetch succeeds.
	pub email: String,
	/// Resolved username (the profile `sub` claim); empty until a profile fetch succeeds.
	pub user: String,
	/// Roles granted by the authorization service; `None` until fetched.
	pub roles: Option<Vec<String>>,
}
impl SessionState {
	/// Creates a session around the caller's bearer token with nothing resolved yet.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self {
			access_token: AccessToken::new(access_token),
			email: String::new(),
			user: String::new(),
			roles: None,
		}
	}

	/// Returns `true` once the email has been resolved.
	pub fn has_email(&self) -> bool {
		!self.email.is_empty()
	}

	/// Returns `true` once the username has been resolved.
	pub fn has_user(&self) -> bool {
		!self.user.is_empty()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn access_token_formatters_redact() {
		let token = AccessToken::new("super-secret");

		assert_eq!(format!("{token:?}"), "AccessToken(\"<redacted>\")");
		assert_eq!(format!("{token}"), "<redacted>");
		assert_eq!(token.expose(), "super-secret");
	}

	#[test]
	fn session_tracks_resolved_fields() {
		let mut session = SessionState::new("token");

		assert!(!session.has_email());
		assert!(!session.has_user());
		assert_eq!(session.roles, None);

		session.email = "user@example.com".into();
		session.user = "user".into();

		assert!(session.has_email());
		assert!(session.has_user());
	}
}
