//! Per-deployment client registration data.

// self
use crate::{
	_prelude::*,
	auth::{ScopeList, SecretString},
};

/// Credentials and scope extensions a deployment registered with a provider.
///
/// `client_id` and `client_secret` may be empty strings but are always present. The
/// secret never appears in `Debug` output.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientRegistration {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Client secret for confidential authentication methods.
	pub client_secret: SecretString,
	/// Scopes appended after the descriptor's defaults, order-preserving and not
	/// deduplicated.
	#[serde(default)]
	pub scope: ScopeList,
}
impl ClientRegistration {
	/// Creates a registration with no scope extensions.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<SecretString>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			scope: ScopeList::default(),
		}
	}

	/// Declares scopes requested on top of the descriptor defaults.
	pub fn with_scope(mut self, scope: ScopeList) -> Self {
		self.scope = scope;

		self
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn debug_redacts_the_secret() {
		let registration = ClientRegistration::new("client-1", "hunter2");
		let rendered = format!("{registration:?}");

		assert!(!rendered.contains("hunter2"));
		assert!(rendered.contains("client-1"));
	}
}
