//! Token endpoint response carrier.

// self
use crate::{_prelude::*, auth::SecretString, error::ProviderError};

/// Decoded token endpoint response.
///
/// Beyond `access_token` (and an optional `token_type`) the payload is opaque to the
/// relay: it is retained verbatim and passed through to the verification callback, which
/// may care about provider-specific fields the relay does not model.
#[derive(Clone)]
pub struct TokenResponse {
	access_token: SecretString,
	token_type: Option<String>,
	raw: Value,
}
impl TokenResponse {
	/// Extracts the token response from a decoded payload.
	///
	/// The payload must carry a string `access_token` field; everything else is retained
	/// untouched.
	pub(crate) fn from_payload(raw: Value) -> Result<Self, ProviderError> {
		let access_token = raw
			.get("access_token")
			.and_then(Value::as_str)
			.map(SecretString::from)
			.ok_or(ProviderError::MissingAccessToken)?;
		let token_type = raw.get("token_type").and_then(Value::as_str).map(str::to_owned);

		Ok(Self { access_token, token_type, raw })
	}

	/// Access token issued by the provider.
	pub fn access_token(&self) -> &SecretString {
		&self.access_token
	}

	/// Declared token type, when the provider sent one.
	pub fn token_type(&self) -> Option<&str> {
		self.token_type.as_deref()
	}

	/// Full decoded payload as received from the provider.
	///
	/// The payload contains the access token in the clear; callers must not log it.
	pub fn raw(&self) -> &Value {
		&self.raw
	}

	/// Looks up an arbitrary payload field.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.raw.get(name)
	}
}
impl Debug for TokenResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenResponse")
			.field("access_token", &self.access_token)
			.field("token_type", &self.token_type)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn payload_extraction_keeps_extras() {
		let payload = serde_json::json!({
			"access_token": "tok123",
			"token_type": "bearer",
			"id_token": "opaque",
		});
		let response =
			TokenResponse::from_payload(payload).expect("Payload fixture should extract.");

		assert_eq!(response.access_token().expose(), "tok123");
		assert_eq!(response.token_type(), Some("bearer"));
		assert_eq!(response.field("id_token"), Some(&Value::String("opaque".into())));
	}

	#[test]
	fn missing_access_token_errors() {
		let err = TokenResponse::from_payload(serde_json::json!({ "token_type": "bearer" }))
			.expect_err("Missing access token must be rejected.");

		assert!(matches!(err, ProviderError::MissingAccessToken));
	}

	#[test]
	fn debug_redacts_the_token() {
		let response = TokenResponse::from_payload(serde_json::json!({ "access_token": "tok" }))
			.expect("Payload fixture should extract.");
		let rendered = format!("{response:?}");

		assert!(!rendered.contains("tok\""), "Debug output must not reveal the token.");
		assert!(rendered.contains("<redacted>"));
	}
}
