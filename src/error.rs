//! Relay-level error types shared across flows, providers, and transports.

// self
use crate::{_prelude::*, provider::EndpointKind};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error type carried by transport and verifier failures.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical relay error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; raised at construction time, never mid-flow.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Provider-side protocol failure carrying provider-supplied detail.
	#[error(transparent)]
	Provider(#[from] ProviderError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// External verification callback failed.
	#[error(transparent)]
	Verify(#[from] VerifyError),
}

/// Configuration and validation failures raised by the relay.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Provider descriptor failed validation.
	#[error(transparent)]
	Descriptor(#[from] crate::provider::DescriptorError),
}

/// Provider protocol failures; each carries the provider-supplied diagnostic payload.
///
/// These are distinct from [`TransportError`]: the provider answered, but outside the
/// protocol's happy path. They are surfaced as-is and never retried.
#[derive(Debug, ThisError)]
pub enum ProviderError {
	/// Provider returned an `error` parameter at the authorization callback.
	#[error("Provider returned `{error}` at the authorization callback.")]
	Callback {
		/// OAuth `error` code reported by the provider.
		error: String,
		/// Entire callback query payload, kept as diagnostic detail.
		params: BTreeMap<String, String>,
	},
	/// Endpoint answered with a non-success status; the decoded body is the error payload.
	#[error("{}", endpoint_failure(.endpoint, .status, .body))]
	Endpoint {
		/// Endpoint that rejected the request.
		endpoint: EndpointKind,
		/// HTTP status returned by the provider.
		status: u16,
		/// Decoded response body.
		body: Value,
	},
	/// Successful response body could not be decoded with the declared parser.
	#[error("The {endpoint} endpoint returned a malformed payload.")]
	Decode {
		/// Endpoint that produced the payload.
		endpoint: EndpointKind,
		/// Structured parsing failure.
		#[source]
		source: DecodeError,
	},
	/// Token endpoint returned success without an `access_token` field.
	#[error("The token endpoint response is missing `access_token`.")]
	MissingAccessToken,
	/// User endpoint returned something other than a JSON object.
	#[error("The user endpoint returned a non-object profile payload.")]
	NonObjectProfile,
}

/// Structured body-decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Payload is not valid JSON.
	#[error(transparent)]
	Json(#[from] serde_path_to_error::Error<serde_json::Error>),
	/// Payload is not valid UTF-8.
	#[error(transparent)]
	Utf8(#[from] std::str::Utf8Error),
}

/// Transport-level failures (network, IO). Retry policy belongs to the host, not here.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failure raised by the external verification callback, as opposed to the callback
/// rejecting the user.
#[derive(Debug, ThisError)]
#[error("Verification callback failed.")]
pub struct VerifyError {
	/// Error reported by the callback.
	#[source]
	pub source: BoxError,
}

fn endpoint_failure(endpoint: &EndpointKind, status: &u16, body: &Value) -> String {
	match body.get("error").and_then(Value::as_str) {
		Some(error) => format!("The {endpoint} endpoint rejected the request: {error}."),
		None => format!("The {endpoint} endpoint returned HTTP {status}."),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn endpoint_display_prefers_error_field() {
		let err = ProviderError::Endpoint {
			endpoint: EndpointKind::User,
			status: 401,
			body: serde_json::json!({ "error": "invalid_token" }),
		};

		assert_eq!(err.to_string(), "The user endpoint rejected the request: invalid_token.");

		let err = ProviderError::Endpoint {
			endpoint: EndpointKind::Token,
			status: 502,
			body: Value::String("upstream down".into()),
		};

		assert_eq!(err.to_string(), "The token endpoint returned HTTP 502.");
	}
}
