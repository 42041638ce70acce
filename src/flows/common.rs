//! Shared helpers for flow stages (credential encoding, scope rendering, body decoding).

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::ClientRegistration,
	error::ProviderError,
	provider::{BodyParser, EndpointKind, EndpointSpec, ProviderDescriptor},
};

/// `User-Agent` header value identifying the relay on every provider call.
pub const USER_AGENT: &str = concat!("oauth2-relay/", env!("CARGO_PKG_VERSION"));

/// Encodes `client_id`/`client_secret` as an HTTP Basic credential value.
///
/// The encoding is the plain Base64 of `"{id}:{secret}"`; either side may be empty.
pub fn basic_credentials(client_id: &str, client_secret: &str) -> String {
	STANDARD.encode(format!("{client_id}:{client_secret}"))
}

/// Renders the `scope` parameter value: descriptor defaults first, registration
/// extensions appended, order preserved, duplicates kept. `None` when both are empty.
pub(crate) fn merged_scope(
	descriptor: &ProviderDescriptor,
	registration: &ClientRegistration,
) -> Option<String> {
	let merged = descriptor.scope.concat(&registration.scope);

	if merged.is_empty() {
		return None;
	}

	Some(merged.join(descriptor.scope_separator))
}

/// Base headers applied to every provider call.
pub(crate) fn base_headers(spec: &EndpointSpec) -> Vec<(String, String)> {
	vec![("accept".into(), spec.accept.clone()), ("user-agent".into(), USER_AGENT.into())]
}

/// Decodes a response body per the endpoint's declared parser.
///
/// A non-success body that fails the declared parser is carried as raw text so the
/// provider's error payload survives; a success body that fails to decode is an error in
/// its own right.
pub(crate) fn decode_body(
	endpoint: EndpointKind,
	parser: BodyParser,
	status: u16,
	body: &[u8],
) -> Result<Value, ProviderError> {
	match parser {
		BodyParser::FormUrlencoded => Ok(decode_form(body)),
		BodyParser::Json => decode_json(endpoint, status, body),
	}
}

fn decode_form(body: &[u8]) -> Value {
	let mut object = JsonMap::new();

	for (key, value) in form_urlencoded::parse(body) {
		object.insert(key.into_owned(), Value::String(value.into_owned()));
	}

	Value::Object(object)
}

fn decode_json(endpoint: EndpointKind, status: u16, body: &[u8]) -> Result<Value, ProviderError> {
	let text = match std::str::from_utf8(body) {
		Ok(text) => text,
		Err(source) if status == 200 =>
			return Err(ProviderError::Decode { endpoint, source: source.into() }),
		Err(_) => return Ok(Value::String(String::from_utf8_lossy(body).into_owned())),
	};
	let mut deserializer = serde_json::Deserializer::from_str(text);

	match serde_path_to_error::deserialize(&mut deserializer) {
		Ok(value) => Ok(value),
		Err(source) if status == 200 =>
			Err(ProviderError::Decode { endpoint, source: source.into() }),
		Err(_) => Ok(Value::String(text.to_owned())),
	}
}
