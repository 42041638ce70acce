// self
use crate::_prelude::*;

/// Default media type requested from provider endpoints.
pub const DEFAULT_ACCEPT: &str = "application/json";

/// Endpoint roles declared by a provider descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
	/// Authorization endpoint the end user is redirected to.
	Authorize,
	/// Token endpoint used for the code-for-token exchange.
	Token,
	/// User-info endpoint serving the authenticated profile.
	User,
}
impl EndpointKind {
	/// Returns a stable label suitable for messages and span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			EndpointKind::Authorize => "authorize",
			EndpointKind::Token => "token",
			EndpointKind::User => "user",
		}
	}

	/// Request method applied when an endpoint spec declares none.
	pub const fn default_method(self) -> HttpMethod {
		match self {
			EndpointKind::Token => HttpMethod::Post,
			_ => HttpMethod::Get,
		}
	}
}
impl Display for EndpointKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Request methods supported by endpoint specs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
	/// HTTP GET.
	Get,
	/// HTTP POST.
	Post,
}
impl HttpMethod {
	/// Returns the method's wire name.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Header value prefixes used when presenting a credential in a header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderScheme {
	/// `Bearer <access token>`.
	Bearer,
	/// `Basic <base64 client credentials>`.
	Basic,
	/// Provider-specific prefix followed by the access token.
	Custom(String),
}

/// Declares how the client or the access token is presented to an endpoint.
///
/// The variants are a closed set on purpose: role-incompatible declarations (for example
/// `Query` on the token endpoint) are rejected when the descriptor is built rather than
/// silently ignored mid-flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointAuth {
	/// HTTP Basic with `client_id`/`client_secret`; token endpoint only.
	ClientSecretBasic,
	/// `client_id`/`client_secret` as form body parameters; token endpoint only.
	ClientSecretPost,
	/// Named header carrying the credential; user endpoint only.
	Header {
		/// Header name to set.
		name: String,
		/// Value prefix scheme.
		scheme: HeaderScheme,
	},
	/// Query parameter carrying the access token; user endpoint only.
	Query {
		/// Query parameter name to append.
		param: String,
	},
}

/// Response body encodings a provider may declare.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyParser {
	/// JSON payloads.
	#[default]
	Json,
	/// `application/x-www-form-urlencoded` payloads.
	FormUrlencoded,
}

/// Single endpoint declaration consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSpec {
	/// Endpoint base URL.
	pub url: Url,
	/// Request method; when absent the per-role default applies (token POST, others GET).
	#[serde(default)]
	pub method: Option<HttpMethod>,
	/// How the client or token authenticates against the endpoint.
	#[serde(default)]
	pub auth: Option<EndpointAuth>,
	/// Media type requested via the `Accept` header.
	#[serde(default = "default_accept")]
	pub accept: String,
	/// Parser applied to response bodies.
	#[serde(default)]
	pub parser: BodyParser,
	/// Static parameters merged into every request to the endpoint: query string for
	/// authorize/user calls, form body for token calls.
	#[serde(default)]
	pub params: BTreeMap<String, String>,
}
impl EndpointSpec {
	/// Creates a spec for the given URL with role defaults for everything else.
	pub fn new(url: Url) -> Self {
		Self {
			url,
			method: None,
			auth: None,
			accept: DEFAULT_ACCEPT.into(),
			parser: BodyParser::default(),
			params: BTreeMap::new(),
		}
	}

	/// Overrides the request method.
	pub fn with_method(mut self, method: HttpMethod) -> Self {
		self.method = Some(method);

		self
	}

	/// Declares the auth scheme.
	pub fn with_auth(mut self, auth: EndpointAuth) -> Self {
		self.auth = Some(auth);

		self
	}

	/// Overrides the requested media type.
	pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
		self.accept = accept.into();

		self
	}

	/// Overrides the response body parser.
	pub fn with_parser(mut self, parser: BodyParser) -> Self {
		self.parser = parser;

		self
	}

	/// Adds a static parameter sent on every request to the endpoint.
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(key.into(), value.into());

		self
	}

	/// Effective request method for the given endpoint role.
	pub fn resolved_method(&self, kind: EndpointKind) -> HttpMethod {
		self.method.unwrap_or(kind.default_method())
	}
}

fn default_accept() -> String {
	DEFAULT_ACCEPT.into()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn method_defaults_vary_by_role() {
		let url = Url::parse("https://example.com/x").expect("URL fixture should parse.");
		let spec = EndpointSpec::new(url);

		assert_eq!(spec.resolved_method(EndpointKind::Authorize), HttpMethod::Get);
		assert_eq!(spec.resolved_method(EndpointKind::Token), HttpMethod::Post);
		assert_eq!(spec.resolved_method(EndpointKind::User), HttpMethod::Get);

		let spec = spec.with_method(HttpMethod::Post);

		assert_eq!(spec.resolved_method(EndpointKind::User), HttpMethod::Post);
	}

	#[test]
	fn spec_deserializes_with_defaults() {
		let spec: EndpointSpec =
			serde_json::from_str("{\"url\":\"https://example.com/token\"}")
				.expect("Minimal spec should deserialize.");

		assert_eq!(spec.accept, DEFAULT_ACCEPT);
		assert_eq!(spec.parser, BodyParser::Json);
		assert!(spec.method.is_none());
		assert!(spec.auth.is_none());
		assert!(spec.params.is_empty());
	}
}
