// self
use crate::{
	_prelude::*,
	auth::{ProviderId, ScopeList},
	provider::{
		EndpointAuth, EndpointKind, EndpointSpec, FieldMapping, ProviderDescriptor,
		ProviderEndpoints,
	},
};

/// Query parameter names the authorize builder owns; static params must not shadow them.
const RESERVED_AUTHORIZE_PARAMS: &[&str] =
	&["response_type", "client_id", "redirect_uri", "scope", "state", "prompt"];

/// Errors raised while constructing or validating descriptors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum DescriptorError {
	/// All three endpoint roles must be declared before a flow starts.
	#[error("Missing {kind} endpoint.")]
	MissingEndpoint {
		/// Role that was not declared.
		kind: EndpointKind,
	},
	/// The redirect URI registered with the provider is mandatory.
	#[error("Missing redirect URI.")]
	MissingRedirectUri,
	/// Endpoints must use HTTPS.
	#[error("The {kind} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Role that failed validation.
		kind: EndpointKind,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Auth scheme is not valid for the endpoint role it was declared on.
	#[error("The {kind} endpoint declares an auth scheme unsupported for that role.")]
	UnsupportedAuthScheme {
		/// Role carrying the offending declaration.
		kind: EndpointKind,
	},
	/// Declared header name is empty or contains invalid characters.
	#[error("The {kind} endpoint declares an invalid header name: {name:?}.")]
	InvalidHeaderName {
		/// Role carrying the offending declaration.
		kind: EndpointKind,
		/// Offending header name.
		name: String,
	},
	/// Declared query parameter name is empty.
	#[error("The {kind} endpoint declares an empty query parameter name.")]
	EmptyQueryParam {
		/// Role carrying the offending declaration.
		kind: EndpointKind,
	},
	/// Static authorize params must not shadow protocol parameters.
	#[error("The authorize endpoint declares a reserved static parameter: {name}.")]
	ReservedAuthorizeParam {
		/// Offending parameter name.
		name: String,
	},
	/// Reject scope separators that are control characters.
	#[error("Scope separator must be a printable character.")]
	InvalidScopeSeparator {
		/// Invalid separator that was supplied.
		separator: char,
	},
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Identifier for the descriptor being constructed.
	pub id: ProviderId,
	/// Authorization endpoint declaration.
	pub authorize_endpoint: Option<EndpointSpec>,
	/// Token endpoint declaration.
	pub token_endpoint: Option<EndpointSpec>,
	/// User-info endpoint declaration.
	pub user_endpoint: Option<EndpointSpec>,
	/// Default scopes requested when the registration adds none.
	pub scope: ScopeList,
	/// Character joining scope values.
	pub scope_separator: char,
	/// Profile field-mapping rules.
	pub mapping: FieldMapping,
	/// Redirect URI registered with the provider.
	pub redirect_uri: Option<Url>,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: ProviderId) -> Self {
		Self {
			id,
			authorize_endpoint: None,
			token_endpoint: None,
			user_endpoint: None,
			scope: ScopeList::default(),
			scope_separator: ' ',
			mapping: FieldMapping::default(),
			redirect_uri: None,
		}
	}

	/// Declares the authorization endpoint.
	pub fn authorize_endpoint(mut self, spec: EndpointSpec) -> Self {
		self.authorize_endpoint = Some(spec);

		self
	}

	/// Declares the token endpoint.
	pub fn token_endpoint(mut self, spec: EndpointSpec) -> Self {
		self.token_endpoint = Some(spec);

		self
	}

	/// Declares the user-info endpoint.
	pub fn user_endpoint(mut self, spec: EndpointSpec) -> Self {
		self.user_endpoint = Some(spec);

		self
	}

	/// Declares the default scopes.
	pub fn default_scope(mut self, scope: ScopeList) -> Self {
		self.scope = scope;

		self
	}

	/// Overrides the scope separator (defaults to a single space).
	pub fn scope_separator(mut self, separator: char) -> Self {
		self.scope_separator = separator;

		self
	}

	/// Names the profile field the canonical identifier is derived from when the payload
	/// has no literal `id`.
	pub fn map_id_field(mut self, field: impl Into<String>) -> Self {
		self.mapping.id = Some(field.into());

		self
	}

	/// Sets the redirect URI registered with the provider.
	pub fn redirect_uri(mut self, url: Url) -> Self {
		self.redirect_uri = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, DescriptorError> {
		let authorize = self
			.authorize_endpoint
			.ok_or(DescriptorError::MissingEndpoint { kind: EndpointKind::Authorize })?;
		let token = self
			.token_endpoint
			.ok_or(DescriptorError::MissingEndpoint { kind: EndpointKind::Token })?;
		let user = self
			.user_endpoint
			.ok_or(DescriptorError::MissingEndpoint { kind: EndpointKind::User })?;
		let redirect_uri = self.redirect_uri.ok_or(DescriptorError::MissingRedirectUri)?;
		let descriptor = ProviderDescriptor {
			id: self.id,
			endpoints: ProviderEndpoints { authorize, token, user },
			scope: self.scope,
			scope_separator: self.scope_separator,
			mapping: self.mapping,
			redirect_uri,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), DescriptorError> {
		for kind in [EndpointKind::Authorize, EndpointKind::Token, EndpointKind::User] {
			let spec = self.endpoints.get(kind);

			validate_endpoint_url(kind, &spec.url)?;
			validate_endpoint_auth(kind, spec.auth.as_ref())?;
		}

		for name in self.endpoints.authorize.params.keys() {
			if RESERVED_AUTHORIZE_PARAMS.contains(&name.as_str()) {
				return Err(DescriptorError::ReservedAuthorizeParam { name: name.clone() });
			}
		}

		validate_scope_separator(self.scope_separator)?;

		Ok(())
	}
}

fn validate_endpoint_url(kind: EndpointKind, url: &Url) -> Result<(), DescriptorError> {
	if url.scheme() != "https" {
		Err(DescriptorError::InsecureEndpoint { kind, url: url.to_string() })
	} else {
		Ok(())
	}
}

fn validate_endpoint_auth(
	kind: EndpointKind,
	auth: Option<&EndpointAuth>,
) -> Result<(), DescriptorError> {
	let Some(auth) = auth else {
		return Ok(());
	};

	match (kind, auth) {
		(EndpointKind::Authorize, _) => Err(DescriptorError::UnsupportedAuthScheme { kind }),
		(
			EndpointKind::Token,
			EndpointAuth::ClientSecretBasic | EndpointAuth::ClientSecretPost,
		) => Ok(()),
		(EndpointKind::Token, _) => Err(DescriptorError::UnsupportedAuthScheme { kind }),
		(EndpointKind::User, EndpointAuth::Header { name, .. }) =>
			validate_header_name(kind, name),
		(EndpointKind::User, EndpointAuth::Query { param }) =>
			if param.is_empty() {
				Err(DescriptorError::EmptyQueryParam { kind })
			} else {
				Ok(())
			},
		(EndpointKind::User, _) => Err(DescriptorError::UnsupportedAuthScheme { kind }),
	}
}

fn validate_header_name(kind: EndpointKind, name: &str) -> Result<(), DescriptorError> {
	let valid = !name.is_empty()
		&& name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

	if valid {
		Ok(())
	} else {
		Err(DescriptorError::InvalidHeaderName { kind, name: name.to_owned() })
	}
}

fn validate_scope_separator(separator: char) -> Result<(), DescriptorError> {
	if separator.is_control() {
		Err(DescriptorError::InvalidScopeSeparator { separator })
	} else {
		Ok(())
	}
}
