//! Provider descriptor data structures shared by all flows.

/// Builder API for assembling provider descriptors.
pub mod builder;
/// Endpoint declarations wired into provider descriptors.
pub mod endpoint;

pub use builder::*;
pub use endpoint::*;

// self
use crate::{
	_prelude::*,
	auth::{ProviderId, ScopeList},
};

/// Endpoint set declared by a provider descriptor. All three roles are mandatory before
/// any flow using the descriptor is started.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Authorization endpoint the end user is redirected to.
	pub authorize: EndpointSpec,
	/// Token endpoint used for the code-for-token exchange.
	pub token: EndpointSpec,
	/// User-info endpoint serving the authenticated profile.
	pub user: EndpointSpec,
}
impl ProviderEndpoints {
	/// Returns the spec declared for the given role.
	pub fn get(&self, kind: EndpointKind) -> &EndpointSpec {
		match kind {
			EndpointKind::Authorize => &self.authorize,
			EndpointKind::Token => &self.token,
			EndpointKind::User => &self.user,
		}
	}
}

/// Field-mapping rules applied while normalizing fetched profiles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMapping {
	/// Provider field holding the user identifier when the payload has no literal `id`.
	pub id: Option<String>,
}

/// Immutable provider descriptor consumed by flows.
///
/// Loaded once at process start and shared read-only by all flow instances for the
/// provider; nothing in the relay mutates it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Descriptor identifier, stamped onto normalized profiles.
	pub id: ProviderId,
	/// Endpoint declarations exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Default scopes requested when the registration adds none.
	#[serde(default)]
	pub scope: ScopeList,
	/// Character joining scope values in the `scope` parameter.
	#[serde(default = "default_separator")]
	pub scope_separator: char,
	/// Profile field-mapping rules.
	#[serde(default)]
	pub mapping: FieldMapping,
	/// Redirect URI registered with the provider.
	pub redirect_uri: Url,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: ProviderId) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(id)
	}
}

fn default_separator() -> char {
	' '
}
