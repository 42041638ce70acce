//! The Authorization Code flow, driven entirely by descriptor data.

pub mod auth_code;
pub mod authorize;
pub mod common;

mod exchange;
mod userinfo;

pub use auth_code::*;
pub use authorize::*;
pub use common::*;

// self
use crate::{
	_prelude::*, auth::ClientRegistration, http::HttpTransport, provider::ProviderDescriptor,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Relay specialized for the crate's default reqwest transport stack.
pub type ReqwestRelay = Relay<ReqwestHttpClient>;

/// Drives the Authorization Code flow against a single provider descriptor.
///
/// The relay owns the HTTP transport, the provider descriptor, and the client
/// registration so flow stages can focus on protocol logic. Descriptor and registration
/// are immutable; one relay value serves any number of concurrent flows without locking,
/// and each flow owns its request/response data exclusively.
#[derive(Clone)]
pub struct Relay<C>
where
	C: ?Sized + HttpTransport,
{
	/// HTTP transport used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Provider descriptor defining endpoints, encodings, and field mapping.
	pub descriptor: ProviderDescriptor,
	/// Per-deployment client registration.
	pub registration: ClientRegistration,
}
impl<C> Relay<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a relay that reuses the caller-provided transport.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		registration: ClientRegistration,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { http_client: http_client.into(), descriptor, registration }
	}
}
#[cfg(feature = "reqwest")]
impl Relay<ReqwestHttpClient> {
	/// Creates a relay with the crate's default reqwest transport.
	pub fn new(descriptor: ProviderDescriptor, registration: ClientRegistration) -> Self {
		Self::with_http_client(descriptor, registration, ReqwestHttpClient::default())
	}
}
impl<C> Debug for Relay<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Relay")
			.field("descriptor", &self.descriptor.id)
			.field("client_id", &self.registration.client_id)
			.field("client_secret_set", &!self.registration.client_secret.is_empty())
			.finish()
	}
}
