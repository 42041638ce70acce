//! Authorization request construction.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	auth::ClientRegistration,
	flows::{Relay, common},
	http::HttpTransport,
	obs::{FlowSpan, FlowStage},
	provider::ProviderDescriptor,
};

const STATE_LEN: usize = 32;

/// Per-call options applied to the authorization request.
#[derive(Clone, Debug, Default)]
pub struct AuthorizeOptions {
	/// Opaque CSRF-binding value round-tripped via the provider. Opaque to the relay;
	/// generation and validation belong to the caller.
	pub state: Option<String>,
	/// `prompt` value forwarded verbatim to the provider, unvalidated.
	pub prompt: Option<String>,
}
impl AuthorizeOptions {
	/// Creates empty options: no state, no prompt.
	pub fn new() -> Self {
		Self::default()
	}

	/// Binds a caller-supplied state value.
	pub fn with_state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Binds a freshly generated alphanumeric state value.
	pub fn with_generated_state(self) -> Self {
		self.with_state(random_state())
	}

	/// Forwards a `prompt` value to the provider.
	pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
		self.prompt = Some(prompt.into());

		self
	}
}

/// Generates an opaque alphanumeric state value suitable for CSRF binding.
pub fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}

impl<C> Relay<C>
where
	C: ?Sized + HttpTransport,
{
	/// Builds the provider redirect URL for flow initiation.
	///
	/// No network I/O; identical inputs produce byte-identical URLs.
	pub fn authorize_url(&self, options: &AuthorizeOptions) -> Url {
		let _guard =
			FlowSpan::new(FlowStage::Authorize, self.descriptor.id.as_str()).entered();

		build_authorize_url(&self.descriptor, &self.registration, options)
	}
}

pub(crate) fn build_authorize_url(
	descriptor: &ProviderDescriptor,
	registration: &ClientRegistration,
	options: &AuthorizeOptions,
) -> Url {
	let spec = &descriptor.endpoints.authorize;
	let mut url = spec.url.clone();
	let mut pairs = url.query_pairs_mut();

	pairs.append_pair("response_type", "code");
	pairs.append_pair("client_id", &registration.client_id);
	pairs.append_pair("redirect_uri", descriptor.redirect_uri.as_str());

	if let Some(scope) = common::merged_scope(descriptor, registration) {
		pairs.append_pair("scope", &scope);
	}
	if let Some(state) = &options.state {
		pairs.append_pair("state", state);
	}
	if let Some(prompt) = &options.prompt {
		pairs.append_pair("prompt", prompt);
	}

	for (key, value) in &spec.params {
		pairs.append_pair(key, value);
	}

	drop(pairs);

	url
}
