//! Transport primitives for provider HTTP calls.
//!
//! [`HttpTransport`] is the relay's only dependency on an HTTP stack: flows assemble
//! crate-owned [`HttpRequest`] values and receive the raw status + body back, keeping
//! status classification and body decoding inside the relay. A reqwest-backed adapter
//! ships behind the `reqwest` feature (default); downstream crates can implement the
//! trait over any client.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError, provider::HttpMethod};

/// Future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Request issued to a provider endpoint.
#[derive(Clone, Debug)]
pub struct HttpRequest {
	/// Request method.
	pub method: HttpMethod,
	/// Fully-formed request URL, query included.
	pub url: Url,
	/// Header name/value pairs set on the request.
	pub headers: Vec<(String, String)>,
	/// Form-encoded body parameters, when the request carries a body.
	pub form: Option<BTreeMap<String, String>>,
}

/// Raw response surfaced to flows.
#[derive(Clone, Debug)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}

/// Abstraction over HTTP transports capable of executing provider calls.
///
/// Implementations must be `Send + Sync + 'static` so one transport can serve any number
/// of concurrent flows; each call owns its request data exclusively, so no transport-side
/// locking is required. Implementations must not retry and must not treat non-success
/// statuses as errors—status classification belongs to the flows.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes the request, resolving with the raw response or a transport failure.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Provider calls should not follow redirects, matching OAuth 2.0 guidance that token
/// endpoints return results directly instead of delegating to another URI; configure any
/// custom [`ReqwestClient`] accordingly before wrapping it.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let HttpRequest { method, url, headers, form } = request;
			let mut builder = client.request(reqwest_method(method), url);

			for (name, value) in &headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(form) = &form {
				builder = builder.form(form);
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(HttpResponse { status, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn reqwest_method(method: HttpMethod) -> reqwest::Method {
	match method {
		HttpMethod::Get => reqwest::Method::GET,
		HttpMethod::Post => reqwest::Method::POST,
	}
}
