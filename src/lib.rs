//! Rust’s declarative OAuth 2.0 relay—drive Authorization Code logins against any compliant
//! provider from descriptor data alone: redirect construction, code exchange, user-info fetch,
//! and profile normalization without provider-specific code.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod provider;
pub mod verify;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and fixtures for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{ClientRegistration, TokenResponse, UserProfile},
		flows::Relay,
		http::ReqwestHttpClient,
		provider::ProviderDescriptor,
		verify::{Verdict, Verifier, VerifyFuture},
	};

	/// Relay type alias used by reqwest-backed integration tests.
	pub type ReqwestTestRelay = Relay<ReqwestHttpClient>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`Relay`] backed by the certificate-tolerant reqwest transport used across
	/// integration tests.
	pub fn build_reqwest_test_relay(
		descriptor: ProviderDescriptor,
		client_id: &str,
		client_secret: &str,
	) -> ReqwestTestRelay {
		let registration = ClientRegistration::new(client_id, client_secret);

		Relay::with_http_client(descriptor, registration, test_reqwest_http_client())
	}

	/// Verifier that accepts every profile, echoing the profile back as the application user
	/// and the raw token payload as the info value.
	pub struct EchoVerifier;
	impl Verifier for EchoVerifier {
		fn verify<'a>(
			&'a self,
			token: &'a TokenResponse,
			profile: &'a UserProfile,
		) -> VerifyFuture<'a> {
			Box::pin(async move {
				let user = serde_json::to_value(profile)?;

				Ok(Verdict::Accepted { user, info: Some(token.raw().clone()) })
			})
		}
	}

	/// Verifier that rejects every profile without an info payload.
	pub struct RejectAll;
	impl Verifier for RejectAll {
		fn verify<'a>(
			&'a self,
			_token: &'a TokenResponse,
			_profile: &'a UserProfile,
		) -> VerifyFuture<'a> {
			Box::pin(async move { Ok(Verdict::Rejected { info: None }) })
		}
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {httpmock as _, tokio as _};
