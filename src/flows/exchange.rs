//! Code-for-token exchange against the descriptor's token endpoint.

// self
use crate::{
	_prelude::*,
	auth::TokenResponse,
	error::ProviderError,
	flows::{Relay, common},
	http::{HttpRequest, HttpTransport},
	obs::{self, FlowSpan, FlowStage, StageOutcome},
	provider::{EndpointAuth, EndpointKind},
};

impl<C> Relay<C>
where
	C: ?Sized + HttpTransport,
{
	/// Exchanges an authorization code for a token response.
	///
	/// The redirect URI sent along must exactly match the one used in the authorization
	/// request; providers enforce the match, the relay does not validate it locally.
	/// Transport failures terminate the attempt with no retry; non-200 answers surface
	/// the decoded body as a provider error.
	pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
		const STAGE: FlowStage = FlowStage::TokenExchange;

		let span = FlowSpan::new(STAGE, self.descriptor.id.as_str());

		obs::record_stage_outcome(STAGE, StageOutcome::Attempt);

		let result = span.instrument(self.exchange_code_inner(code)).await;

		match &result {
			Ok(_) => obs::record_stage_outcome(STAGE, StageOutcome::Success),
			Err(_) => obs::record_stage_outcome(STAGE, StageOutcome::Failure),
		}

		result
	}

	async fn exchange_code_inner(&self, code: &str) -> Result<TokenResponse> {
		let spec = &self.descriptor.endpoints.token;
		let mut headers = common::base_headers(spec);
		let mut form = BTreeMap::new();

		form.insert("grant_type".to_owned(), "authorization_code".to_owned());
		form.insert("code".to_owned(), code.to_owned());
		form.insert("redirect_uri".to_owned(), self.descriptor.redirect_uri.as_str().to_owned());

		// Static endpoint params never override the protocol keys.
		for (key, value) in &spec.params {
			form.entry(key.clone()).or_insert_with(|| value.clone());
		}

		match &spec.auth {
			Some(EndpointAuth::ClientSecretBasic) => {
				let credentials = common::basic_credentials(
					&self.registration.client_id,
					self.registration.client_secret.expose(),
				);

				headers.push(("authorization".to_owned(), format!("Basic {credentials}")));
			},
			Some(EndpointAuth::ClientSecretPost) => {
				form.insert("client_id".to_owned(), self.registration.client_id.clone());
				form.insert(
					"client_secret".to_owned(),
					self.registration.client_secret.expose().to_owned(),
				);
			},
			// Remaining schemes are rejected at descriptor build time; a public client
			// only identifies itself.
			_ => {
				form.insert("client_id".to_owned(), self.registration.client_id.clone());
			},
		}

		let request = HttpRequest {
			method: spec.resolved_method(EndpointKind::Token),
			url: spec.url.clone(),
			headers,
			form: Some(form),
		};
		let response = self.http_client.execute(request).await?;
		let payload =
			common::decode_body(EndpointKind::Token, spec.parser, response.status, &response.body)?;

		if response.status != 200 {
			return Err(ProviderError::Endpoint {
				endpoint: EndpointKind::Token,
				status: response.status,
				body: payload,
			}
			.into());
		}

		TokenResponse::from_payload(payload).map_err(Into::into)
	}
}
