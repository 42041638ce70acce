//! Authenticated profile fetch against the descriptor's user endpoint.

// self
use crate::{
	_prelude::*,
	auth::{SecretString, UserProfile},
	error::ProviderError,
	flows::{Relay, common},
	http::{HttpRequest, HttpTransport},
	obs::{self, FlowSpan, FlowStage, StageOutcome},
	provider::{EndpointAuth, EndpointKind, HeaderScheme},
};

impl<C> Relay<C>
where
	C: ?Sized + HttpTransport,
{
	/// Fetches the authenticated user's profile and normalizes it.
	///
	/// The access token is presented the way the user endpoint declares (named header or
	/// query parameter); on success the provider identity is stamped onto the payload and
	/// the canonical identifier derived per the descriptor's field mapping.
	pub async fn fetch_profile(&self, access_token: &SecretString) -> Result<UserProfile> {
		const STAGE: FlowStage = FlowStage::UserInfo;

		let span = FlowSpan::new(STAGE, self.descriptor.id.as_str());

		obs::record_stage_outcome(STAGE, StageOutcome::Attempt);

		let result = span.instrument(self.fetch_profile_inner(access_token)).await;

		match &result {
			Ok(_) => obs::record_stage_outcome(STAGE, StageOutcome::Success),
			Err(_) => obs::record_stage_outcome(STAGE, StageOutcome::Failure),
		}

		result
	}

	async fn fetch_profile_inner(&self, access_token: &SecretString) -> Result<UserProfile> {
		let spec = &self.descriptor.endpoints.user;
		let mut headers = common::base_headers(spec);
		let mut url = spec.url.clone();

		match &spec.auth {
			Some(EndpointAuth::Header { name, scheme }) => {
				let value = match scheme {
					HeaderScheme::Basic => format!(
						"Basic {}",
						common::basic_credentials(
							&self.registration.client_id,
							self.registration.client_secret.expose(),
						)
					),
					HeaderScheme::Bearer => format!("Bearer {}", access_token.expose()),
					HeaderScheme::Custom(prefix) => format!("{prefix} {}", access_token.expose()),
				};

				headers.push((name.clone(), value));
			},
			Some(EndpointAuth::Query { param }) => {
				url.query_pairs_mut().append_pair(param, access_token.expose());
			},
			// Remaining schemes are rejected at descriptor build time.
			_ => {},
		}

		for (key, value) in &spec.params {
			url.query_pairs_mut().append_pair(key, value);
		}

		let request = HttpRequest {
			method: spec.resolved_method(EndpointKind::User),
			url,
			headers,
			form: None,
		};
		let response = self.http_client.execute(request).await?;
		let payload =
			common::decode_body(EndpointKind::User, spec.parser, response.status, &response.body)?;

		if response.status != 200 {
			return Err(ProviderError::Endpoint {
				endpoint: EndpointKind::User,
				status: response.status,
				body: payload,
			}
			.into());
		}

		let Value::Object(claims) = payload else {
			return Err(ProviderError::NonObjectProfile.into());
		};

		Ok(UserProfile::normalize(self.descriptor.id.clone(), &self.descriptor.mapping, claims))
	}
}
