//! Callback classification and the Authorization Code flow orchestrator.

// self
use crate::{
	_prelude::*,
	error::{ProviderError, VerifyError},
	flows::{AuthorizeOptions, Relay},
	http::HttpTransport,
	obs::{self, FlowSpan, FlowStage, StageOutcome},
	verify::{Verdict, Verifier},
};

/// Query parameters carried by an inbound request to the callback route.
#[derive(Clone, Debug, Default)]
pub struct CallbackQuery(BTreeMap<String, String>);
impl CallbackQuery {
	/// Creates an empty query (a flow-initiation request with no parameters).
	pub fn new() -> Self {
		Self::default()
	}

	/// Collects parameters from any pair iterator.
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}

	/// Collects parameters from a request URL's query string.
	pub fn from_url(url: &Url) -> Self {
		Self(url.query_pairs().into_owned().collect())
	}

	/// Looks up a parameter value.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	/// Classifies the callback per the protocol's precedence rules.
	///
	/// `error` always wins over `code`: a provider returning both is malformed and must
	/// never be treated as a valid code.
	pub(crate) fn classify(&self) -> CallbackDisposition {
		if let Some(error) = self.get("error") {
			if error == "access_denied" {
				return CallbackDisposition::Denied;
			}

			return CallbackDisposition::Errored {
				error: error.to_owned(),
				params: self.0.clone(),
			};
		}
		if let Some(code) = self.get("code") {
			return CallbackDisposition::Exchange { code: code.to_owned() };
		}

		CallbackDisposition::Initiate
	}
}

/// Classified callback shape driving the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum CallbackDisposition {
	/// No code, no error: start the flow by redirecting to the provider.
	Initiate,
	/// The user declined consent at the provider.
	Denied,
	/// The provider reported an error; the full query is the diagnostic payload.
	Errored {
		/// OAuth `error` code.
		error: String,
		/// Entire callback query.
		params: BTreeMap<String, String>,
	},
	/// A code is present and ready to exchange.
	Exchange {
		/// The authorization code.
		code: String,
	},
}

/// Explicit-failure detail attached to [`FlowOutcome::Denied`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Denial {
	/// Fixed human-readable reason.
	pub reason: &'static str,
	/// Suggested HTTP status for the host's failure response.
	pub status_hint: u16,
}
impl Denial {
	/// The user declined consent at the provider.
	pub const fn access_denied() -> Self {
		Self { reason: "The user denied access to the provider account.", status_hint: 403 }
	}
}

/// Terminal result of one Authorization Code flow attempt.
///
/// The host wires each variant to its own response mechanism: `Redirect` to a
/// redirect-to-URL sink, `Denied`/`VerifyFailed` to explicit-failure sinks,
/// `ProviderError`/`TransportError` to error sinks, and `Success` to the login path.
#[derive(Debug)]
pub enum FlowOutcome {
	/// Flow initiation: send the end user to this provider URL.
	Redirect(Url),
	/// The user declined consent; an explicit, non-retryable failure.
	Denied(Denial),
	/// The provider broke protocol; carries provider-supplied detail.
	ProviderError(ProviderError),
	/// The flow died on infrastructure: a transport failure or a failing collaborator.
	TransportError(Error),
	/// The verification callback declined the user.
	VerifyFailed {
		/// Info payload supplied by the verifier, when any.
		info: Option<Value>,
	},
	/// The verification callback accepted the user.
	Success {
		/// Application user record produced by the verifier.
		user: Value,
		/// Optional auxiliary info payload.
		info: Option<Value>,
	},
}

impl<C> Relay<C>
where
	C: ?Sized + HttpTransport,
{
	/// Drives one inbound callback request to a terminal outcome.
	///
	/// Flow initiation (no `code`, no `error`) yields [`FlowOutcome::Redirect`]; a
	/// present code drives exchange → profile fetch → verification strictly in order,
	/// short-circuiting to a terminal outcome on the first failure. The verifier is
	/// invoked exactly once per successful pipeline run and receives both the token
	/// response and the normalized profile.
	pub async fn handle_callback(
		&self,
		query: &CallbackQuery,
		options: AuthorizeOptions,
		verifier: &dyn Verifier,
	) -> FlowOutcome {
		match query.classify() {
			CallbackDisposition::Initiate => {
				let mut options = options;

				// The inbound request's prompt is forwarded verbatim.
				if let Some(prompt) = query.get("prompt") {
					options.prompt = Some(prompt.to_owned());
				}

				FlowOutcome::Redirect(self.authorize_url(&options))
			},
			CallbackDisposition::Denied => FlowOutcome::Denied(Denial::access_denied()),
			CallbackDisposition::Errored { error, params } =>
				FlowOutcome::ProviderError(ProviderError::Callback { error, params }),
			CallbackDisposition::Exchange { code } =>
				match self.run_pipeline(&code, verifier).await {
					Ok(outcome) => outcome,
					Err(Error::Provider(details)) => FlowOutcome::ProviderError(details),
					Err(cause) => FlowOutcome::TransportError(cause),
				},
		}
	}

	async fn run_pipeline(&self, code: &str, verifier: &dyn Verifier) -> Result<FlowOutcome> {
		let token = self.exchange_code(code).await?;
		let profile = self.fetch_profile(token.access_token()).await?;
		let span = FlowSpan::new(FlowStage::Verify, self.descriptor.id.as_str());

		obs::record_stage_outcome(FlowStage::Verify, StageOutcome::Attempt);

		let verdict = span
			.instrument(verifier.verify(&token, &profile))
			.await
			.map_err(|source| VerifyError { source });

		match &verdict {
			Ok(_) => obs::record_stage_outcome(FlowStage::Verify, StageOutcome::Success),
			Err(_) => obs::record_stage_outcome(FlowStage::Verify, StageOutcome::Failure),
		}

		match verdict? {
			Verdict::Accepted { user, info } => Ok(FlowOutcome::Success { user, info }),
			Verdict::Rejected { info } => Ok(FlowOutcome::VerifyFailed { info }),
		}
	}
}
