//! External verification contract turning protocol results into application outcomes.
//!
//! The relay never decides application-level acceptance. Once the token exchange and the
//! profile fetch both succeed, the host-supplied [`Verifier`] receives the full token
//! response and the normalized profile and is invoked exactly once per pipeline run;
//! whatever it decides becomes the flow's terminal outcome.

// self
use crate::{
	_prelude::*,
	auth::{TokenResponse, UserProfile},
	error::BoxError,
};

/// Future returned by [`Verifier::verify`].
pub type VerifyFuture<'a> = Pin<Box<dyn Future<Output = Result<Verdict, BoxError>> + 'a + Send>>;

/// Application-level decision produced by a verifier.
#[derive(Clone, Debug)]
pub enum Verdict {
	/// The user was recognized or provisioned; the flow completes successfully.
	Accepted {
		/// Application user record handed back to the host.
		user: Value,
		/// Optional auxiliary info payload.
		info: Option<Value>,
	},
	/// The verifier declined the user; the flow fails explicitly.
	Rejected {
		/// Optional info payload explaining the rejection.
		info: Option<Value>,
	},
}

/// Externally-owned business logic mapping a token response + normalized profile to an
/// application user (typically by looking up or creating an account).
///
/// Returning `Err` signals an infrastructure failure inside the callback (a database
/// outage, say) and terminates the flow as an unrecoverable error; returning
/// [`Verdict::Rejected`] is the explicit-failure path.
pub trait Verifier
where
	Self: Send + Sync,
{
	/// Judges one authenticated profile.
	fn verify<'a>(
		&'a self,
		token: &'a TokenResponse,
		profile: &'a UserProfile,
	) -> VerifyFuture<'a>;
}
