//! Auth-domain data: provider identifiers, scope lists, secrets, token responses, profiles,
//! and client registrations.

pub mod id;
pub mod profile;
pub mod registration;
pub mod scope;
pub mod secret;
pub mod token;

pub use id::*;
pub use profile::*;
pub use registration::*;
pub use scope::*;
pub use secret::*;
pub use token::*;
