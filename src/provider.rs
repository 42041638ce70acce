//! Provider-facing descriptor data.
//!
//! `descriptor` exposes validated metadata (`ProviderDescriptor`) covering HTTPS-only
//! endpoints, per-endpoint request encodings (method, auth scheme, accept type, body
//! parser, static params), and profile field-mapping rules. The builder performs
//! fail-fast validation so a descriptor that reaches a flow is always usable.

pub mod descriptor;

pub use descriptor::*;
