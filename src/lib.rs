//! Token-validating authorization filter.
//!
//! A proxy consults the filter for every inbound request. The bearer token in
//! the `authorization` attribute is split, verified (RS256 against a
//! configured public key), decoded, checked for expiry and, optionally,
//! matched against the API subscriptions it carries. The outcome is an
//! ALLOW/DENY [`Decision`](services::authz::Decision) plus the derived
//! [`AuthorizationContext`](services::authz::AuthorizationContext).

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
