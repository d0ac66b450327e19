// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authorization Module
//!
//! Bearer token verification against allow-listed OIDC issuers.
//!
//! ## Flow
//!
//! 1. Gateway sends `authorizationToken` (`Bearer <JWT>`) and `methodArn`
//! 2. The authorizer:
//!    - Splits the credential and checks the scheme
//!    - Reads `iss` from the unverified payload and checks the allow-list
//!    - Fetches `<iss>/.well-known/openid-configuration`, then `jwks_uri`
//!    - Verifies the token with RS256 against the selected key
//!    - Returns an Allow policy for the verified `sub`
//!
//! ## Security
//!
//! - No network call happens for an issuer that is not allow-listed
//! - Only RS256 is accepted, whatever the token header claims
//! - Keys are fetched per request, nothing is cached
//! - Every failure is reported outward as the same `Unauthorized`

pub mod claims;
pub mod decision;
pub mod error;
pub mod extractor;
pub mod issuer;
pub mod jwks;
pub mod pipeline;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_support;

pub use claims::VerifiedIdentity;
pub use decision::Decision;
pub use error::{AuthError, Unauthorized};
pub use extractor::RawCredential;
pub use issuer::{AllowedIssuers, TrustedIssuer};
pub use jwks::{https_client, KeyResolver, KeySelection, SigningKey};
pub use pipeline::Authorizer;
