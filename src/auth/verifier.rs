// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! RS256 signature verification.
//!
//! The accepted algorithm list is fixed to RS256. A token whose header names
//! anything else (HS256, RS512, ...) is rejected before the key is used, so
//! the header can never choose how it gets verified.

use jsonwebtoken::{decode, decode_header, Algorithm, Validation};

use super::claims::{VerifiedClaims, VerifiedIdentity};
use super::jwks::SigningKey;
use super::AuthError;

/// Clock skew tolerance for `exp` and `nbf` (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Verify `token` against `key` and return the verified subject.
pub fn verify(token: &str, key: &SigningKey) -> Result<VerifiedIdentity, AuthError> {
    let token_data = decode::<VerifiedClaims>(token, key.decoding_key(), &validation())
        .map_err(|e| AuthError::SignatureInvalid(format!("{:?}", e.kind())))?;

    VerifiedIdentity::from_claims(token_data.claims)
}

/// `kid` from the token header, if the header decodes at all.
///
/// Used only to pick a key; the verifier rejects a broken header anyway.
pub fn header_kid(token: &str) -> Option<String> {
    decode_header(token).ok().and_then(|header| header.kid)
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.algorithms = vec![Algorithm::RS256];
    validation.leeway = CLOCK_SKEW_LEEWAY;
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.validate_aud = false;
    // exp/nbf are checked when present but no claim is mandatory.
    validation.required_spec_claims.clear();
    validation
}
