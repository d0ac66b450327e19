// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims in their unverified and verified forms.

use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;

use super::AuthError;

/// Claims read from a token payload WITHOUT signature verification.
///
/// Only `iss` is exposed, and only so the trust gate can decide whether the
/// issuer may be contacted at all. Nothing here may grant access.
#[derive(Debug, Clone, Deserialize)]
pub struct UnverifiedClaims {
    /// Claimed issuer URL
    pub iss: String,
}

impl UnverifiedClaims {
    /// Structurally decode the payload segment of a compact JWT.
    ///
    /// This is base64url + JSON only. The header and signature segments
    /// must be present but are not inspected.
    pub fn decode(token: &str) -> Result<Self, AuthError> {
        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_), None) => payload,
            _ => {
                return Err(AuthError::MalformedToken(
                    "expected three dot-separated segments".to_string(),
                ))
            }
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| AuthError::MalformedToken(format!("payload is not base64url: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| AuthError::MalformedToken(format!("payload has no usable iss: {e}")))
    }
}

/// Claims read after the signature has been verified.
///
/// `sub` is optional here so a missing subject surfaces as its own error
/// instead of a generic decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifiedClaims {
    /// Subject
    #[serde(default)]
    pub sub: Option<String>,
}

/// The verified `sub` claim. The only identity value that can be trusted.
#[derive(Clone, PartialEq, Eq)]
pub struct VerifiedIdentity(String);

impl VerifiedIdentity {
    /// Take the subject out of verified claims.
    pub fn from_claims(claims: VerifiedClaims) -> Result<Self, AuthError> {
        match claims.sub {
            Some(sub) if !sub.is_empty() => Ok(Self(sub)),
            _ => Err(AuthError::MissingSubject),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for VerifiedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VerifiedIdentity").field(&self.0).finish()
    }
}

impl fmt::Display for VerifiedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
