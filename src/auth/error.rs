// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization errors.
//!
//! Every variant is terminal. Callers outside the pipeline only ever see
//! [`Unauthorized`]; the variants exist for logs and tests.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Reason an authorization attempt was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No authorization value supplied, or it was empty
    #[error("authorization token is missing")]
    MissingCredential,
    /// Authorization value is not `<scheme> <token>`
    #[error("authorization token is not in '<scheme> <token>' form")]
    MalformedCredential,
    /// Scheme is not `Bearer`
    #[error("unsupported authorization scheme '{0}'")]
    UnsupportedScheme(String),
    /// Token payload could not be decoded or has no `iss`
    #[error("token is malformed: {0}")]
    MalformedToken(String),
    /// Issuer host is not on the allow-list
    #[error("issuer '{0}' is not trusted")]
    UntrustedIssuer(String),
    /// Discovery document could not be fetched
    #[error("discovery document unreachable: {0}")]
    DiscoveryUnreachable(String),
    /// Discovery document is not JSON or lacks `jwks_uri`
    #[error("discovery document malformed: {0}")]
    DiscoveryMalformed(String),
    /// Key set could not be fetched
    #[error("key set unreachable: {0}")]
    KeySetUnreachable(String),
    /// Key set is not JSON, lacks `keys`, or has no usable entry
    #[error("key set malformed: {0}")]
    KeySetMalformed(String),
    /// Selected key is not an RSA public key
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),
    /// Signature, structure or algorithm check failed
    #[error("token signature is invalid: {0}")]
    SignatureInvalid(String),
    /// Verified token carries no `sub`
    #[error("verified token has no subject")]
    MissingSubject,
    /// Gateway did not say which resource is being invoked
    #[error("resource identifier is missing")]
    MissingResource,
}

impl AuthError {
    /// Stable error code for logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::MalformedCredential => "malformed_credential",
            AuthError::UnsupportedScheme(_) => "unsupported_scheme",
            AuthError::MalformedToken(_) => "malformed_token",
            AuthError::UntrustedIssuer(_) => "untrusted_issuer",
            AuthError::DiscoveryUnreachable(_) => "discovery_unreachable",
            AuthError::DiscoveryMalformed(_) => "discovery_malformed",
            AuthError::KeySetUnreachable(_) => "key_set_unreachable",
            AuthError::KeySetMalformed(_) => "key_set_malformed",
            AuthError::InvalidKeyMaterial(_) => "invalid_key_material",
            AuthError::SignatureInvalid(_) => "signature_invalid",
            AuthError::MissingSubject => "missing_subject",
            AuthError::MissingResource => "missing_resource",
        }
    }

    /// Whether the failure happened before any outbound request could be made.
    pub fn is_pre_network(&self) -> bool {
        matches!(
            self,
            AuthError::MissingCredential
                | AuthError::MalformedCredential
                | AuthError::UnsupportedScheme(_)
                | AuthError::MalformedToken(_)
                | AuthError::UntrustedIssuer(_)
                | AuthError::MissingResource
        )
    }
}

/// The single failure visible to the calling gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Unauthorized")]
pub struct Unauthorized;

impl From<AuthError> for Unauthorized {
    fn from(_: AuthError) -> Self {
        Unauthorized
    }
}

#[derive(Serialize)]
struct UnauthorizedBody {
    message: &'static str,
}

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        let body = Json(UnauthorizedBody {
            message: "Unauthorized",
        });
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
