// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The authorization pipeline.
//!
//! ```text
//! credential -> issuer trust -> key discovery -> RS256 verify -> decision
//! ```
//!
//! Each step runs once, in order. The first failure ends the run. Callers
//! get either a policy or the uniform [`Unauthorized`]; the specific
//! [`AuthError`] only reaches the logs.

use tracing::instrument;

use crate::models::{AuthorizerRequest, PolicyResponse};

use super::decision::Decision;
use super::error::{AuthError, Unauthorized};
use super::extractor::RawCredential;
use super::issuer::{establish_trust, AllowedIssuers};
use super::jwks::{KeyResolver, KeySelection};
use super::verifier;

/// Stateless token authorizer.
///
/// Holds only read-only configuration (the issuer allow-list) and an HTTP
/// client, so one instance can serve concurrent invocations.
#[derive(Clone)]
pub struct Authorizer {
    allowed: AllowedIssuers,
    resolver: KeyResolver,
}

impl Authorizer {
    pub fn new(allowed: AllowedIssuers, resolver: KeyResolver) -> Self {
        Self { allowed, resolver }
    }

    pub fn allowed_issuers(&self) -> &AllowedIssuers {
        &self.allowed
    }

    /// Run the pipeline and keep the precise failure.
    pub async fn decide(&self, request: &AuthorizerRequest) -> Result<Decision, AuthError> {
        let credential = RawCredential::extract(request.authorization_token.as_deref())?;

        let resource = match request.method_arn.as_deref() {
            Some(arn) if !arn.is_empty() => arn,
            _ => return Err(AuthError::MissingResource),
        };

        // Must pass before anything is sent to the issuer.
        let issuer = establish_trust(credential.token(), &self.allowed)?;
        tracing::debug!(issuer_host = %issuer.host, "Issuer trusted");

        let token_kid = match self.resolver.selection() {
            KeySelection::MatchKid => verifier::header_kid(credential.token()),
            KeySelection::First => None,
        };
        let key = self.resolver.resolve(&issuer, token_kid.as_deref()).await?;

        let principal = verifier::verify(credential.token(), &key)?;

        Ok(Decision::allow(principal, resource))
    }

    /// Run the pipeline and collapse every failure to [`Unauthorized`].
    #[instrument(skip_all, fields(invocation_id = %uuid::Uuid::new_v4()))]
    pub async fn authorize(&self, request: &AuthorizerRequest) -> Result<PolicyResponse, Unauthorized> {
        match self.decide(request).await {
            Ok(decision) => {
                tracing::info!(
                    principal = %decision.principal(),
                    resource = %decision.resource(),
                    "Access allowed"
                );
                Ok(decision.into_policy())
            }
            Err(e) => {
                tracing::warn!(
                    error_code = e.error_code(),
                    pre_network = e.is_pre_network(),
                    error = %e,
                    "Access denied"
                );
                Err(Unauthorized::from(e))
            }
        }
    }
}
