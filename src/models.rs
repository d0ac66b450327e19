// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Gateway Data Models
//!
//! Request and response shapes exchanged with the API gateway. Field names
//! follow the gateway's token-authorizer contract (`authorizationToken`,
//! `methodArn`, `principalId`, `policyDocument`), so the serde renames here
//! are part of the wire format.
//!
//! ## Policy Document
//!
//! A successful decision is always a single-statement IAM-style policy:
//!
//! ```json
//! {
//!   "principalId": "user-42",
//!   "policyDocument": {
//!     "Version": "2012-10-17",
//!     "Statement": [
//!       { "Action": "execute-api:Invoke", "Effect": "Allow", "Resource": "arn:..." }
//!     ]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Policy language version understood by the gateway.
pub const POLICY_VERSION: &str = "2012-10-17";

/// The one action a decision ever grants.
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

// =============================================================================
// Request
// =============================================================================

/// One authorization request from the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerRequest {
    /// Raw authorization value, e.g. `Bearer eyJhbGciOi...`.
    #[serde(default)]
    pub authorization_token: Option<String>,
    /// Opaque identifier of the API operation being invoked.
    #[serde(default)]
    pub method_arn: Option<String>,
}

impl AuthorizerRequest {
    pub fn new(authorization_token: impl Into<String>, method_arn: impl Into<String>) -> Self {
        Self {
            authorization_token: Some(authorization_token.into()),
            method_arn: Some(method_arn.into()),
        }
    }
}

// =============================================================================
// Response
// =============================================================================

/// Policy effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum Effect {
    Allow,
    Deny,
}

/// One policy statement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub action: String,
    pub effect: Effect,
    pub resource: String,
}

/// Policy document attached to a decision.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<PolicyStatement>,
}

/// Successful authorizer response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResponse {
    /// Verified `sub` of the caller.
    pub principal_id: String,
    pub policy_document: PolicyDocument,
}
