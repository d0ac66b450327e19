// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Decision building.

use crate::models::{
    Effect, PolicyDocument, PolicyResponse, PolicyStatement, INVOKE_ACTION, POLICY_VERSION,
};

use super::claims::VerifiedIdentity;

/// An access decision. Immutable once built.
///
/// Only reachable with a [`VerifiedIdentity`], so a decision can never be
/// built from unverified claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    principal: VerifiedIdentity,
    effect: Effect,
    resource: String,
}

impl Decision {
    /// Grant `principal` invocation of `resource`.
    pub fn allow(principal: VerifiedIdentity, resource: impl Into<String>) -> Self {
        Self {
            principal,
            effect: Effect::Allow,
            resource: resource.into(),
        }
    }

    pub fn principal(&self) -> &VerifiedIdentity {
        &self.principal
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Render as the gateway's policy response.
    pub fn into_policy(self) -> PolicyResponse {
        PolicyResponse {
            principal_id: self.principal.into_inner(),
            policy_document: PolicyDocument {
                version: POLICY_VERSION.to_string(),
                statement: vec![PolicyStatement {
                    action: INVOKE_ACTION.to_string(),
                    effect: self.effect,
                    resource: self.resource,
                }],
            },
        }
    }
}
