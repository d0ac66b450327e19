// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::{
    auth::Unauthorized,
    models::{AuthorizerRequest, PolicyResponse},
    state::AppState,
};

/// Decide whether a bearer token may invoke `methodArn`.
///
/// Every rejection, including an unreadable request body or an exceeded
/// deadline, is the same 401 response.
#[utoipa::path(
    post,
    path = "/v1/authorize",
    tag = "Authorizer",
    request_body = AuthorizerRequest,
    responses(
        (status = 200, description = "Access allowed", body = PolicyResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn authorize(
    State(state): State<AppState>,
    payload: Result<Json<AuthorizerRequest>, JsonRejection>,
) -> Result<Json<PolicyResponse>, Unauthorized> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!(error = %e, "Unreadable authorizer request");
        Unauthorized
    })?;

    match tokio::time::timeout(state.deadline, state.authorizer.authorize(&request)).await {
        Ok(result) => result.map(Json),
        Err(_) => {
            tracing::warn!(
                deadline_ms = state.deadline.as_millis() as u64,
                "Authorization deadline exceeded"
            );
            Err(Unauthorized)
        }
    }
}
