// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{AuthorizerRequest, Effect, PolicyDocument, PolicyResponse, PolicyStatement},
    state::AppState,
};

pub mod authorize;
pub mod health;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/authorize", post(authorize::authorize))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        authorize::authorize,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            AuthorizerRequest,
            PolicyResponse,
            PolicyDocument,
            PolicyStatement,
            Effect,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks
        )
    ),
    tags(
        (name = "Authorizer", description = "Bearer token authorization decisions"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
