// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational Authorizer - Bearer Token Authorization Decisions
//!
//! This crate answers API gateway authorization requests: it verifies an
//! OIDC bearer token from an allow-listed issuer and returns an Allow policy
//! for the verified subject, or a uniform `Unauthorized`.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Credential parsing, issuer trust, key discovery, RS256 verification
//! - `config` - Environment configuration
//! - `models` - Gateway request/response shapes

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod state;
