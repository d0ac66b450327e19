// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signing key resolution via OIDC discovery.
//!
//! ## Protocol
//!
//! 1. `GET <issuer>/.well-known/openid-configuration` and read `jwks_uri`
//! 2. `GET <jwks_uri>` and read the `keys` array
//! 3. Pick one entry and turn it into an RSA decoding key
//!
//! ## Security
//!
//! - Only called for issuers that passed the allow-list
//! - The production client ([`https_client`]) refuses plain `http://` URLs,
//!   for the discovery document and for `jwks_uri` alike
//! - Nothing is cached; every call fetches both documents again
//! - The JWK's declared `alg` is ignored, verification is always RS256

use std::fmt;
use std::str::FromStr;

use jsonwebtoken::jwk::{AlgorithmParameters, Jwk};
use jsonwebtoken::{Algorithm, DecodingKey};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::AuthError;
use super::issuer::TrustedIssuer;

/// Path of the discovery document, relative to the issuer URL.
const DISCOVERY_PATH: &str = "/.well-known/openid-configuration";

/// How an entry is chosen from the issuer's key set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeySelection {
    /// Always the first entry, ignoring the token's `kid`.
    #[default]
    First,
    /// The entry whose `kid` matches the token header; first entry when the
    /// token names no `kid`.
    MatchKid,
}

impl FromStr for KeySelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(KeySelection::First),
            "kid" => Ok(KeySelection::MatchKid),
            other => Err(format!("unknown key selection '{other}' (expected 'first' or 'kid')")),
        }
    }
}

/// Discovery document; only `jwks_uri` is read.
#[derive(Debug, Deserialize)]
struct DiscoveryDocument {
    jwks_uri: String,
}

/// Key set document. Entries stay as raw JSON so one odd entry does not
/// invalidate the whole set.
#[derive(Debug, Deserialize)]
struct KeySetDocument {
    keys: Vec<serde_json::Value>,
}

/// Public key material for one verification.
#[derive(Clone)]
pub struct SigningKey {
    key: DecodingKey,
    key_id: Option<String>,
}

impl SigningKey {
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.key
    }

    /// The only algorithm this key is ever used with.
    pub fn algorithm(&self) -> Algorithm {
        Algorithm::RS256
    }

    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    /// Build a key from one key-set entry. Only RSA public keys are accepted.
    pub fn from_jwk(entry: &serde_json::Value) -> Result<Self, AuthError> {
        let jwk: Jwk = serde_json::from_value(entry.clone())
            .map_err(|e| AuthError::InvalidKeyMaterial(format!("not a JWK: {e}")))?;

        let key = match &jwk.algorithm {
            AlgorithmParameters::RSA(rsa) => DecodingKey::from_rsa_components(&rsa.n, &rsa.e)
                .map_err(|e| {
                    AuthError::InvalidKeyMaterial(format!("failed to create RSA key: {e}"))
                })?,
            other => {
                return Err(AuthError::InvalidKeyMaterial(format!(
                    "unsupported key type: {other:?}"
                )))
            }
        };

        Ok(Self {
            key,
            key_id: jwk.common.key_id,
        })
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &self.algorithm())
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

/// HTTP client for discovery in production: HTTPS only, no client-level
/// timeout (the caller bounds each invocation).
pub fn https_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().https_only(true).build()
}

/// Resolves an issuer's current signing key.
///
/// Holds only an HTTP client (connection pool) and the selection mode, so it
/// is cheap to clone and safe to share across concurrent invocations.
#[derive(Clone)]
pub struct KeyResolver {
    client: reqwest::Client,
    selection: KeySelection,
}

impl KeyResolver {
    /// Create a resolver that selects the first key of the set.
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            selection: KeySelection::First,
        }
    }

    pub fn with_selection(mut self, selection: KeySelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn selection(&self) -> KeySelection {
        self.selection
    }

    /// Run discovery for a trusted issuer and build its signing key.
    ///
    /// `token_kid` is the `kid` from the token header, if any. It is only
    /// consulted in [`KeySelection::MatchKid`] mode.
    pub async fn resolve(
        &self,
        issuer: &TrustedIssuer,
        token_kid: Option<&str>,
    ) -> Result<SigningKey, AuthError> {
        let discovery_url = discovery_url(&issuer.url);
        tracing::debug!(url = %discovery_url, "Fetching discovery document");

        let discovery: DiscoveryDocument = self
            .get_json(
                &discovery_url,
                AuthError::DiscoveryUnreachable,
                AuthError::DiscoveryMalformed,
            )
            .await?;

        tracing::debug!(jwks_uri = %discovery.jwks_uri, "Fetching key set");

        let key_set: KeySetDocument = self
            .get_json(
                &discovery.jwks_uri,
                AuthError::KeySetUnreachable,
                AuthError::KeySetMalformed,
            )
            .await?;

        let entry = select_key(&key_set.keys, self.selection, token_kid)?;
        let key = SigningKey::from_jwk(entry)?;

        tracing::debug!(
            key_count = key_set.keys.len(),
            kid = key.key_id().unwrap_or("-"),
            "Signing key resolved"
        );

        Ok(key)
    }

    /// GET a JSON document, mapping transport and parse failures to the
    /// caller's error kinds.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        unreachable: fn(String) -> AuthError,
        malformed: fn(String) -> AuthError,
    ) -> Result<T, AuthError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unreachable(format!("{url}: {e}")))?;

        if !response.status().is_success() {
            return Err(unreachable(format!("HTTP {} from {url}", response.status())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| unreachable(format!("{url}: {e}")))?;

        serde_json::from_slice(&body).map_err(|e| malformed(format!("{url}: {e}")))
    }
}

/// Discovery URL for an issuer; a single trailing `/` on the issuer is dropped.
pub fn discovery_url(issuer: &str) -> String {
    let base = issuer.strip_suffix('/').unwrap_or(issuer);
    format!("{base}{DISCOVERY_PATH}")
}

fn select_key<'a>(
    keys: &'a [serde_json::Value],
    selection: KeySelection,
    token_kid: Option<&str>,
) -> Result<&'a serde_json::Value, AuthError> {
    let first = keys
        .first()
        .ok_or_else(|| AuthError::KeySetMalformed("key set is empty".to_string()))?;

    match (selection, token_kid) {
        (KeySelection::MatchKid, Some(kid)) => keys
            .iter()
            .find(|k| k.get("kid").and_then(|v| v.as_str()) == Some(kid))
            .ok_or_else(|| AuthError::KeySetMalformed(format!("no key with kid '{kid}'"))),
        _ => Ok(first),
    }
}
