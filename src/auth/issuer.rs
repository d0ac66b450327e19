// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Issuer trust gate.
//!
//! ## Security
//!
//! The issuer is read from the UNVERIFIED payload. The result only decides
//! whether the issuer may be contacted for keys; the signature check later
//! re-reads the token from scratch. An issuer that is not allow-listed never
//! causes an outbound request.

use std::collections::BTreeSet;

use url::Url;

use super::claims::UnverifiedClaims;
use super::AuthError;

/// Read-only set of issuer hosts (`host` or `host:port`) allowed to sign tokens.
///
/// Built once at startup. An empty set trusts nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedIssuers {
    hosts: BTreeSet<String>,
}

impl AllowedIssuers {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hosts: hosts
                .into_iter()
                .map(Into::into)
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    /// Parse a whitespace-separated list such as `"issuer.example auth.example:8443"`.
    pub fn from_whitespace_list(list: &str) -> Self {
        Self::new(list.split_whitespace())
    }

    /// Case-sensitive membership check.
    pub fn contains(&self, host: &str) -> bool {
        self.hosts.contains(host)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(String::as_str)
    }
}

/// An issuer that passed the allow-list check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedIssuer {
    /// `iss` exactly as it appeared in the token
    pub url: String,
    /// Host (and explicit port) the allow-list matched on
    pub host: String,
}

/// Decide whether the token's claimed issuer may be contacted.
pub fn establish_trust(token: &str, allowed: &AllowedIssuers) -> Result<TrustedIssuer, AuthError> {
    let claims = UnverifiedClaims::decode(token)?;
    let host = issuer_host(&claims.iss)?;

    if !allowed.contains(&host) {
        return Err(AuthError::UntrustedIssuer(host));
    }

    Ok(TrustedIssuer {
        url: claims.iss,
        host,
    })
}

/// Extract the comparison key from an issuer URL: the authority exactly as
/// written in `iss`, minus any `user@` part.
///
/// Letter case and a written port (even the scheme default) are kept, so
/// `https://Issuer.Example:443` only matches the entry `Issuer.Example:443`.
/// The URL parser still has to accept `iss` and find the same host, so
/// text that parses to a different host than it reads is rejected.
pub fn issuer_host(iss: &str) -> Result<String, AuthError> {
    let url = Url::parse(iss)
        .map_err(|e| AuthError::UntrustedIssuer(format!("{iss} (not a URL: {e})")))?;

    let parsed_host = url
        .host_str()
        .ok_or_else(|| AuthError::UntrustedIssuer(format!("{iss} (no host)")))?;

    let (_, rest) = iss
        .split_once("://")
        .ok_or_else(|| AuthError::UntrustedIssuer(format!("{iss} (no authority)")))?;
    let authority = rest
        .find(['/', '\\', '?', '#'])
        .map_or(rest, |end| &rest[..end]);
    let authority = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port);

    if !strip_port(authority).eq_ignore_ascii_case(parsed_host) {
        return Err(AuthError::UntrustedIssuer(format!(
            "{iss} (host does not match parsed host '{parsed_host}')"
        )));
    }

    Ok(authority.to_string())
}

/// `host:port` -> `host`; bracketed IPv6 literals keep their colons.
fn strip_port(authority: &str) -> &str {
    match authority.rsplit_once(':') {
        Some((host, port))
            if !host.is_empty()
                && port.bytes().all(|b| b.is_ascii_digit())
                && (!host.starts_with('[') || host.ends_with(']')) =>
        {
            host
        }
        _ => authority,
    }
}
