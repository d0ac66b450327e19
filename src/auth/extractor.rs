// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential extraction from the raw authorization value.
//!
//! ```rust,ignore
//! let credential = RawCredential::extract(Some("Bearer eyJhbGciOi..."))?;
//! assert_eq!(credential.token(), "eyJhbGciOi...");
//! ```

use std::fmt;

use super::AuthError;

/// The only scheme accepted, compared case-insensitively.
const BEARER_SCHEME: &str = "bearer";

/// Scheme and token split out of an authorization value.
///
/// Both parts are guaranteed non-empty and the scheme is `Bearer`
/// (in any letter case).
#[derive(Clone, PartialEq, Eq)]
pub struct RawCredential {
    scheme: String,
    token: String,
}

impl RawCredential {
    /// Parse an authorization value into a bearer credential.
    ///
    /// The value must be exactly `<scheme> <token>` separated by a single
    /// space. Any other shape is rejected rather than normalised.
    pub fn extract(header: Option<&str>) -> Result<Self, AuthError> {
        let header = match header {
            Some(h) if !h.is_empty() => h,
            _ => return Err(AuthError::MissingCredential),
        };

        let mut parts = header.split(' ');
        let (scheme, token) = match (parts.next(), parts.next(), parts.next()) {
            (Some(scheme), Some(token), None) if !scheme.is_empty() && !token.is_empty() => {
                (scheme, token)
            }
            _ => return Err(AuthError::MalformedCredential),
        };

        if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
            return Err(AuthError::UnsupportedScheme(scheme.to_string()));
        }

        Ok(Self {
            scheme: scheme.to_string(),
            token: token.to_string(),
        })
    }

    /// The scheme as presented by the caller.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The opaque token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

// The token is a credential; keep it out of logs.
impl fmt::Debug for RawCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawCredential")
            .field("scheme", &self.scheme)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bearer_token() {
        let credential = RawCredential::extract(Some("Bearer abc.def.ghi")).unwrap();
        assert_eq!(credential.scheme(), "Bearer");
        assert_eq!(credential.token(), "abc.def.ghi");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        for header in ["bearer t", "BEARER t", "bEaReR t"] {
            let credential = RawCredential::extract(Some(header)).unwrap();
            assert_eq!(credential.token(), "t");
        }
    }

    #[test]
    fn missing_or_empty_header() {
        assert_eq!(
            RawCredential::extract(None),
            Err(AuthError::MissingCredential)
        );
        assert_eq!(
            RawCredential::extract(Some("")),
            Err(AuthError::MissingCredential)
        );
    }

    #[test]
    fn wrong_number_of_parts() {
        for header in ["Bearer", "Bearer a b", "Bearer  a", " Bearer a", "Bearer ", " "] {
            assert_eq!(
                RawCredential::extract(Some(header)),
                Err(AuthError::MalformedCredential),
                "header {header:?}"
            );
        }
    }

    #[test]
    fn non_bearer_scheme() {
        assert_eq!(
            RawCredential::extract(Some("Basic abc123")),
            Err(AuthError::UnsupportedScheme("Basic".to_string()))
        );
    }

    #[test]
    fn debug_redacts_token() {
        let credential = RawCredential::extract(Some("Bearer secret-token")).unwrap();
        let debug = format!("{credential:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
