// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Fixed RSA keys and token helpers for tests.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};

/// A test RSA key pair: PKCS#8 private key plus the public JWK components.
pub struct TestKey {
    pub private_pem: &'static str,
    pub n: &'static str,
    pub e: &'static str,
}

pub const PRIMARY: TestKey = TestKey {
    private_pem: include_str!("testdata/primary_rsa.pem"),
    n: "p1_b-ADZJ4IGyjQ2NWGVMMchF9CLEEd1CoKHt4DSJWAI8eM_kgdEys0_V__glLsiV5qXVRZ0uGGttsGMDkhHy7fvMRm8Oj_P_1-sl5y4IZv38zkNFC-4KfS6fb36umKYr5tjhvTGUIXcicC_Bw6SD4AczF15sW-ab7rRVPS1lYRU-XfNlfR7emgxbYCrfHBwmqdqIXE2rAZtFghJHyR61Ls3kw1YAhtc0rJt2UMaHRrMisCyX_4D0UWknVb8ejSkYDd9SoYGcHbVt2YdVHu1Gj4hkqta3E6OWid2SWIYdM4JrMr5hwjSgLY7mY8ZnwvS1PYAx6NvXA1HW5viUYTltw",
    e: "AQAB",
};

pub const SECONDARY: TestKey = TestKey {
    private_pem: include_str!("testdata/other_rsa.pem"),
    n: "vp0MU0ofI6PpdzNYQtlHk_Qe5jorOKPnf7KbiRrPbB1SJUBHfe1nubXfC522AG72qXv6Bp48it2UJrS3bb4lnE-n3hvsjoyoswY8HWe_ZZ4faRlvbq312f9QP3lbtFByk5ETBIy_qal2R8gmNov_YIyGy8gqiQuSeN_lZB_0IjIxLVIGkC80Oj-gGDt-O28xBeaxzNWbi5YSKlfaSY_Zxt_bZTxjbfUMa1Gnpw1BbY-XBzwvvMx0QMy_4PQnJwsMpVuQ_vlE8Xwckccp59grYBnNTe762KKZJ5vutZP0UdKB1DF7_JR8TMNIOV01Kr29gc-JxYjyly9e-edzC9EoCw",
    e: "AQAB",
};

/// Public JWK for a test key.
pub fn rsa_jwk(key: &TestKey, kid: &str) -> Value {
    json!({
        "kty": "RSA",
        "use": "sig",
        "alg": "RS256",
        "kid": kid,
        "n": key.n,
        "e": key.e,
    })
}

/// `{"keys": [...]}` document.
pub fn jwks_json(keys: &[Value]) -> Value {
    json!({ "keys": keys })
}

/// Sign `claims` with a test key.
pub fn sign(key: &TestKey, alg: Algorithm, kid: Option<&str>, claims: &Value) -> String {
    let mut header = Header::new(alg);
    header.kid = kid.map(str::to_string);
    let encoding_key = EncodingKey::from_rsa_pem(key.private_pem.as_bytes()).unwrap();
    encode(&header, claims, &encoding_key).unwrap()
}

/// RS256 token from `iss` for `sub`, signed with [`PRIMARY`].
pub fn rs256_token(iss: &str, sub: &str) -> String {
    sign(&PRIMARY, Algorithm::RS256, None, &json!({ "iss": iss, "sub": sub }))
}
