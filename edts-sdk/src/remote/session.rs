use super::Error;
use edts_sdk_common::helper::decode_json;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Access/refresh token pair returned by a successful login.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokenPair {
    access_token: String,
    refresh_token: String,
}

impl SessionTokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(decode_json(json.as_bytes())?)
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}

// 不在日志里打印 token
impl fmt::Debug for SessionTokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokenPair")
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .finish()
    }
}

#[test]
fn decode_token_pair() {
    let pair =
        SessionTokenPair::from_json(r#"{"accessToken":"a.b.c","refreshToken":"r-1","extra":1}"#)
            .unwrap();
    assert_eq!(pair.access_token(), "a.b.c");
    assert_eq!(pair.refresh_token(), "r-1");
    assert_eq!(pair, SessionTokenPair::new("a.b.c", "r-1"));
}

#[test]
fn missing_field_fails() {
    let err = SessionTokenPair::from_json(r#"{"accessToken":"a.b.c"}"#).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn debug_redacts_tokens() {
    let s = format!("{:?}", SessionTokenPair::new("secret-access", "secret-refresh"));
    assert!(!s.contains("secret"));
}
