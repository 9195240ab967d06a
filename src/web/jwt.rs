//
// Copyright © 2025 Hardcore Engineering Inc.
//
// Licensed under the Eclipse Public License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License. You may
// obtain a copy of the License at https://www.eclipse.org/legal/epl-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//
// See the License for the specific language governing permissions and
// limitations under the License.
//

use jsonwebtoken::{DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::types::Timestamp;
use crate::{Config, Result};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// Reads the claims of a token issued elsewhere. The signature and the
    /// expiry are not checked; verification belongs to whoever signed it.
    pub fn peek(token: &str) -> Result<Self> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let key = DecodingKey::from_secret(&[]);
        let data = jsonwebtoken::decode::<Claims>(token, &key, &validation)?;

        Ok(data.claims)
    }

    pub fn expires_at(&self) -> Option<Timestamp> {
        self.exp.and_then(|exp| chrono::DateTime::from_timestamp(exp, 0))
    }
}

fn expose<S: Serializer>(
    secret: &SecretString,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

fn conceal<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

/// Reply sent after a successful sign-in
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JwtAuthenticationResponse {
    #[serde(serialize_with = "expose", deserialize_with = "conceal")]
    access_token: SecretString,

    token_type: String,

    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<Timestamp>,
}

impl JwtAuthenticationResponse {
    pub fn new(access_token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
            token_type: token_type.into(),
            expires_at: None,
        }
    }

    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self::new(access_token, crate::config::DEFAULT_TOKEN_TYPE)
    }

    /// Response for an already issued token, with the configured token type
    /// and the expiry taken from the token's `exp` claim.
    pub fn from_token(access_token: impl Into<String>, config: &Config) -> Result<Self> {
        let access_token = access_token.into();
        let expires_at = Claims::peek(&access_token)?.expires_at();

        tracing::trace!(?expires_at, "authentication response");

        Ok(Self::new(access_token, config.token_type.as_str()).with_expires_at(expires_at))
    }

    pub fn with_expires_at(mut self, expires_at: Option<Timestamp>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn expires_at(&self) -> Option<Timestamp> {
        self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    use super::*;
    use crate::Error;

    fn token(claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn bearer_defaults() {
        let response = JwtAuthenticationResponse::bearer("abc");

        assert_eq!(response.access_token(), "abc");
        assert_eq!(response.token_type(), "Bearer");
        assert_eq!(response.expires_at(), None);
    }

    #[test]
    fn debug_hides_token() {
        let response = JwtAuthenticationResponse::bearer("very-secret-token");

        assert!(!format!("{response:?}").contains("very-secret-token"));
    }

    #[test]
    fn wire_shape_and_round_trip() -> anyhow::Result<()> {
        let expires_at = chrono::DateTime::from_timestamp_millis(1_700_000_000_000);
        let response = JwtAuthenticationResponse::bearer("abc").with_expires_at(expires_at);

        let value = serde_json::to_value(&response)?;
        assert_eq!(
            value,
            json!({"accessToken": "abc", "tokenType": "Bearer", "expiresAt": 1_700_000_000_000i64})
        );

        let parsed: JwtAuthenticationResponse = serde_json::from_value(value)?;
        assert_eq!(parsed.access_token(), "abc");
        assert_eq!(parsed.token_type(), "Bearer");
        assert_eq!(parsed.expires_at(), expires_at);

        let without_expiry: JwtAuthenticationResponse =
            serde_json::from_value(json!({"accessToken": "x", "tokenType": "Bearer"}))?;
        assert_eq!(without_expiry.expires_at(), None);

        Ok(())
    }

    #[test]
    fn from_token_reads_expiry() -> anyhow::Result<()> {
        let claims = Claims {
            sub: Some(String::from("alice")),
            exp: Some(1_900_000_000),
            iat: Some(1_800_000_000),
            jti: None,
        };
        let jwt = token(&claims);

        assert_eq!(Claims::peek(&jwt)?, claims);

        let config = crate::ConfigBuilder::default().token_type("JWT").build()?;
        let response = JwtAuthenticationResponse::from_token(jwt.clone(), &config)?;

        assert_eq!(response.access_token(), jwt);
        assert_eq!(response.token_type(), "JWT");
        assert_eq!(
            response.expires_at(),
            chrono::DateTime::from_timestamp(1_900_000_000, 0)
        );

        Ok(())
    }

    #[test]
    fn from_token_without_expiry() {
        let jwt = token(&Claims {
            sub: Some(String::from("bob")),
            ..Default::default()
        });

        let response = JwtAuthenticationResponse::from_token(jwt, &Config::default()).unwrap();
        assert_eq!(response.expires_at(), None);
    }

    #[test]
    fn malformed_token() {
        let result = JwtAuthenticationResponse::from_token("not-a-jwt", &Config::default());
        assert!(matches!(result, Err(Error::Jwt(_))));
    }
}
