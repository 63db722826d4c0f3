//! ID-token validation.
//!
//! Tokens are signed by the identity provider's user pool. Production
//! deployments configure the pool's RSA public key; local development and
//! tests may use a shared HMAC secret instead.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims read from an identity-provider ID token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the provider's user id, stored as `cognito_id`.
    pub sub: String,
    /// Role picked on the sign-up form (`manager` / `tenant`).
    #[serde(rename = "custom:role", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "cognito:username", default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Key material used to check token signatures.
#[derive(Debug, Clone)]
pub enum VerificationKey {
    /// HS256 shared secret.
    Secret(String),
    /// RS256 public key in PEM form.
    RsaPem(String),
}

/// Configuration for ID-token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub key: VerificationKey,
    /// Expected `iss` claim, e.g. the user pool URL.
    pub issuer: Option<String>,
    /// Expected `aud` claim (the app client id). Unchecked when unset.
    pub audience: Option<String>,
}

impl JwtConfig {
    /// Load token validation settings from environment variables.
    ///
    /// | Env Var                   | Required                      |
    /// |---------------------------|-------------------------------|
    /// | `AUTH_JWT_PUBLIC_KEY_PEM` | one of this or the secret     |
    /// | `AUTH_JWT_SECRET`         | one of this or the public key |
    /// | `AUTH_JWT_ISSUER`         | no                            |
    /// | `AUTH_JWT_AUDIENCE`       | no                            |
    ///
    /// # Panics
    ///
    /// Panics if neither key variable is set, or the chosen one is empty.
    pub fn from_env() -> Self {
        let key = match std::env::var("AUTH_JWT_PUBLIC_KEY_PEM") {
            Ok(pem) => {
                assert!(!pem.trim().is_empty(), "AUTH_JWT_PUBLIC_KEY_PEM must not be empty");
                VerificationKey::RsaPem(pem)
            }
            Err(_) => {
                let secret = std::env::var("AUTH_JWT_SECRET").expect(
                    "AUTH_JWT_PUBLIC_KEY_PEM or AUTH_JWT_SECRET must be set in the environment",
                );
                assert!(!secret.is_empty(), "AUTH_JWT_SECRET must not be empty");
                VerificationKey::Secret(secret)
            }
        };

        Self {
            key,
            issuer: non_empty_env("AUTH_JWT_ISSUER"),
            audience: non_empty_env("AUTH_JWT_AUDIENCE"),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Validate and decode an ID token, returning the embedded [`Claims`].
///
/// Checks the signature and expiry, plus issuer and audience when configured.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let (key, algorithm) = match &config.key {
        VerificationKey::Secret(secret) => {
            (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
        }
        VerificationKey::RsaPem(pem) => (DecodingKey::from_rsa_pem(pem.as_bytes())?, Algorithm::RS256),
    };

    let mut validation = Validation::new(algorithm);
    let mut required = vec!["exp"];
    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
        required.push("iss");
    }
    match &config.audience {
        Some(audience) => {
            validation.set_audience(&[audience]);
            required.push("aud");
        }
        None => validation.validate_aud = false,
    }
    // A configured claim must be present, not just correct when present.
    validation.set_required_spec_claims(&required);

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            key: VerificationKey::Secret(secret.to_string()),
            issuer: None,
            audience: None,
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(exp_offset_secs: i64) -> Claims {
        Claims {
            sub: "user-123".into(),
            role: Some("manager".into()),
            email: Some("m@example.com".into()),
            username: Some("mira".into()),
            exp: unix_now() + exp_offset_secs,
        }
    }

    fn unix_now() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
    }

    #[test]
    fn valid_token_round_trips_provider_claims() {
        let token = sign(&claims(3600), "s3cret");
        let decoded = validate_token(&token, &config("s3cret")).unwrap();
        assert_eq!(decoded.sub, "user-123");
        assert_eq!(decoded.role.as_deref(), Some("manager"));
        assert_eq!(decoded.username.as_deref(), Some("mira"));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign(&claims(3600), "s3cret");
        assert!(validate_token(&token, &config("other")).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = sign(&claims(-3600), "s3cret");
        assert!(validate_token(&token, &config("s3cret")).is_err());
    }

    #[test]
    fn issuer_is_enforced_when_configured() {
        let token = sign(&claims(3600), "s3cret");
        let mut cfg = config("s3cret");
        cfg.issuer = Some("https://cognito-idp.example/pool".into());
        assert!(validate_token(&token, &cfg).is_err());
    }

    #[test]
    fn audience_is_enforced_when_configured() {
        let token = sign(&claims(3600), "s3cret");
        let mut cfg = config("s3cret");
        cfg.audience = Some("app-client-id".into());
        assert!(validate_token(&token, &cfg).is_err());
    }

    #[test]
    fn matching_issuer_and_audience_are_accepted() {
        let claims = serde_json::json!({
            "sub": "user-123",
            "custom:role": "tenant",
            "exp": unix_now() + 3600,
            "iss": "https://cognito-idp.example/pool",
            "aud": "app-client-id",
        });
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("s3cret".as_bytes()),
        )
        .unwrap();
        let mut cfg = config("s3cret");
        cfg.issuer = Some("https://cognito-idp.example/pool".into());
        cfg.audience = Some("app-client-id".into());

        let decoded = validate_token(&token, &cfg).unwrap();
        assert_eq!(decoded.role.as_deref(), Some("tenant"));
    }

    #[test]
    fn mismatched_audience_is_rejected() {
        let claims = serde_json::json!({
            "sub": "user-123",
            "exp": unix_now() + 3600,
            "aud": "someone-else",
        });
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("s3cret".as_bytes()),
        )
        .unwrap();
        let mut cfg = config("s3cret");
        cfg.audience = Some("app-client-id".into());
        assert!(validate_token(&token, &cfg).is_err());
    }
}
