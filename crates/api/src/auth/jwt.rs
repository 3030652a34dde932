//! JWT access-token generation and validation.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload. The subject is
//! an opaque string: a registered user's id, or whatever the mock token
//! endpoint was asked for.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use timeforing_core::roles::ROLE_USER;
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- owner key for projects and time entries.
    pub sub: String,
    /// Issuer; must match [`JwtConfig::issuer`].
    pub iss: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
    /// Role names such as `timeforingapp::USER`.
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Value written to and required in the `iss` claim.
    pub issuer: String,
    /// Token lifetime in hours (default: 12).
    pub expiry_hours: i64,
}

/// Default token lifetime in hours.
const DEFAULT_EXPIRY_HOURS: i64 = 12;
/// Default issuer for locally minted tokens.
const DEFAULT_ISSUER: &str = "mock-issuer";

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var            | Required | Default       |
    /// |--------------------|----------|---------------|
    /// | `JWT_SECRET`       | **yes**  | --            |
    /// | `JWT_ISSUER`       | no       | `mock-issuer` |
    /// | `JWT_EXPIRY_HOURS` | no       | `12`          |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.into());

        let expiry_hours: i64 = std::env::var("JWT_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            issuer,
            expiry_hours,
        }
    }
}

/// Who a token is issued for.
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub sub: String,
    pub roles: Vec<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl TokenSubject {
    /// A plain user subject with the default role and no profile claims.
    pub fn user(sub: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            roles: vec![ROLE_USER.to_string()],
            name: None,
            email: None,
            phone: None,
        }
    }
}

/// Generate an HS256 access token for `subject`.
pub fn generate_token(
    subject: &TokenSubject,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.expiry_hours * 3600;

    let claims = Claims {
        sub: subject.sub.clone(),
        iss: config.issuer.clone(),
        iat: now,
        exp,
        jti: Uuid::new_v4().to_string(),
        roles: subject.roles.clone(),
        name: subject.name.clone(),
        email: subject.email.clone(),
        phone: subject.phone.clone(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature, expiry and issuer.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.as_str()]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
