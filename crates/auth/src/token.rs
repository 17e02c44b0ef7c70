//! Access token issuance and verification (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use climabill_core::{TenantId, UserId};

use crate::claims::Claims;
use crate::error::AuthError;
use crate::roles::Role;

/// Fixed lifetime of an access token, in hours.
pub const ACCESS_TOKEN_TTL_HOURS: i64 = 24;

/// Stateless token issuer/verifier, parameterized by the server-held secret.
///
/// `issue` and `verify` are a pure function pair: no state is retained
/// between calls, so the service is trivially shareable across request
/// handlers.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: Duration::hours(ACCESS_TOKEN_TTL_HOURS),
        }
    }

    /// Override the token lifetime (tests mint short/expired tokens).
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Mint a signed token binding `user_id` to `tenant_id`.
    pub fn issue(&self, user_id: UserId, tenant_id: TenantId, role: Role) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            tenant_id,
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Crypto(format!("token encode: {e}")))
    }

    /// Verify a token's signature, shape and expiry; return its claims.
    ///
    /// All failure modes map to the single `InvalidCredential` variant —
    /// the caller must not be able to tell a forged token from an expired
    /// one.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidCredential)
    }
}
