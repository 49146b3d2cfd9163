use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthConfig;
use crate::error::AppError;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub jti: String,
    pub iat: i64, // Issued at
    pub exp: i64, // Expiration
}

impl Claims {
    pub fn admin(expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: ADMIN_ROLE.to_string(),
            role: ADMIN_ROLE.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: u64,
}

impl JwtService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiration_hours: config.jwt_expiration_hours,
        }
    }

    pub fn expires_in_secs(&self) -> u64 {
        self.expiration_hours * 3600
    }

    pub fn create_admin_token(&self) -> Result<String, AppError> {
        let claims = Claims::admin(self.expiration_hours);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> JwtService {
        JwtService::new(&AuthConfig {
            jwt_secret: secret.into(),
            jwt_expiration_hours: 1,
            admin_password_hash: String::new(),
        })
    }

    #[test]
    fn issued_token_verifies_as_admin() {
        let jwt = service("s3cret");
        let token = jwt.create_admin_token().unwrap();
        let claims = jwt.verify_token(&token).unwrap();
        assert!(claims.is_admin());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = service("one").create_admin_token().unwrap();
        let err = service("two").verify_token(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = service("s3cret");
        let mut claims = Claims::admin(1);
        claims.iat -= 3 * 3600;
        claims.exp -= 3 * 3600;
        let token = encode(&Header::default(), &claims, &jwt.encoding_key).unwrap();
        assert!(jwt.verify_token(&token).is_err());
    }
}
