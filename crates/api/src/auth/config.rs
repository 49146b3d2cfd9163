use std::env;

use anyhow::{bail, Context};

use crate::auth::PasswordService;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
    /// bcrypt hash of the single admin password.
    pub admin_password_hash: String,
}

impl AuthConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let jwt_expiration_hours = env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "12".into())
            .parse()
            .context("JWT_EXPIRATION_HOURS must be a whole number of hours")?;

        let admin_password_hash = match (
            env::var("ADMIN_PASSWORD_HASH"),
            env::var("ADMIN_PASSWORD"),
        ) {
            (Ok(hash), _) => hash,
            (Err(_), Ok(plain)) => {
                tracing::warn!("ADMIN_PASSWORD is set in clear, prefer ADMIN_PASSWORD_HASH");
                PasswordService::hash_password(&plain)?
            }
            (Err(_), Err(_)) => bail!("ADMIN_PASSWORD_HASH or ADMIN_PASSWORD must be set"),
        };

        Ok(Self {
            jwt_secret,
            jwt_expiration_hours,
            admin_password_hash,
        })
    }
}
