use std::{env, path::PathBuf};

use anyhow::Context;

use crate::auth::AuthConfig;

const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub upload_max_bytes: usize,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://db.sqlite".into());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".into())
            .parse()
            .context("PORT must be a port number")?;
        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));
        let upload_max_bytes = match env::var("UPLOAD_MAX_BYTES") {
            Ok(raw) => raw.parse().context("UPLOAD_MAX_BYTES must be a byte count")?,
            Err(_) => DEFAULT_UPLOAD_MAX_BYTES,
        };

        Ok(Self {
            database_url,
            port,
            upload_dir,
            upload_max_bytes,
            auth: AuthConfig::from_env()?,
        })
    }
}
