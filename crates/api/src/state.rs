use std::{path::PathBuf, sync::Arc};

use infra::{
    db::Db,
    repos::{ComplexRepo, TerrainRepo},
};

use crate::auth::JwtService;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    upload_dir: Arc<PathBuf>,
    upload_max_bytes: usize,
    admin_password_hash: Arc<str>,
    jwt_service: JwtService,
}

impl AppState {
    /// Build the state over an already opened store, so tests can hand in an
    /// in-memory pool.
    pub fn new(db: Db, config: &AppConfig) -> Self {
        Self {
            db,
            upload_dir: Arc::new(config.upload_dir.clone()),
            upload_max_bytes: config.upload_max_bytes,
            admin_password_hash: Arc::from(config.auth.admin_password_hash.as_str()),
            jwt_service: JwtService::new(&config.auth),
        }
    }

    pub fn complexes(&self) -> ComplexRepo {
        ComplexRepo::new(self.db.clone())
    }

    pub fn terrains(&self) -> TerrainRepo {
        TerrainRepo::new(self.db.clone())
    }

    pub fn upload_dir(&self) -> &PathBuf {
        &self.upload_dir
    }

    pub fn upload_max_bytes(&self) -> usize {
        self.upload_max_bytes
    }

    pub fn admin_password_hash(&self) -> &str {
        &self.admin_password_hash
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}
