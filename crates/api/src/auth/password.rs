use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::AppError;

pub struct PasswordService;

impl PasswordService {
    pub fn hash_password(password: &str) -> Result<String, AppError> {
        Self::hash_password_with_cost(password, DEFAULT_COST)
    }

    pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
        hash(password, cost)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
        verify(password, hash)
            .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
    }
}
