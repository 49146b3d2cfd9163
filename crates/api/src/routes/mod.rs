pub mod admin;
pub mod complexes;
pub mod form;
pub mod login;
pub mod terrains;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
