use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Api { status: u16, message: String },

    #[error("cannot read photo: {0}")]
    Io(#[from] std::io::Error),

    #[error("admin login required")]
    NotLoggedIn,
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}
