pub mod config;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use config::AuthConfig;
pub use jwt::{Claims, JwtService, ADMIN_ROLE};
pub use middleware::AuthMiddleware;
pub use password::PasswordService;
