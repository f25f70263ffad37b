pub mod auth;
pub mod error;
pub mod time_format;

pub use auth::{SessionInfo, UserRole};
pub use error::AppError;
