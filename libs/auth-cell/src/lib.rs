pub mod models;
pub mod services;
pub mod middleware;
pub mod handlers;
pub mod router;

pub use models::*;
pub use services::*;
pub use middleware::*;
pub use router::auth_routes;
