pub mod seed;
pub mod context;
pub mod state;
pub mod handlers;
pub mod router;

pub use context::ClinicContext;
pub use state::AppState;
pub use router::front_desk_routes;
