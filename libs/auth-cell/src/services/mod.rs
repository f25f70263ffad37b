pub mod store;
pub mod session;

pub use store::{InMemoryKeyValueStore, KeyValueStore};
pub use session::SessionService;
