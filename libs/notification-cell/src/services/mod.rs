pub mod bus;
pub mod broadcast;

pub use bus::{AvailabilityCallback, AvailabilityChangeBus, AvailabilityObserverRegistry, Subscription};
pub use broadcast::AvailabilityBroadcaster;
