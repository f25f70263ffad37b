pub mod doctor;
pub mod slots;
pub mod availability;
pub mod blocking;

pub use doctor::DoctorDirectory;
pub use slots::{generate_time_slots, BookingLookup, NoBookings};
pub use availability::AvailabilityStore;
pub use blocking::BlockingService;
