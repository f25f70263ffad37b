pub mod ledger;
pub mod booking;
pub mod validation;

pub use ledger::AppointmentLedger;
pub use booking::AppointmentBookingService;
pub use validation::BookingValidator;
