pub mod clock;
pub mod test_utils;

pub use clock::{is_date_in_past, is_time_in_past, Clock, FixedClock, SystemClock};
