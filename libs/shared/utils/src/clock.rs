use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Source of local wall-clock time for past-date checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn at(date: NaiveDate, time: NaiveTime) -> Self {
        Self::new(date.and_time(time))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

pub fn is_date_in_past(date: NaiveDate, now: NaiveDateTime) -> bool {
    date < now.date()
}

/// A time on today's date only counts as past once its minute is over, so a
/// slot starting in the current minute can still be booked.
pub fn is_time_in_past(date: NaiveDate, time: NaiveTime, now: NaiveDateTime) -> bool {
    let today = now.date();
    if date > today {
        return false;
    }
    if date < today {
        return true;
    }

    let current_minute = now.time().with_second(0).and_then(|t| t.with_nanosecond(0));
    let slot_minute = time.with_second(0).and_then(|t| t.with_nanosecond(0));
    match (slot_minute, current_minute) {
        (Some(slot), Some(current)) => slot < current,
        _ => time < now.time(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_same_minute_is_not_past() {
        let now = ymd(2026, 1, 9).and_hms_opt(10, 0, 45).unwrap();
        assert!(!is_time_in_past(ymd(2026, 1, 9), hm(10, 0), now));
        assert!(is_time_in_past(ymd(2026, 1, 9), hm(9, 59), now));
    }

    #[test]
    fn test_other_days() {
        let now = ymd(2026, 1, 9).and_hms_opt(12, 0, 0).unwrap();
        assert!(is_time_in_past(ymd(2026, 1, 8), hm(23, 0), now));
        assert!(!is_time_in_past(ymd(2026, 1, 10), hm(0, 0), now));
        assert!(is_date_in_past(ymd(2026, 1, 8), now));
        assert!(!is_date_in_past(ymd(2026, 1, 9), now));
    }

    #[test]
    fn test_fixed_clock_today() {
        let clock = FixedClock::at(ymd(2026, 1, 9), hm(8, 0));
        assert_eq!(clock.today(), ymd(2026, 1, 9));
    }
}
