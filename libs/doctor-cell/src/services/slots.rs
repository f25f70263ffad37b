use chrono::{NaiveDate, NaiveTime};

use crate::models::{Doctor, TimeSlot};

/// Lookup of the active booking holding a slot start, if any.
pub trait BookingLookup {
    fn active_booking(&self, doctor_id: &str, date: NaiveDate, start_time: NaiveTime) -> Option<String>;
}

/// Lookup for a day with no appointments at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBookings;

impl BookingLookup for NoBookings {
    fn active_booking(&self, _doctor_id: &str, _date: NaiveDate, _start_time: NaiveTime) -> Option<String> {
        None
    }
}

/// Builds the ordered slots of one working day.
///
/// Slots are `[cursor, cursor + duration)` for as long as a whole slot still
/// fits before `end`, so a trailing partial slot is never produced. Booked
/// state is read from `bookings`; block state is carried over from
/// `existing_slots` by matching start time.
pub fn generate_time_slots(
    doctor: &Doctor,
    date: NaiveDate,
    bookings: &dyn BookingLookup,
    existing_slots: Option<&[TimeSlot]>,
) -> Vec<TimeSlot> {
    let hours = &doctor.working_hours;
    let mut slots = Vec::with_capacity(hours.slot_count());
    if hours.validate().is_err() {
        return slots;
    }

    let duration = hours.slot_duration();
    let mut cursor = hours.start;

    while cursor < hours.end && hours.end - cursor >= duration {
        let slot_end = cursor + duration;
        let appointment_id = bookings.active_booking(&doctor.id, date, cursor);
        let previous = existing_slots
            .and_then(|existing| existing.iter().find(|slot| slot.start_time == cursor));

        slots.push(TimeSlot {
            id: TimeSlot::slot_id(date, cursor),
            start_time: cursor,
            end_time: slot_end,
            is_booked: appointment_id.is_some(),
            appointment_id,
            is_blocked: previous.map(|slot| slot.is_blocked).unwrap_or(false),
            block_reason: previous.and_then(|slot| slot.block_reason.clone()),
        });

        cursor = slot_end;
    }

    slots
}
