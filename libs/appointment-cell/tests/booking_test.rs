mod common;

use appointment_cell::*;
use doctor_cell::{AvailabilityStore, BlockingService, DoctorAvailability};
use notification_cell::AvailabilityChangeBus;
use shared_utils::test_utils::{date, seed_date, time};

use common::{appointment, record, seed_appointment, store};

fn day(store: &mut AvailabilityStore, service: &AppointmentBookingService) -> DoctorAvailability {
    store.get("D001", seed_date(), service.ledger()).cloned().unwrap()
}

#[test]
fn test_book_then_cancel_round_trip() {
    let mut store = store();
    let mut service = AppointmentBookingService::new(AvailabilityChangeBus::new());

    let id = service.book(seed_appointment("a1", "09:00"), &mut store);
    assert_eq!(id.as_deref(), Some("a1"));

    let booked = day(&mut store, &service);
    let slot = booked.slot_at(time("09:00")).unwrap();
    assert!(slot.is_booked);
    assert_eq!(slot.appointment_id.as_deref(), Some("a1"));

    let removed = service.cancel("a1", &mut store).unwrap();
    assert_eq!(removed.id, "a1");
    assert!(service.ledger().is_empty());

    let freed = day(&mut store, &service);
    let slot = freed.slot_at(time("09:00")).unwrap();
    assert!(!slot.is_booked);
    assert_eq!(slot.appointment_id, None);
}

#[test]
fn test_book_on_cached_day_marks_slot() {
    let mut store = store();
    let mut service = AppointmentBookingService::new(AvailabilityChangeBus::new());
    let before = day(&mut store, &service);
    assert_eq!(before.booked_count(), 0);

    service.book(seed_appointment("a1", "11:30"), &mut store);

    let after = day(&mut store, &service);
    assert_eq!(after.booked_count(), 1);
    assert!(after.slot_at(time("11:30")).unwrap().is_booked);
}

#[test]
fn test_book_unknown_doctor_records_nothing() {
    let mut store = store();
    let bus = AvailabilityChangeBus::new();
    let (seen, _subscription) = record(&bus);
    let mut service = AppointmentBookingService::new(bus);

    let mut stray = seed_appointment("a1", "09:00");
    stray.doctor_id = "D999".to_string();

    assert_eq!(service.book(stray, &mut store), None);
    assert!(service.ledger().is_empty());
    assert!(store.is_empty());
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_reschedule_same_day_moves_the_booking() {
    let mut store = store();
    let mut service = AppointmentBookingService::new(AvailabilityChangeBus::new());
    service.book(seed_appointment("a1", "09:00"), &mut store);

    let previous = service
        .reschedule(seed_appointment("a1", "10:00"), &mut store)
        .unwrap();
    assert_eq!(previous.time, time("09:00"));

    let availability = day(&mut store, &service);
    assert!(!availability.slot_at(time("09:00")).unwrap().is_booked);
    let moved = availability.slot_at(time("10:00")).unwrap();
    assert!(moved.is_booked);
    assert_eq!(moved.appointment_id.as_deref(), Some("a1"));

    assert_eq!(service.ledger().len(), 1);
    assert_eq!(service.ledger().get("a1").unwrap().time, time("10:00"));
}

#[test]
fn test_reschedule_across_days_touches_both_entries() {
    let mut store = store();
    let bus = AvailabilityChangeBus::new();
    let (seen, _subscription) = record(&bus);
    let mut service = AppointmentBookingService::new(bus);
    let next_day = date("2026-01-10");

    service.book(seed_appointment("a1", "09:00"), &mut store);
    service.reschedule(appointment("a1", next_day, "14:00"), &mut store);

    let old = store.get_if_exists("D001", seed_date()).unwrap();
    assert!(!old.slot_at(time("09:00")).unwrap().is_booked);
    let new = store.get_if_exists("D001", next_day).unwrap();
    assert_eq!(
        new.slot_at(time("14:00")).unwrap().appointment_id.as_deref(),
        Some("a1")
    );

    let published = seen.lock().unwrap().clone();
    assert_eq!(
        published,
        vec![
            ("D001".to_string(), seed_date()),
            ("D001".to_string(), seed_date()),
            ("D001".to_string(), next_day),
        ]
    );
}

#[test]
fn test_reschedule_unknown_appointment_changes_nothing() {
    let mut store = store();
    let mut service = AppointmentBookingService::new(AvailabilityChangeBus::new());
    service.book(seed_appointment("a1", "09:00"), &mut store);

    assert!(service.reschedule(seed_appointment("ghost", "10:00"), &mut store).is_none());

    let availability = day(&mut store, &service);
    assert!(!availability.slot_at(time("10:00")).unwrap().is_booked);
    assert_eq!(service.ledger().len(), 1);
}

#[test]
fn test_completed_status_releases_slot() {
    let mut store = store();
    let mut service = AppointmentBookingService::new(AvailabilityChangeBus::new());
    service.book(seed_appointment("a1", "09:00"), &mut store);

    let mut done = seed_appointment("a1", "09:00");
    done.status = AppointmentStatus::Completed;
    service.reschedule(done, &mut store);

    let slot = day(&mut store, &service).slot_at(time("09:00")).cloned().unwrap();
    assert!(!slot.is_booked);
    assert_eq!(slot.appointment_id, None);
}

#[test]
fn test_cancel_hands_slot_to_remaining_booking() {
    let mut store = store();
    let mut service = AppointmentBookingService::new(AvailabilityChangeBus::new());
    // Double booking is a caller error the engine does not stop.
    service.book(seed_appointment("a1", "09:00"), &mut store);
    service.book(seed_appointment("a2", "09:00"), &mut store);

    service.cancel("a2", &mut store);

    let slot = day(&mut store, &service).slot_at(time("09:00")).cloned().unwrap();
    assert!(slot.is_booked);
    assert_eq!(slot.appointment_id.as_deref(), Some("a1"));
}

#[test]
fn test_each_mutation_publishes_once_and_misses_publish_nothing() {
    let mut store = store();
    let bus = AvailabilityChangeBus::new();
    let mut service = AppointmentBookingService::new(bus.clone());

    let (seen, _subscription) = record(&bus);
    service.book(seed_appointment("a1", "09:00"), &mut store);
    service.reschedule(seed_appointment("a1", "09:30"), &mut store);
    service.cancel("a1", &mut store);
    assert!(service.cancel("a1", &mut store).is_none());

    assert_eq!(seen.lock().unwrap().len(), 3);
}

#[test]
fn test_scenario_leaves_thirteen_available_slots() {
    let mut store = store();
    let bus = AvailabilityChangeBus::new();
    let mut service = AppointmentBookingService::new(bus.clone());
    let blocking = BlockingService::new(bus);

    assert_eq!(day(&mut store, &service).time_slots.len(), 16);

    service.book(seed_appointment("a1", "09:00"), &mut store);
    let outcome = blocking
        .block_range(
            &mut store,
            service.ledger(),
            "D001",
            seed_date(),
            time("12:00"),
            time("13:00"),
            Some("Lunch".to_string()),
        )
        .unwrap();
    assert_eq!(outcome.affected_slots, 2);

    assert_eq!(day(&mut store, &service).available_slots().len(), 13);
}

#[test]
fn test_ledger_search_and_summary() {
    let mut store = store();
    let mut service = AppointmentBookingService::new(AvailabilityChangeBus::new());
    let mut first_visit = seed_appointment("a2", "14:00");
    first_visit.is_new_patient = true;

    service.book(first_visit, &mut store);
    service.book(seed_appointment("a1", "09:00"), &mut store);
    service.book(appointment("a3", date("2026-01-10"), "09:00"), &mut store);

    let found = service.ledger().search(&AppointmentSearchQuery {
        date: Some(seed_date()),
        ..Default::default()
    });
    let ids: Vec<&str> = found.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2"]);

    let summary = service.ledger().daily_summary(seed_date());
    assert_eq!(summary.total, 2);
    assert_eq!(summary.new_patients, 1);
    assert_eq!(summary.returning_patients, 1);
}

#[test]
fn test_reset_replaces_the_ledger() {
    let mut store = store();
    let mut service = AppointmentBookingService::new(AvailabilityChangeBus::new());
    service.book(seed_appointment("a1", "09:00"), &mut store);

    service.reset(vec![seed_appointment("s1", "10:30"), seed_appointment("s2", "14:00")]);

    assert_eq!(service.ledger().len(), 2);
    assert!(service.ledger().get("a1").is_none());
}
