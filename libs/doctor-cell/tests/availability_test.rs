mod common;

use doctor_cell::*;
use shared_utils::test_utils::{date, seed_date, time};

use common::{store, Bookings};

#[test]
fn test_get_materializes_and_caches() {
    let mut store = store();
    assert!(store.get_if_exists("D001", seed_date()).is_none());

    let availability = store.get("D001", seed_date(), &NoBookings).cloned().unwrap();

    assert_eq!(availability.id, "D001_2026-01-09");
    assert_eq!(availability.doctor_id, "D001");
    assert_eq!(availability.time_slots.len(), 16);
    assert_eq!(store.len(), 1);
    assert!(store.get_if_exists("D001", seed_date()).is_some());
}

#[test]
fn test_get_unknown_doctor_returns_none_without_caching() {
    let mut store = store();

    assert!(store.get("D999", seed_date(), &NoBookings).is_none());
    assert!(store.is_empty());
}

#[test]
fn test_repeated_get_returns_stable_state() {
    let mut store = store();
    let bookings = Bookings::default().with("D001", seed_date(), "09:00", "1");

    let first = store.get("D001", seed_date(), &bookings).cloned().unwrap();
    // Later reads come from the cache, not from the lookup.
    let second = store.get("D001", seed_date(), &NoBookings).cloned().unwrap();

    assert_eq!(first, second);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_update_replaces_matching_entry() {
    let mut store = store();
    let mut availability = store.get("D001", seed_date(), &NoBookings).cloned().unwrap();
    availability.time_slots[0].mark_booked("42");

    assert!(store.update(availability));

    let cached = store.get_if_exists("D001", seed_date()).unwrap();
    assert!(cached.time_slots[0].is_booked);
    assert_eq!(cached.time_slots[0].appointment_id.as_deref(), Some("42"));
}

#[test]
fn test_update_of_uncached_entry_is_ignored() {
    let mut store = store();
    let availability = DoctorAvailability {
        id: DoctorAvailability::availability_id("D001", date("2026-02-01")),
        doctor_id: "D001".to_string(),
        date: date("2026-02-01"),
        time_slots: vec![],
    };

    assert!(!store.update(availability));
    assert!(store.is_empty());
}

#[test]
fn test_regenerate_keeps_blocks_and_refreshes_bookings() {
    let mut store = store();
    let mut availability = store.get("D001", seed_date(), &NoBookings).cloned().unwrap();
    availability.time_slots[6].block(Some("Meeting".to_string()));
    store.update(availability);

    let bookings = Bookings::default().with("D001", seed_date(), "14:00", "3");
    let regenerated = store.regenerate("D001", seed_date(), &bookings).cloned().unwrap();

    assert_eq!(regenerated.id, "D001_2026-01-09");
    assert!(regenerated.time_slots[6].is_blocked);
    assert_eq!(regenerated.time_slots[6].block_reason.as_deref(), Some("Meeting"));
    let at_two = regenerated.slot_at(time("14:00")).unwrap();
    assert!(at_two.is_booked);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_regenerate_creates_missing_entry() {
    let mut store = store();

    let regenerated = store.regenerate("D001", date("2026-03-02"), &NoBookings).cloned();

    assert!(regenerated.is_some());
    assert_eq!(store.len(), 1);
    assert!(store.regenerate("D999", date("2026-03-02"), &NoBookings).is_none());
}

#[test]
fn test_entries_are_per_date() {
    let mut store = store();
    store.get("D001", seed_date(), &NoBookings);
    store.get("D001", date("2026-01-10"), &NoBookings);

    assert_eq!(store.len(), 2);

    store.clear();
    assert!(store.is_empty());
}

#[test]
fn test_available_slots_exclude_booked_and_blocked() {
    let mut store = store();
    let bookings = Bookings::default().with("D001", seed_date(), "09:00", "1");
    let mut availability = store.get("D001", seed_date(), &bookings).cloned().unwrap();
    availability.time_slots[1].block(None);

    assert_eq!(availability.available_slots().len(), 14);
    assert_eq!(availability.booked_count(), 1);
    assert_eq!(availability.blocked_count(), 1);
}

#[test]
fn test_availability_serializes_with_short_times() {
    let mut store = store();
    let availability = store.get("D001", seed_date(), &NoBookings).unwrap();

    let json = serde_json::to_value(availability).unwrap();
    assert_eq!(json["date"], "2026-01-09");
    assert_eq!(json["time_slots"][0]["start_time"], "09:00");
    assert_eq!(json["time_slots"][0]["end_time"], "09:30");
    assert_eq!(json["time_slots"][0]["appointment_id"], serde_json::Value::Null);
}
