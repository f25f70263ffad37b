use assert_matches::assert_matches;

use patient_cell::*;
use shared_utils::test_utils::date;

fn request(name: &str, surname: &str, phone: &str) -> CreatePatientRequest {
    CreatePatientRequest {
        surname: surname.to_string(),
        name: name.to_string(),
        gender: Gender::Female,
        age: 40,
        address: "1 Elm St".to_string(),
        phone_number: phone.to_string(),
    }
}

fn registry() -> PatientRegistry {
    let mut registry = PatientRegistry::default();
    let today = date("2026-01-09");
    registry.register(request("John", "Smith", "+1-555-0101"), today).unwrap();
    registry.register(request("Emily", "Johnson", "+1-555-0102"), today).unwrap();
    registry.register(request("Michael", "Williams", "+1-555-0103"), today).unwrap();
    registry
}

#[test]
fn test_register_numbers_patients_in_order() {
    let mut registry = registry();

    let patient = registry
        .register(request("Ana", "Lopez", "+1-555-0199"), date("2026-02-01"))
        .unwrap();

    assert_eq!(patient.patient_number, "P004");
    assert_eq!(patient.registration_date, date("2026-02-01"));
    assert!(patient.is_new);
    assert_eq!(registry.len(), 4);
    assert_eq!(registry.get(&patient.id), Some(&patient));
}

#[test]
fn test_register_requires_fields() {
    let mut registry = PatientRegistry::default();

    let result = registry.register(request("  ", "Smith", "+1"), date("2026-01-09"));
    assert_matches!(result, Err(PatientError::ValidationError(msg)) if msg.contains("name"));

    let mut ageless = request("John", "Smith", "+1");
    ageless.age = 0;
    assert_matches!(
        registry.register(ageless, date("2026-01-09")),
        Err(PatientError::ValidationError(_))
    );
    assert!(registry.is_empty());
}

#[test]
fn test_search_is_trimmed_and_case_insensitive() {
    let registry = registry();

    let names = |query: &str| -> Vec<String> {
        registry.search(query).iter().map(|p| p.full_name()).collect()
    };

    assert_eq!(names("  SMITH "), vec!["John Smith"]);
    assert_eq!(names("p002"), vec!["Emily Johnson"]);
    assert_eq!(names("michael will"), vec!["Michael Williams"]);
    assert_eq!(names("555-0103"), vec!["Michael Williams"]);
    assert_eq!(names("john").len(), 2);
    assert!(names("   ").is_empty());
    assert!(names("zzz").is_empty());
}

#[test]
fn test_update_changes_only_given_fields() {
    let mut registry = registry();
    let id = registry.list()[0].id.clone();

    let updated = registry
        .update(
            &id,
            UpdatePatientRequest {
                phone_number: Some("+1-555-9999".to_string()),
                is_new: Some(false),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.phone_number, "+1-555-9999");
    assert_eq!(updated.name, "John");
    assert!(!updated.is_new);
    assert_eq!(registry.get(&id).unwrap().phone_number, "+1-555-9999");
}

#[test]
fn test_update_rejects_blank_fields_and_trims_the_rest() {
    let mut registry = registry();
    let id = registry.list()[0].id.clone();

    let result = registry.update(
        &id,
        UpdatePatientRequest {
            name: Some("   ".to_string()),
            ..Default::default()
        },
    );
    assert_matches!(result, Err(PatientError::ValidationError(msg)) if msg.contains("name"));
    assert_eq!(registry.get(&id).unwrap().name, "John");

    assert_matches!(
        registry.update(
            &id,
            UpdatePatientRequest {
                age: Some(0),
                ..Default::default()
            }
        ),
        Err(PatientError::ValidationError(_))
    );

    let updated = registry
        .update(
            &id,
            UpdatePatientRequest {
                name: Some("  Jonathan ".to_string()),
                address: Some(" 2 Oak Ave".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.name, "Jonathan");
    assert_eq!(updated.address, "2 Oak Ave");
    assert_eq!(updated.full_name(), "Jonathan Smith");
}

#[test]
fn test_update_unknown_patient() {
    let mut registry = registry();

    assert_matches!(
        registry.update("missing", UpdatePatientRequest::default()),
        Err(PatientError::NotFound(id)) if id == "missing"
    );
}

#[test]
fn test_patient_json_shape() {
    let registry = registry();
    let value = serde_json::to_value(&registry.list()[1]).unwrap();

    assert_eq!(value["patient_number"], "P002");
    assert_eq!(value["gender"], "Female");
    assert_eq!(value["registration_date"], "2026-01-09");
}
