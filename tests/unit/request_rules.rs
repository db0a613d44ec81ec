//! Blood request form validation tests

use pretty_assertions::assert_eq;
use test_log::test;

use hemora::models::BloodGroup;
use hemora::request::{BloodRequestForm, UrgencyLevel};

fn filled_form() -> BloodRequestForm {
    BloodRequestForm {
        patient_name: "Alex Chen".to_string(),
        hospital: "Central Hospital".to_string(),
        blood_types: vec![BloodGroup::AbPositive],
        units_needed: "4".to_string(),
        urgency: Some(UrgencyLevel::Routine),
        contact_phone: "555-0199".to_string(),
        additional_info: "Surgery scheduled for Friday".to_string(),
    }
}

#[test]
fn test_all_required_fields_enforced() {
    let errors = BloodRequestForm::new().validate();
    for field in [
        "patient_name",
        "hospital",
        "blood_types",
        "units_needed",
        "urgency",
        "contact_phone",
    ] {
        assert!(errors.get(field).is_some(), "missing error for {}", field);
    }
    // additional_info is optional
    assert_eq!(errors.len(), 6);
}

#[test]
fn test_units_range() {
    let mut form = filled_form();
    form.units_needed = "0".to_string();
    assert_eq!(
        form.validate().get("units_needed"),
        Some("Units must be between 1 and 50")
    );

    form.units_needed = "50".to_string();
    assert!(form.validate().is_empty());

    form.units_needed = "51".to_string();
    assert_eq!(
        form.validate().get("units_needed"),
        Some("Units must be between 1 and 50")
    );
}

#[test]
fn test_emergency_levels() {
    assert!(!UrgencyLevel::Routine.is_emergency());
    assert!(!UrgencyLevel::Urgent.is_emergency());
    assert!(UrgencyLevel::Critical.is_emergency());
    assert!(UrgencyLevel::Emergency.is_emergency());
}

#[test]
fn test_submitted_request_carries_id_and_fields() {
    let form = filled_form();
    let request = form.submit(123_456_789).unwrap();

    assert_eq!(request.request_id, "BR456789");
    assert_eq!(request.patient_name, "Alex Chen");
    assert_eq!(request.units_needed, 4);
    assert_eq!(request.urgency, UrgencyLevel::Routine);
}

#[test]
fn test_invalid_form_submit_returns_errors() {
    let mut form = filled_form();
    form.blood_types.clear();

    let errors = form.submit(0).unwrap_err();
    assert_eq!(
        errors.get("blood_types"),
        Some("At least one blood type must be selected")
    );
}
