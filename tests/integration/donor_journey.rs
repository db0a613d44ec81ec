//! End-to-end donor journey: registration chains into booking and the
//! confirmation survives a JSON round trip, with step-1 data preserved
//! verbatim in the final record.

use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;
use test_log::test;

use hemora::booking::{next_bookable_date, BookingWizard};
use hemora::models::{BloodGroup, BookingConfirmation};
use hemora::registration::{RegistrationWizard, SessionOutcome, Step};
use hemora::ui::app::sample_centers;

use crate::common::test_data;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

#[test]
fn test_registration_round_trips_personal_info() {
    let mut wizard = RegistrationWizard::new();
    wizard.draft_mut().personal = test_data::filled_personal("Sarah", "Lee");
    wizard.advance(today()).unwrap();

    wizard.draft_mut().blood_group = Some(BloodGroup::ONegative);
    wizard.advance(today()).unwrap();

    wizard.draft_mut().screening = test_data::eligible_screening();
    wizard.advance(today()).unwrap();
    assert_eq!(wizard.step(), Step::Consent);

    wizard.draft_mut().consent = true;
    let record = wizard.submit(today()).unwrap();

    // Data entered in step 1 appears verbatim in the final record
    assert_eq!(record.personal_info.first_name, "Sarah");
    assert_eq!(record.personal_info.last_name, "Lee");
    assert_eq!(record.personal_info, test_data::filled_personal("Sarah", "Lee"));
    assert_eq!(record.blood_group, BloodGroup::ONegative);
    assert!(record.consent);
}

#[test]
fn test_registration_chains_into_booking() {
    let mut registration = RegistrationWizard::new();
    registration.draft_mut().personal = test_data::filled_personal("Sarah", "Lee");
    registration.draft_mut().blood_group = Some(BloodGroup::APositive);
    registration.draft_mut().screening = test_data::eligible_screening();
    registration.draft_mut().consent = true;
    registration.advance(today()).unwrap();
    registration.advance(today()).unwrap();
    registration.advance(today()).unwrap();

    let outcome = match registration.submit(today()) {
        Ok(record) => SessionOutcome::Completed(record),
        Err(_) => SessionOutcome::Cancelled,
    };
    let record = match outcome {
        SessionOutcome::Completed(record) => record,
        SessionOutcome::Cancelled => panic!("session should complete"),
    };

    // The booking flow receives the registered donor's context
    let mut booking = BookingWizard::new(sample_centers(), 30);
    booking.select_center(1).unwrap();

    let date = next_bookable_date(today() + Duration::days(3), today(), 30).unwrap();
    booking.choose_date(date, today()).unwrap();
    booking.choose_slot(2).unwrap();
    booking.confirm_schedule().unwrap();

    let confirmation = booking.confirm(1_000_042).unwrap();
    assert_eq!(confirmation.booking_id, "BD000042");
    assert_eq!(confirmation.center.name, "Mercy Hospital Blood Drive");
    assert_eq!(record.personal_info.first_name, "Sarah");
}

#[test]
fn test_confirmation_export_round_trip() {
    let mut booking = BookingWizard::new(vec![test_data::sample_center()], 30);
    booking.select_center(0).unwrap();
    booking
        .choose_date(today() + Duration::days(1), today())
        .unwrap();
    booking.choose_slot(0).unwrap();
    booking.confirm_schedule().unwrap();
    let confirmation = booking.confirm(314_159).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir
        .path()
        .join(format!("hemora-booking-{}.json", confirmation.booking_id));
    std::fs::write(&path, serde_json::to_string_pretty(&confirmation).unwrap()).unwrap();

    let loaded: BookingConfirmation =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded, confirmation);
    assert_eq!(loaded.booking_id, "BD314159");
}

#[test]
fn test_abandoned_session_discards_state() {
    let mut wizard = RegistrationWizard::new();
    wizard.draft_mut().personal = test_data::filled_personal("Sarah", "Lee");

    // Backing out of the first step ends the session with no record
    assert_eq!(wizard.back(), None);
    let outcome = SessionOutcome::Cancelled;
    assert_eq!(outcome, SessionOutcome::Cancelled);
}
